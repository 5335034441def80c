//! Side-by-side rendering of the three perspective responses.
//!
//! Each block is greedily word-wrapped to an equal column width, the shorter
//! columns are padded with blank lines, and rows are joined by a separator
//! between a bordered header and a closing border.

pub const SEPARATOR: &str = " | ";

/// Subtracted from a third of the total width to leave room for the separators
const SEPARATOR_ALLOWANCE: usize = 2;

/// Current terminal width, if stdout is attached to one
pub fn terminal_width() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| cols as usize)
        .filter(|cols| *cols > 0)
}

/// Terminal width, or `default` when it cannot be determined
pub fn resolve_width(default: usize) -> usize {
    width_or_default(terminal_width(), default)
}

fn width_or_default(detected: Option<usize>, default: usize) -> usize {
    detected.unwrap_or(default)
}

pub fn column_width(total_width: usize) -> usize {
    (total_width / 3).saturating_sub(SEPARATOR_ALLOWANCE).max(1)
}

/// Greedy word wrap. Lines are right-padded to `width`; a word longer than
/// `width` gets a line of its own and is never split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + word_len + 1 <= width {
            current.push(' ');
            current.push_str(word);
            current_len += word_len + 1;
        } else {
            lines.push(pad(&current, width));
            current = word.to_string();
            current_len = word_len;
        }
    }

    if current_len > 0 {
        lines.push(pad(&current, width));
    }

    lines
}

/// Centred label, cut to the column width so the header row stays aligned
fn header_cell(label: &str, width: usize) -> String {
    let label: String = label.chars().take(width).collect();
    format!("{:^width$}", label, width = width)
}

fn pad(line: &str, width: usize) -> String {
    format!("{:<width$}", line, width = width)
}

/// Three wrapped columns of equal height and width
#[derive(Debug, Clone)]
pub struct Columns {
    pub total_width: usize,
    pub column_width: usize,
    pub headers: [String; 3],
    pub columns: [Vec<String>; 3],
}

impl Columns {
    pub fn new(headers: [&str; 3], blocks: [&str; 3], total_width: usize) -> Self {
        let column_width = column_width(total_width);
        let mut columns = blocks.map(|block| wrap(block, column_width));

        let height = columns.iter().map(Vec::len).max().unwrap_or(0);
        for column in &mut columns {
            column.resize(height, " ".repeat(column_width));
        }

        Self {
            total_width,
            column_width,
            headers: headers.map(|h| header_cell(h, column_width)),
            columns,
        }
    }

    pub fn height(&self) -> usize {
        self.columns[0].len()
    }

    pub fn border(&self) -> String {
        "=".repeat(self.total_width)
    }

    /// Body cells for one row, in column order
    pub fn row(&self, idx: usize) -> [&str; 3] {
        [
            self.columns[0][idx].as_str(),
            self.columns[1][idx].as_str(),
            self.columns[2][idx].as_str(),
        ]
    }

    /// Border, header, border, body rows, border. `paint` decorates each
    /// cell given its column index; borders and separators are left plain.
    pub fn render_with<F>(&self, paint: F) -> Vec<String>
    where
        F: Fn(usize, &str) -> String,
    {
        let join = |cells: [&str; 3]| {
            cells
                .into_iter()
                .enumerate()
                .map(|(col, cell)| paint(col, cell))
                .collect::<Vec<_>>()
                .join(SEPARATOR)
        };

        let mut out = Vec::with_capacity(self.height() + 4);
        out.push(self.border());
        out.push(join([
            self.headers[0].as_str(),
            self.headers[1].as_str(),
            self.headers[2].as_str(),
        ]));
        out.push(self.border());
        for idx in 0..self.height() {
            out.push(join(self.row(idx)));
        }
        out.push(self.border());
        out
    }

    /// Uncoloured rendering
    #[cfg(test)]
    pub fn render(&self) -> Vec<String> {
        self.render_with(|_, cell| cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: [&str; 3] = ["SCIENTIFIC", "PHILOSOPHICAL", "MATHEMATICAL"];

    fn len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_column_width_from_total() {
        assert_eq!(column_width(120), 38);
        assert_eq!(column_width(80), 24);
        assert_eq!(column_width(3), 1);
    }

    #[test]
    fn test_wrap_greedy_fill() {
        let lines = wrap("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick ", "brown fox ", "jumps     "]);
    }

    #[test]
    fn test_wrap_exact_fit_stays_on_line() {
        // "ab cd" is 5 chars: fits a width of 5
        assert_eq!(wrap("ab cd ef", 5), vec!["ab cd", "ef   "]);
    }

    #[test]
    fn test_wrap_collapses_whitespace_and_newlines() {
        assert_eq!(wrap("  a\n\n b\t c  ", 10), vec!["a b c     "]);
        assert!(wrap("   \n ", 10).is_empty());
    }

    #[test]
    fn test_long_word_gets_own_line_untruncated() {
        let lines = wrap("tiny incomprehensibilities end", 8);
        assert_eq!(lines[0], "tiny    ");
        assert_eq!(lines[1], "incomprehensibilities");
        assert_eq!(lines[2], "end     ");

        // An overlong first word does not leave a blank line before it
        let lines = wrap("incomprehensibilities", 8);
        assert_eq!(lines, vec!["incomprehensibilities"]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        let lines = wrap("время и пространство", 12);
        assert_eq!(lines, vec!["время и     ", "пространство"]);
        for line in &lines {
            assert_eq!(len(line), 12);
        }
    }

    #[test]
    fn test_columns_equal_height_and_width() {
        let cols = Columns::new(
            HEADERS,
            [
                "short",
                "a considerably longer block of text that wraps over several lines of output",
                "",
            ],
            60,
        );

        assert_eq!(cols.column_width, 18);
        let height = cols.height();
        assert!(height > 1);
        for column in &cols.columns {
            assert_eq!(column.len(), height);
            for line in column {
                assert_eq!(len(line), cols.column_width);
            }
        }
        assert_eq!(cols.columns[2][0].trim(), "");
    }

    #[test]
    fn test_render_layout() {
        let cols = Columns::new(HEADERS, ["a b", "c", "d e f"], 60);
        let lines = cols.render();

        let border = "=".repeat(60);
        assert_eq!(lines[0], border);
        assert_eq!(lines[2], border);
        assert_eq!(lines.last().unwrap(), &border);
        assert_eq!(lines.len(), cols.height() + 4);

        let header: Vec<_> = lines[1].split(SEPARATOR).map(str::trim).collect();
        assert_eq!(header, HEADERS);

        let body_len = 3 * cols.column_width + 2 * SEPARATOR.len();
        for line in &lines[3..lines.len() - 1] {
            assert_eq!(len(line), body_len);
        }
    }

    #[test]
    fn test_unknown_terminal_width_falls_back_to_default() {
        let width = width_or_default(None, 120);
        assert_eq!(width, 120);
        assert_eq!(width_or_default(Some(90), 120), 90);

        let cols = Columns::new(
            HEADERS,
            ["one two three", "four", "five six seven eight nine ten"],
            width,
        );

        assert_eq!(cols.column_width, 38);
        for column in &cols.columns {
            assert_eq!(column.len(), cols.height());
            assert!(column.iter().all(|l| len(l) == 38));
        }
    }

    #[test]
    fn test_painter_sees_every_cell_with_its_column() {
        let cols = Columns::new(HEADERS, ["a", "b c", "d"], 60);
        let lines = cols.render_with(|col, cell| format!("<{}>{}</{}>", col, cell.trim(), col));

        assert_eq!(lines[0], cols.border());
        assert_eq!(lines[1], "<0>SCIENTIFIC</0> | <1>PHILOSOPHICAL</1> | <2>MATHEMATICAL</2>");
        assert_eq!(lines[3], "<0>a</0> | <1>b c</1> | <2>d</2>");
        assert_eq!(lines.last().unwrap(), &cols.border());
    }

    #[test]
    fn test_headers_fit_narrowest_columns() {
        // 30 / 3 - 2 = 8, narrower than "PHILOSOPHICAL"
        let cols = Columns::new(HEADERS, ["x", "y", "z"], 30);
        assert_eq!(cols.column_width, 8);
        for header in &cols.headers {
            assert_eq!(len(header), 8);
        }
        assert_eq!(cols.headers[1], "PHILOSOP");

        let lines = cols.render();
        assert_eq!(len(&lines[1]), len(&lines[3]));
    }
}
