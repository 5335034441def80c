//! Extraction of the numbered research questions from a generation.
//!
//! The generator is asked to introduce each question with `QUESTION <n>:`.
//! Models do not always comply, so there is a line-oriented fallback for
//! markers without a number. Neither pass retries or pads; that policy belongs
//! to the caller.

use regex::Regex;
use tracing::debug;

pub const MAX_QUESTIONS: usize = 3;

const MARKER_KEYWORD: &str = "QUESTION";

/// Extract at most three questions, earliest first, trimmed.
pub fn extract_questions(raw: &str) -> Vec<String> {
    let mut questions = match try_parse_markers(raw) {
        Some(found) => found,
        None => {
            debug!("No numbered question markers found, falling back to line scan");
            parse_marker_lines(raw)
        }
    };

    questions.truncate(MAX_QUESTIONS);
    questions
}

/// Each marker owns the text up to the next marker or the end of input,
/// including any line breaks in between.
fn try_parse_markers(raw: &str) -> Option<Vec<String>> {
    let marker_re = Regex::new(r"QUESTION\s+\d+\s*:").ok()?;

    let markers: Vec<_> = marker_re.find_iter(raw).collect();
    let mut questions = Vec::new();

    for (idx, marker) in markers.iter().enumerate() {
        let end = markers
            .get(idx + 1)
            .map(|next| next.start())
            .unwrap_or(raw.len());
        let text = raw[marker.end()..end].trim();
        if !text.is_empty() {
            questions.push(text.to_string());
        }
    }

    if questions.is_empty() {
        None
    } else {
        Some(questions)
    }
}

fn parse_marker_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.starts_with(MARKER_KEYWORD))
        .filter_map(|line| line.split_once(':'))
        .map(|(_, text)| text.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}
