//! Fan-out units and the grid they are merged into

use crossterm::style::Color;
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Index;
use std::time::Duration;

/// Fixed analytical lens applied to every question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Perspective {
    Scientific,
    Philosophical,
    Mathematical,
}

impl Perspective {
    pub const ALL: [Perspective; 3] = [
        Perspective::Scientific,
        Perspective::Philosophical,
        Perspective::Mathematical,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Perspective::Scientific => "scientific",
            Perspective::Philosophical => "philosophical",
            Perspective::Mathematical => "mathematical",
        }
    }

    /// Column header text
    pub fn label(self) -> &'static str {
        match self {
            Perspective::Scientific => "SCIENTIFIC",
            Perspective::Philosophical => "PHILOSOPHICAL",
            Perspective::Mathematical => "MATHEMATICAL",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Perspective::Scientific => Color::Green,
            Perspective::Philosophical => Color::Magenta,
            Perspective::Mathematical => Color::Cyan,
        }
    }

    /// Position in [`Perspective::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One of the nine (question, perspective) units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResearchTask {
    pub question_index: usize,
    pub perspective: Perspective,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Completed { response: String },
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct TaskResult {
    pub task: ResearchTask,
    pub outcome: TaskOutcome,
    pub duration: Duration,
}

impl TaskResult {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, TaskOutcome::Failed { .. })
    }

    /// Text shown in the perspective's column; failures show the error in place of analysis.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.outcome {
            TaskOutcome::Completed { response } => Cow::Borrowed(response),
            TaskOutcome::Failed { error } => Cow::Owned(format!(
                "Error in {} analysis: {}",
                self.task.perspective, error
            )),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            TaskOutcome::Completed { .. } => None,
            TaskOutcome::Failed { error } => Some(error),
        }
    }
}

/// Output of question generation: the raw generation plus exactly three questions
#[derive(Debug, Clone)]
pub struct QuestionSet {
    pub response: String,
    pub questions: [String; 3],
}

#[derive(Debug, Clone)]
pub struct GridRow {
    pub question_index: usize,
    pub question: String,
    pub scientific: TaskResult,
    pub philosophical: TaskResult,
    pub mathematical: TaskResult,
}

impl GridRow {
    pub fn get(&self, perspective: Perspective) -> &TaskResult {
        match perspective {
            Perspective::Scientific => &self.scientific,
            Perspective::Philosophical => &self.philosophical,
            Perspective::Mathematical => &self.mathematical,
        }
    }

    /// Cells in [`Perspective::ALL`] order
    pub fn cells(&self) -> [&TaskResult; 3] {
        [&self.scientific, &self.philosophical, &self.mathematical]
    }
}

/// Question × perspective results, rows in ascending question index.
/// Every cell is populated; a failed task is an error-marked cell.
#[derive(Debug, Clone)]
pub struct ResultGrid {
    rows: Vec<GridRow>,
}

impl ResultGrid {
    /// Merge settled results by their own task identity. Arrival order does not matter.
    pub fn assemble(questions: &[String; 3], results: Vec<TaskResult>) -> Self {
        let mut by_task: HashMap<ResearchTask, TaskResult> = results
            .into_iter()
            .map(|result| (result.task, result))
            .collect();

        let mut take = |question_index: usize, perspective: Perspective| {
            let task = ResearchTask {
                question_index,
                perspective,
            };
            by_task.remove(&task).unwrap_or_else(|| TaskResult {
                task,
                outcome: TaskOutcome::Failed {
                    error: "task produced no result".to_string(),
                },
                duration: Duration::ZERO,
            })
        };

        let rows = questions
            .iter()
            .enumerate()
            .map(|(question_index, question)| GridRow {
                question_index,
                question: question.clone(),
                scientific: take(question_index, Perspective::Scientific),
                philosophical: take(question_index, Perspective::Philosophical),
                mathematical: take(question_index, Perspective::Mathematical),
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn error_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells())
            .filter(|cell| cell.is_error())
            .count()
    }
}

impl Index<usize> for ResultGrid {
    type Output = GridRow;

    fn index(&self, question_index: usize) -> &GridRow {
        &self.rows[question_index]
    }
}
