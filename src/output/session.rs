//! Persisted research sessions: one pretty-printed JSON file per topic submission

use crate::error::OutputError;
use crate::research::{Perspective, QuestionSet, ResultGrid, TaskResult};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub topic: String,
    pub timestamp: DateTime<Local>,
    pub questions_generation: QuestionsGeneration,
    pub research_results: Vec<ResearchRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionsGeneration {
    pub response: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub question: String,
    /// 1-based
    pub question_number: usize,
    pub scientific: PerspectiveRecord,
    pub philosophical: PerspectiveRecord,
    pub mathematical: PerspectiveRecord,
}

impl ResearchRecord {
    pub fn get(&self, perspective: Perspective) -> &PerspectiveRecord {
        match perspective {
            Perspective::Scientific => &self.scientific,
            Perspective::Philosophical => &self.philosophical,
            Perspective::Mathematical => &self.mathematical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveRecord {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&TaskResult> for PerspectiveRecord {
    fn from(result: &TaskResult) -> Self {
        Self {
            response: result.text().into_owned(),
            error: result.error().map(str::to_string),
        }
    }
}

/// `<YYYYmmdd_HHMMSS>_<8 hex>`: sortable by time, unique within the same second
pub fn new_session_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", Local::now().format("%Y%m%d_%H%M%S"), &suffix[..8])
}

impl Session {
    pub fn completed(
        session_id: String,
        topic: &str,
        questions: &QuestionSet,
        grid: &ResultGrid,
    ) -> Self {
        let research_results = grid
            .rows()
            .iter()
            .map(|row| ResearchRecord {
                question: row.question.clone(),
                question_number: row.question_index + 1,
                scientific: (&row.scientific).into(),
                philosophical: (&row.philosophical).into(),
                mathematical: (&row.mathematical).into(),
            })
            .collect();

        Self {
            session_id,
            topic: topic.to_string(),
            timestamp: Local::now(),
            questions_generation: QuestionsGeneration {
                response: questions.response.clone(),
                questions: questions.questions.to_vec(),
            },
            research_results,
        }
    }

    /// Question generation failed: keep the transcript, no research results
    pub fn failed(session_id: String, topic: &str, error: &str) -> Self {
        Self {
            session_id,
            topic: topic.to_string(),
            timestamp: Local::now(),
            questions_generation: QuestionsGeneration {
                response: format!("Error: {}", error),
                questions: Vec::new(),
            },
            research_results: Vec::new(),
        }
    }
}

/// Writes each finished session once; no incremental checkpoints
pub struct SessionRecorder {
    output_dir: PathBuf,
}

impl SessionRecorder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn ensure_dir(&self) -> Result<(), OutputError> {
        fs::create_dir_all(&self.output_dir).map_err(OutputError::CreateDir)
    }

    pub fn path_for(&self, session_id: &str) -> PathBuf {
        self.output_dir
            .join(format!("research_session_{}.json", session_id))
    }

    /// Serialize and write atomically: temp file in the target directory, then rename.
    pub fn record(&self, session: &Session) -> Result<PathBuf, OutputError> {
        self.ensure_dir()?;

        let json = serde_json::to_string_pretty(session)?;
        let path = self.path_for(&session.session_id);

        let mut tmp = NamedTempFile::new_in(&self.output_dir).map_err(OutputError::WriteSession)?;
        tmp.write_all(json.as_bytes())
            .map_err(OutputError::WriteSession)?;
        tmp.persist(&path)
            .map_err(|e| OutputError::WriteSession(e.error))?;

        Ok(path)
    }

    pub fn load(path: &Path) -> Result<Session, OutputError> {
        let content = fs::read_to_string(path).map_err(|e| OutputError::ReadSession {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
