use crate::provider::TextGenerationService;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::prompts::research_request;
use super::types::{ResearchTask, TaskOutcome, TaskResult};

const PREVIEW_CHARS: usize = 50;

pub(crate) fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push_str("...");
    }
    out
}

/// Run one (question, perspective) unit. Never fails: service errors become
/// an error-marked result so siblings are unaffected.
pub async fn execute_task(
    service: Arc<dyn TextGenerationService>,
    task: ResearchTask,
    system_prompt: String,
    question: String,
) -> TaskResult {
    let start = Instant::now();
    info!(
        "Started {} research on Q{}: {}",
        task.perspective,
        task.question_index + 1,
        preview(&question)
    );

    let outcome = match service
        .complete(&system_prompt, &research_request(&question))
        .await
    {
        Ok(completion) => {
            debug!(
                "{} on Q{} completed in {:?}",
                task.perspective,
                task.question_index + 1,
                completion.duration
            );
            info!(
                "Completed {} research on Q{}",
                task.perspective,
                task.question_index + 1
            );
            TaskOutcome::Completed {
                response: completion.text,
            }
        }
        Err(e) => {
            warn!(
                "{} research on Q{} failed: {}",
                task.perspective,
                task.question_index + 1,
                e
            );
            TaskOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    TaskResult {
        task,
        outcome,
        duration: start.elapsed(),
    }
}
