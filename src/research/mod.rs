//! Question generation and the nine-way research fan-out

mod executor;
mod orchestrator;
mod prompts;
mod types;

pub(crate) use executor::preview;
pub use orchestrator::ResearchOrchestrator;
pub use prompts::PromptSet;
pub use types::{Perspective, QuestionSet, ResearchTask, ResultGrid, TaskOutcome, TaskResult};
