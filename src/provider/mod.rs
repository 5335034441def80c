mod openrouter;

pub use openrouter::OpenRouterClient;

use crate::error::ServiceError;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub duration: Duration,
}

/// Turns a system prompt plus one user message into text.
///
/// Implementations must tolerate concurrent calls through a shared reference;
/// the research fan-out issues nine requests at once against one client.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, system: &str, user: &str) -> Result<Completion, ServiceError>;
}
