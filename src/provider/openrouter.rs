use super::{Completion, TextGenerationService};
use crate::config::ProviderConfig;
use crate::error::{EnvironmentError, ServiceError};
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::time::timeout as tokio_timeout;
use tracing::warn;

/// Client for OpenRouter or any other OpenAI-compatible `/chat/completions` endpoint
pub struct OpenRouterClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl OpenRouterClient {
    pub fn new(config: &ProviderConfig, api_key: String) -> Result<Self, EnvironmentError> {
        let mut headers = reqwest::header::HeaderMap::new();
        for (name, value) in [("http-referer", &config.referer), ("x-title", &config.title)] {
            let Some(value) = value else { continue };
            match HeaderValue::from_str(value) {
                Ok(parsed) => {
                    headers.insert(name, parsed);
                }
                Err(_) => warn!("Ignoring {} header: '{}' is not a valid header value", name, value),
            }
        }

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(EnvironmentError::HttpClient)?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_sec),
        })
    }

    async fn send(&self, system: &str, user: &str) -> Result<String, ServiceError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: self.max_tokens,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        extract_content(parsed)
    }
}

fn extract_content(parsed: ChatResponse) -> Result<String, ServiceError> {
    // OpenRouter reports some upstream failures as a 200 with an error object
    if let Some(err) = parsed.error {
        return Err(ServiceError::Api(err.message));
    }

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ServiceError::MalformedResponse("no message content in first choice".to_string()))
}

#[async_trait]
impl TextGenerationService for OpenRouterClient {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<Completion, ServiceError> {
        let start = Instant::now();

        let text = tokio_timeout(self.timeout, self.send(system, user))
            .await
            .map_err(|_| ServiceError::Timeout(self.timeout))??;

        Ok(Completion {
            text,
            duration: start.elapsed(),
        })
    }
}
