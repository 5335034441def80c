use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory receiving one JSON file per research session
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Display width used when the terminal size is unavailable
    #[serde(default = "default_width")]
    pub default_width: usize,

    /// Language the researchers answer in (e.g. "Russian"). Unset leaves it to the model.
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub provider: ProviderConfig,
}

/// OpenAI-compatible chat completion endpoint
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    /// Sent as `HTTP-Referer`
    #[serde(default)]
    pub referer: Option<String>,

    /// Sent as `X-Title`
    #[serde(default = "default_title")]
    pub title: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_key_env: default_api_key_env(),
            timeout_sec: default_timeout_sec(),
            referer: None,
            title: default_title(),
        }
    }
}
