mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "polyresearch.yaml";

const MIN_WIDTH: usize = 30;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            output_dir: default_output_dir(),
            default_width: default_width(),
            language: None,
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_yaml(&content)
    }

    /// Load config, falling back to defaults when the default config file is absent.
    /// An explicitly chosen path must exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() && path == Path::new(DEFAULT_CONFIG_PATH) {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_width < MIN_WIDTH {
            return Err(ConfigError::Invalid {
                field: "default_width",
                reason: format!("must be at least {}", MIN_WIDTH),
            });
        }
        if self.provider.max_tokens == 0 {
            return Err(ConfigError::Invalid {
                field: "provider.max_tokens",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.provider.timeout_sec == 0 {
            return Err(ConfigError::Invalid {
                field: "provider.timeout_sec",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "provider.model",
                reason: "must not be empty".to_string(),
            });
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "provider.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
