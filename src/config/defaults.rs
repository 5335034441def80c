use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from("research_outputs")
}

/// Used when the terminal size cannot be queried (piped output, CI).
pub fn default_width() -> usize {
    120
}

pub fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

pub fn default_model() -> String {
    "google/gemini-2.0-pro-exp-02-05:free".to_string()
}

pub fn default_max_tokens() -> u32 {
    2048
}

pub fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}

pub fn default_timeout_sec() -> u64 {
    300
}

pub fn default_title() -> Option<String> {
    Some("Latent Research Assistant".to_string())
}
