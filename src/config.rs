// src/config.rs

// Settings for the external assessment service. The engine never reads the
// environment itself; the binary builds one of these at startup and passes
// it down by reference.

/// Environment variable holding the assessment service base URL.
pub const ENV_API_URL: &str = "LLM_API_URL";
/// Environment variable holding the assessment service credential.
pub const ENV_API_KEY: &str = "LLM_API_KEY";
/// Environment variable holding the model identifier to request.
pub const ENV_MODEL_ID: &str = "LLM_MODEL_ID";

/// Process-wide assessment service settings, read once at process start.
#[derive(Debug, Clone, Default)]
pub struct AssessmentConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model_id: Option<String>,
}

/// A fully-populated view over [`AssessmentConfig`].
///
/// Only obtainable through [`AssessmentConfig::credentials`], so any code
/// holding one can rely on every field being present and non-empty.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub api_url: &'a str,
    pub api_key: &'a str,
    pub model_id: &'a str,
}

impl AssessmentConfig {
    /// Reads the service settings from the process environment.
    ///
    /// Unset variables simply stay `None`; completeness is judged later by
    /// [`AssessmentConfig::credentials`].
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var(ENV_API_URL).ok(),
            api_key: std::env::var(ENV_API_KEY).ok(),
            model_id: std::env::var(ENV_MODEL_ID).ok(),
        }
    }

    /// Returns the complete credential view, or `None` when any value is
    /// unset or empty. An empty string counts as absent.
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        let api_url = self.api_url.as_deref().filter(|v| !v.is_empty())?;
        let api_key = self.api_key.as_deref().filter(|v| !v.is_empty())?;
        let model_id = self.model_id.as_deref().filter(|v| !v.is_empty())?;
        Some(Credentials {
            api_url,
            api_key,
            model_id,
        })
    }
}
