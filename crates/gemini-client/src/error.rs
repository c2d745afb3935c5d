use thiserror::Error;

/// Upstream status string Gemini uses for quota and rate-limit rejections.
pub const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("{0} not set")]
    MissingApiKey(&'static str),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error {status} ({}): {message}", .code.as_deref().unwrap_or("unknown"))]
    Api {
        status: u16,
        /// Upstream status string, e.g. `RESOURCE_EXHAUSTED`.
        code: Option<String>,
        message: String,
    },

    #[error("Failed to parse Gemini response: {source}\n  body: {body}")]
    Parse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model {model} returned no text")]
    EmptyResponse { model: String },
}

impl GeminiError {
    /// Whether the API rejected the call for quota or rate-limit reasons.
    pub fn is_quota(&self) -> bool {
        match self {
            GeminiError::Api { status, code, .. } => {
                *status == 429 || code.as_deref() == Some(RESOURCE_EXHAUSTED)
            }
            _ => false,
        }
    }
}
