use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::error::GeminiError;
use crate::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::Result;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_VERSION: &str = "v1alpha";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest slice of an unparseable body echoed back in errors.
const MAX_ERROR_BODY_CHARS: usize = 500;

// ─── GeminiClient ─────────────────────────────────────────────────────────

/// HTTP client bound to one API key and base URL.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Build a client against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Build a client from `GEMINI_API_KEY` (required) and `GEMINI_BASE_URL`
    /// (optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GeminiError::MissingApiKey(API_KEY_ENV))?;
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_config(api_key, base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_config(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key_value = HeaderValue::from_str(&api_key)
            .map_err(|_| GeminiError::Config("API key contains invalid characters".into()))?;
        headers.insert("x-goog-api-key", key_value);

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| GeminiError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/{API_VERSION}/models/{model}:generateContent",
            self.base_url
        )
    }

    /// Send `prompt` to `model` and return the first candidate's text.
    ///
    /// Non-2xx replies become [`GeminiError::Api`] carrying the upstream
    /// status string, so callers can tell quota exhaustion apart via
    /// [`GeminiError::is_quota`]. A successful reply without text is
    /// [`GeminiError::EmptyResponse`].
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest::from_prompt(prompt);
        tracing::debug!(model, prompt_chars = prompt.len(), "gemini generateContent");

        let response = self
            .http
            .post(self.generate_url(model))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|source| GeminiError::Parse {
                body: truncate(&text),
                source,
            })?;

        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                model,
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "gemini usage"
            );
        }

        parsed.text().ok_or_else(|| GeminiError::EmptyResponse {
            model: model.to_string(),
        })
    }
}

// ─── Internal ─────────────────────────────────────────────────────────────

fn api_error(status: u16, body: &str) -> GeminiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => GeminiError::Api {
            status,
            code: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => GeminiError::Api {
            status,
            code: None,
            message: truncate(body),
        },
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────
