//! Wires the Gemini HTTP client into the generation dispatcher.

use std::path::Path;
use std::sync::Arc;

use alchemist_core::generate::{CallError, Dispatcher, GenerationRequest, Generator};
use alchemist_core::{Config, Mode};
use anyhow::Context;
use async_trait::async_trait;
use gemini_client::GeminiClient;

/// [`Generator`] over the Gemini `generateContent` endpoint.
pub struct GeminiBackend {
    client: GeminiClient,
}

impl GeminiBackend {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Generator for GeminiBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, CallError> {
        self.client
            .generate_content(model, prompt)
            .await
            .map_err(|e| {
                if e.is_quota() {
                    CallError::quota(e.to_string())
                } else {
                    CallError::other(e.to_string())
                }
            })
    }
}

/// Synchronous facade the commands use: one runtime, one dispatcher, one mode.
pub struct Ai {
    runtime: tokio::runtime::Runtime,
    dispatcher: Dispatcher<GeminiBackend>,
    mode: Mode,
}

impl Ai {
    /// Load configuration and build the client. Fails before any model call
    /// when the API key is missing or the configuration is invalid.
    pub fn connect(root: &Path, mode: Mode) -> anyhow::Result<Self> {
        let config = Config::load(root).context("failed to load config")?;
        let client = GeminiClient::from_env().context("cannot reach Gemini")?;
        let dispatcher = Dispatcher::new(Arc::new(GeminiBackend::new(client)), config.generation)
            .context("invalid generation config")?;
        let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
        tracing::debug!(mode = mode.as_str(), "generation backend ready");
        Ok(Self {
            runtime,
            dispatcher,
            mode,
        })
    }

    /// `None` means every model failed; callers stop without side effects.
    pub fn generate(&self, instruction: &str, context: Option<&str>) -> Option<String> {
        let mut request = GenerationRequest::new(instruction, self.mode);
        if let Some(ctx) = context {
            request = request.with_context(ctx);
        }
        self.runtime.block_on(self.dispatcher.generate(&request))
    }
}
