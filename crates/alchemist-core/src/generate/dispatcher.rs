use std::sync::Arc;

use super::prompts::{chunk_prompt, reduce_prompt, standard_prompt};
use super::{generate_with_fallback, BatchScheduler, GenerationRequest, Generator};
use super::{NoopReporter, Reporter, TracingReporter};
use crate::budget::{estimate_tokens, split_context};
use crate::config::{GenerationConfig, ReduceOrder};
use crate::error::Result;

/// Chunk replies containing this phrase (any case) carry no findings.
pub const NOTHING_RELEVANT: &str = "nothing relevant";

/// Returned without a synthesis call when no chunk produced findings.
pub const NO_RELEVANT_INFORMATION: &str = "No relevant information found in the provided context.";

/// Routes a [`GenerationRequest`] to the standard or map-reduce path.
pub struct Dispatcher<G> {
    backend: Arc<G>,
    config: GenerationConfig,
    scheduler: BatchScheduler,
    reporter: Arc<dyn Reporter>,
}

impl<G> Dispatcher<G>
where
    G: Generator + 'static,
{
    /// Fails when `config` does not validate.
    pub fn new(backend: Arc<G>, config: GenerationConfig) -> Result<Self> {
        config.ensure_valid()?;
        let scheduler = BatchScheduler::new(config.batch_width, config.batch_delay())?;
        Ok(Self {
            backend,
            config,
            scheduler,
            reporter: Arc::new(TracingReporter),
        })
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate a reply for `request`, `None` when every model failed.
    pub async fn generate(&self, request: &GenerationRequest) -> Option<String> {
        let tier = self.config.tier(request.mode());
        let total = estimate_tokens(Some(request.instruction())) + estimate_tokens(request.context());

        if let Some(context) = request.effective_context() {
            if total > tier.token_ceiling {
                self.reporter
                    .large_context(total, tier.lead().unwrap_or_default());
                return self.map_reduce(request, context).await;
            }
        }

        let prompt = standard_prompt(request.instruction(), request.effective_context());
        generate_with_fallback(&*self.backend, &prompt, &tier.models, &*self.reporter).await
    }

    async fn map_reduce(&self, request: &GenerationRequest, context: &str) -> Option<String> {
        let tier = self.config.tier(request.mode());
        let chunks = match split_context(Some(context), tier.token_ceiling) {
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::error!(error = %e, "context split failed");
                return None;
            }
        };
        tracing::debug!(chunks = chunks.len(), "context split");

        let tasks: Vec<_> = chunks
            .iter()
            .map(|chunk| {
                let backend = Arc::clone(&self.backend);
                let models = tier.models.clone();
                let prompt = chunk_prompt(request.instruction(), chunk);
                async move { generate_with_fallback(&*backend, &prompt, &models, &NoopReporter).await }
            })
            .collect();

        let mut outcomes = self.scheduler.run(tasks, &*self.reporter).await;
        if self.config.reduce_order == ReduceOrder::Chunk {
            outcomes.sort_by_key(|o| o.index);
        }

        let mut findings = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(Some(text)) if !is_nothing_relevant(&text) => findings.push(text),
                Ok(Some(_)) => {}
                Ok(None) => tracing::debug!(chunk = outcome.index, "chunk produced no reply"),
                Err(reason) => self.reporter.chunk_failed(&reason),
            }
        }

        if findings.is_empty() {
            return Some(NO_RELEVANT_INFORMATION.to_string());
        }

        self.reporter.synthesizing();
        let prompt = reduce_prompt(&findings.join("\n"), request.instruction());
        generate_with_fallback(&*self.backend, &prompt, &tier.models, &*self.reporter).await
    }
}

fn is_nothing_relevant(text: &str) -> bool {
    text.to_lowercase().contains(NOTHING_RELEVANT)
}
