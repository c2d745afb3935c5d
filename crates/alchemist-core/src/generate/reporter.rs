use std::time::Duration;

use super::CallError;

/// Observer for dispatcher progress. Every method defaults to a no-op.
pub trait Reporter: Send + Sync {
    fn attempting(&self, _model: &str) {}
    fn quota_exhausted(&self, _model: &str, _err: &CallError) {}
    fn call_failed(&self, _model: &str, _err: &CallError) {}
    /// Every model in the tier failed.
    fn exhausted(&self) {}
    fn large_context(&self, _tokens: usize, _lead_model: &str) {}
    /// `batch` is 1-based.
    fn batch_started(&self, _batch: usize, _size: usize) {}
    fn pausing(&self, _delay: Duration) {}
    fn chunk_failed(&self, _reason: &str) {}
    fn synthesizing(&self) {}
}

/// Reports nothing. Used by chunk workers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}

/// Emits every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn attempting(&self, model: &str) {
        tracing::info!(model, "attempting generation");
    }

    fn quota_exhausted(&self, model: &str, err: &CallError) {
        tracing::warn!(model, error = %err, "quota hit, trying next model");
    }

    fn call_failed(&self, model: &str, err: &CallError) {
        tracing::warn!(model, error = %err, "model call failed");
    }

    fn exhausted(&self) {
        tracing::error!("all models exhausted or failed");
    }

    fn large_context(&self, tokens: usize, lead_model: &str) {
        tracing::info!(tokens, model = lead_model, "large context, chunking");
    }

    fn batch_started(&self, batch: usize, size: usize) {
        tracing::info!(batch, chunks = size, "processing batch");
    }

    fn pausing(&self, delay: Duration) {
        tracing::debug!(delay_ms = delay.as_millis() as u64, "pausing between batches");
    }

    fn chunk_failed(&self, reason: &str) {
        tracing::warn!(reason, "chunk processing failed");
    }

    fn synthesizing(&self) {
        tracing::info!("synthesizing final answer");
    }
}
