//! Test doubles shared by the generate module's unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CallError, Generator, Reporter};

type Responder = dyn Fn(&str, &str) -> Result<String, CallError> + Send + Sync;
type Latency = dyn Fn(&str) -> Duration + Send + Sync;

pub fn models(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// Scripted backend that records every `(model, prompt)` it receives.
pub struct FakeGenerator {
    respond: Box<Responder>,
    latency: Option<Box<Latency>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeGenerator {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String, CallError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            latency: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Sleep for `latency(prompt)` before answering each call.
    pub fn with_latency<L>(mut self, latency: L) -> Self
    where
        L: Fn(&str) -> Duration + Send + Sync + 'static,
    {
        self.latency = Some(Box::new(latency));
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn models_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|(m, _)| m).collect()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, p)| p).collect()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, CallError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        match &self.latency {
            Some(latency) => tokio::time::sleep(latency(prompt)).await,
            // Yield so concurrently spawned calls interleave.
            None => tokio::task::yield_now().await,
        }
        (self.respond)(model, prompt)
    }
}

/// Collects reporter events as short strings.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn attempting(&self, model: &str) {
        self.push(format!("attempting {model}"));
    }

    fn quota_exhausted(&self, model: &str, _err: &CallError) {
        self.push(format!("quota {model}"));
    }

    fn call_failed(&self, model: &str, _err: &CallError) {
        self.push(format!("failed {model}"));
    }

    fn exhausted(&self) {
        self.push("exhausted".into());
    }

    fn large_context(&self, tokens: usize, lead_model: &str) {
        self.push(format!("large {tokens} {lead_model}"));
    }

    fn batch_started(&self, batch: usize, size: usize) {
        self.push(format!("batch {batch} size {size}"));
    }

    fn pausing(&self, delay: Duration) {
        self.push(format!("pause {}ms", delay.as_millis()));
    }

    fn chunk_failed(&self, reason: &str) {
        self.push(format!("chunk failed: {reason}"));
    }

    fn synthesizing(&self) {
        self.push("synthesizing".into());
    }
}
