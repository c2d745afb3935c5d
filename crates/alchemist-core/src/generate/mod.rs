//! Model-agnostic text generation: ordered fallback across a model tier,
//! batched map-reduce over oversized contexts, and a direct path for
//! everything else.
//!
//! ```text
//! Dispatcher::generate(request)
//!     │
//!     ├─ fits ceiling ──► standard prompt ──► generate_with_fallback ──► Option<String>
//!     │
//!     └─ exceeds ceiling
//!          split_context ──► BatchScheduler (width N, delay D)
//!                               └─ chunk worker × N ──► generate_with_fallback (silent)
//!          drop None / "nothing relevant"
//!          reduce prompt ──► generate_with_fallback ──► Option<String>
//! ```
//!
//! The model backend is injected through [`Generator`], progress is reported
//! through [`Reporter`].

mod dispatcher;
mod fallback;
mod prompts;
mod reporter;
mod request;
mod scheduler;

#[cfg(test)]
mod testing;

pub use dispatcher::{Dispatcher, NOTHING_RELEVANT, NO_RELEVANT_INFORMATION};
pub use fallback::generate_with_fallback;
pub use prompts::{chunk_prompt, reduce_prompt, standard_prompt};
pub use reporter::{NoopReporter, Reporter, TracingReporter};
pub use request::GenerationRequest;
pub use scheduler::{BatchScheduler, TaskOutcome};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallErrorKind {
    /// Per-minute or daily quota hit; the next model may still have budget.
    Quota,
    Other,
}

/// Failure of a single model invocation.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CallError {
    pub kind: CallErrorKind,
    pub message: String,
}

impl CallError {
    pub fn quota(message: impl Into<String>) -> Self {
        Self {
            kind: CallErrorKind::Quota,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: CallErrorKind::Other,
            message: message.into(),
        }
    }

    pub fn is_quota(&self) -> bool {
        self.kind == CallErrorKind::Quota
    }
}

/// A model backend: one prompt in, one text reply out.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, CallError>;
}
