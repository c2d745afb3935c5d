use crate::config::Mode;

/// One generation job. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    instruction: String,
    context: Option<String>,
    mode: Mode,
}

impl GenerationRequest {
    pub fn new(instruction: impl Into<String>, mode: Mode) -> Self {
        Self {
            instruction: instruction.into(),
            context: None,
            mode,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Context if present and non-empty.
    pub fn effective_context(&self) -> Option<&str> {
        self.context().filter(|c| !c.is_empty())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}
