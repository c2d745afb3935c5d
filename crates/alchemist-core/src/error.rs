use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlchemistError {
    #[error("chunk limit must be a positive token count")]
    InvalidChunkLimit,

    #[error("context is required for splitting")]
    MissingContext,

    #[error("invalid mode '{0}': expected 'fast' or 'smart'")]
    InvalidMode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("batch width must be at least 1")]
    InvalidBatchWidth,

    #[error("required tool not found on PATH: {0}")]
    ToolMissing(String),

    #[error("{program} exited with {}: {stderr}", .code.map(|c| c.to_string()).unwrap_or_else(|| "signal".into()))]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("unexpected output from {program}: {message}")]
    UnexpectedOutput { program: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AlchemistError>;
