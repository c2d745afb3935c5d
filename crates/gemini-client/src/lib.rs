//! `gemini-client`: a small async driver for the Gemini `generateContent` API.
//!
//! Only the surface the alchemist workspace needs is modelled: single-turn
//! text prompts in, concatenated candidate text out.
//!
//! # Architecture
//!
//! ```text
//! GeminiClient::from_env()   ← reads GEMINI_API_KEY / GEMINI_BASE_URL
//!     │
//!     ▼
//! generate_content(model, prompt)
//!     │   POST {base}/v1alpha/models/{model}:generateContent
//!     ▼
//! GenerateContentResponse    ← typed candidates / parts / usage metadata
//!     │
//!     ▼
//! String                     ← first candidate text, or GeminiError
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?;
//! let text = client.generate_content("gemma-3-4b-it", "Say hello.").await?;
//! println!("{text}");
//! ```

pub mod client;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{GeminiClient, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::GeminiError;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, UsageMetadata,
};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, GeminiError>;
