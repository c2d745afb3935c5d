pub mod audit;
pub mod budget;
pub mod config;
pub mod context;
pub mod drafts;
pub mod error;
pub mod generate;
pub mod git;
pub mod github;
pub mod io;
pub mod parse;
pub mod paths;
pub mod process;

pub use config::{Config, GenerationConfig, Mode, ModelTier};
pub use error::{AlchemistError, Result};
pub use generate::{Dispatcher, GenerationRequest, Generator};
