//! Application glue module
//!
//! Configuration, logging, document loading and the interactive session loop.

mod config;
pub mod loader;
pub mod logging;
mod session;

use std::io;
use std::path::PathBuf;

pub use config::{Config, ConfigError, KeyConfig, WindowConfig};
pub use loader::load_document;
pub use session::{Exit, Flow, Session};

use crate::core::BufferError;
use crate::term::TermError;

/// Top-level error type for the editor binaries
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Term(#[from] TermError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
