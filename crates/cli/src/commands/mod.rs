//! Subcommand implementations.

pub mod seed;
pub mod users;

use food_store_backend::BackendError;
use food_store_core::EmailError;
use thiserror::Error;

/// Errors a command can end with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("backend: {0}")]
    Backend(#[from] BackendError),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("seed file has {} problem(s): {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),

    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("no user registered with {0}")]
    UserNotFound(String),
}
