//! CLI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service error: {0}")]
    Service(String),

    #[error("not found: {0}")]
    NotFound(String),
}

pub type CliResult<T> = Result<T, CliError>;
