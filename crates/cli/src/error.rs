//! Errors surfaced by the console.

use shopdesk_api::{ApiError, ConfigError};
use thiserror::Error;

/// Anything that can end a `shopdesk` invocation early.
#[derive(Debug, Error)]
pub enum CliError {
    /// The environment does not describe a usable backend.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A backend call or local session operation failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing to the terminal failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// A command was given arguments it cannot act on.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
