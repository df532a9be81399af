//! Error types for the `instance_selector` demo.

use std::io;

use thiserror::Error;
use typed_flags::FlagError;

/// Errors raised by the instance selector demo.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// A flag could not be registered or resolved.
    #[error(transparent)]
    Flags(#[from] FlagError),
    /// The selection summary could not be written.
    #[error("failed to write the selection: {0}")]
    Output(#[from] io::Error),
}

/// Result alias used throughout the demo.
pub type Result<T> = std::result::Result<T, SelectorError>;
