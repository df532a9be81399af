//! Helpers for classifying parser errors.

use clap::{Error as ClapError, error::ErrorKind};

use super::FlagError;

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Clap surfaces these requests via specialised [`ErrorKind`] variants so
/// entry points can delegate to [`clap::Error::exit`] and preserve the
/// expected zero exit status.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

impl FlagError {
    /// Returns the parser error when this error is a `--help` or `--version`
    /// request.
    #[must_use]
    pub fn display_request(&self) -> Option<&ClapError> {
        match self {
            Self::CliParsing(err) if is_display_request(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
