//! Trait-based conversions between external error types and `FlagError`.

use super::FlagError;

impl From<clap::Error> for FlagError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}
