//! Library facade for the `instance_selector` demo so integration tests can
//! reuse the flag declarations and the selection summary.

pub mod cli;
pub mod error;
pub mod selection;
