//! Test helpers shared across the `typed_flags` workspace.
//!
//! Flag resolution reads the process environment for prefixed variables and
//! for `HOME` during `~` expansion, so tests that touch either go through the
//! guards in [`env`].

pub mod env;
