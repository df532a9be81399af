//! Per-flag processing and validation stages.
//!
//! After the parser runs, each flag's value passes through at most one
//! [`Processor`], which turns the raw value into its domain form, and then
//! through its [`Validator`]s in attachment order. Both stages see only the
//! flag's own value and whatever the stage captured at registration time.

use std::fmt;

use crate::{FlagResult, FlagValue};

mod stages;

pub use stages::{
    byte_quantity_processor, expect_kind, not_nan, one_of, path_processor, ratio_processor,
    regex_processor,
};

/// Converts a raw parsed value into the value a flag resolves to.
///
/// Implemented for any `Fn(&str, FlagValue) -> FlagResult<FlagValue>`; the
/// first argument is the flag name, for use in error messages.
pub trait Processor {
    /// Converts `value` for `flag`.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagError`](crate::FlagError) attributed to `flag` when the
    /// value cannot be converted.
    fn process(&self, flag: &str, value: FlagValue) -> FlagResult<FlagValue>;
}

impl<F> Processor for F
where
    F: Fn(&str, FlagValue) -> FlagResult<FlagValue>,
{
    fn process(&self, flag: &str, value: FlagValue) -> FlagResult<FlagValue> {
        self(flag, value)
    }
}

/// Checks a processed value.
///
/// Implemented for any `Fn(&str, &FlagValue) -> FlagResult<()>`.
pub trait Validator {
    /// Accepts or rejects `value` for `flag`.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagError`](crate::FlagError) attributed to `flag` when the
    /// value is invalid.
    fn validate(&self, flag: &str, value: &FlagValue) -> FlagResult<()>;
}

impl<F> Validator for F
where
    F: Fn(&str, &FlagValue) -> FlagResult<()>,
{
    fn validate(&self, flag: &str, value: &FlagValue) -> FlagResult<()> {
        self(flag, value)
    }
}

/// The stages attached to one flag.
#[derive(Default)]
pub(crate) struct Pipeline {
    processor: Option<Box<dyn Processor>>,
    validators: Vec<Box<dyn Validator>>,
}

impl Pipeline {
    pub(crate) fn set_processor(&mut self, processor: Box<dyn Processor>) {
        self.processor = Some(processor);
    }

    pub(crate) fn push_validator(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Runs the processor, then every validator, on `value`.
    pub(crate) fn run(&self, flag: &str, value: FlagValue) -> FlagResult<FlagValue> {
        let processed = match &self.processor {
            Some(processor) => {
                tracing::trace!(flag, kind = %value.kind(), "processing flag value");
                processor.process(flag, value)?
            }
            None => value,
        };
        for validator in &self.validators {
            validator.validate(flag, &processed)?;
        }
        tracing::trace!(flag, kind = %processed.kind(), "flag value accepted");
        Ok(processed)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("has_processor", &self.processor.is_some())
            .field("validators", &self.validators.len())
            .finish()
    }
}
