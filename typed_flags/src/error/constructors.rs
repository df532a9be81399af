//! Constructors, accessors, and aggregation helpers for `FlagError`.

use super::{AggregatedErrors, FlagError};
use crate::ValueKind;

impl FlagError {
    /// Tries to build a [`FlagError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the error itself when exactly one is supplied; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut collected: Vec<Self> = errors.into_iter().collect();
        match collected.len() {
            0 => None,
            1 => collected.pop(),
            _ => Some(Self::Aggregate(Box::new(AggregatedErrors::new(collected)))),
        }
    }

    /// Build a [`FlagError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`FlagError::try_aggregate`] to avoid
    /// panicking when the error list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Construct a malformed-value error for `flag`.
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_flags::FlagError;
    /// let e = FlagError::malformed("vcpus-to-memory-ratio", "a valid example is 1:2");
    /// assert_eq!(
    ///     e.to_string(),
    ///     "invalid input for --vcpus-to-memory-ratio: a valid example is 1:2"
    /// );
    /// ```
    #[must_use]
    pub fn malformed(flag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedValue {
            flag: flag.into(),
            message: message.into(),
        }
    }

    /// Construct an unsupported-input error for `flag`.
    #[must_use]
    pub fn unsupported(flag: impl Into<String>, expected: ValueKind, found: ValueKind) -> Self {
        Self::UnsupportedInputType {
            flag: flag.into(),
            expected,
            found,
        }
    }

    /// Construct a registration error for `flag`.
    #[must_use]
    pub fn registration(flag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Registration {
            flag: flag.into(),
            reason: reason.into(),
        }
    }

    /// Name of the flag this error is attributed to.
    ///
    /// Range errors report the `X-min` flag; parser and aggregate errors have
    /// no single flag.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        match self {
            Self::MalformedValue { flag, .. }
            | Self::UnsupportedInputType { flag, .. }
            | Self::RangeConflict { flag, .. }
            | Self::NotAllowed { flag, .. }
            | Self::Registration { flag, .. } => Some(flag),
            Self::RangeOrder { min_flag, .. } => Some(min_flag),
            Self::CliParsing(_) | Self::Aggregate(_) => None,
        }
    }
}
