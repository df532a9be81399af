//! Every failure from one resolution pass, kept in flag registration order.

use std::{error::Error, fmt, slice, vec};

use super::FlagError;

/// Failures collected while resolving a registry.
///
/// Resolution keeps going after a flag fails so a caller sees every bad
/// input at once rather than fixing them one run at a time.
///
/// # Examples
///
/// ```
/// use typed_flags::FlagError;
///
/// let err = FlagError::aggregate(vec![
///     FlagError::malformed("vcpus-to-memory-ratio", "a valid example is 1:2"),
///     FlagError::malformed("memory", "16xb is not a valid byte quantity"),
/// ]);
/// let FlagError::Aggregate(failures) = err else { unreachable!() };
/// assert_eq!(
///     failures.flags().collect::<Vec<_>>(),
///     ["vcpus-to-memory-ratio", "memory"]
/// );
/// ```
#[derive(Debug)]
pub struct AggregatedErrors {
    failures: Vec<FlagError>,
}

impl AggregatedErrors {
    pub(crate) const fn new(failures: Vec<FlagError>) -> Self {
        Self { failures }
    }

    /// Iterates over the failures.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> slice::Iter<'_, FlagError> {
        self.failures.iter()
    }

    /// Names of the flags that failed, skipping parser-level errors that are
    /// not tied to one flag.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().filter_map(FlagError::flag)
    }

    /// Number of failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether no failure was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.failures.iter();
        if let Some(first) = lines.next() {
            write!(f, "  - {first}")?;
        }
        lines.try_for_each(|failure| write!(f, "\n  - {failure}"))
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a FlagError;
    type IntoIter = slice::Iter<'a, FlagError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = FlagError;
    type IntoIter = vec::IntoIter<FlagError>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}
