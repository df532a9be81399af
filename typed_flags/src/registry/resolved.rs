//! The outcome of a successful parse.

use std::collections::HashMap;
use std::slice;

use crate::{Flag, FlagType, FlagValue, RangeFlags, RangeValue};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FlagSource {
    /// Supplied on the command line.
    CommandLine,
    /// Read from the flag's prefixed environment variable.
    Environment,
    /// Taken from the default given at registration.
    Default,
    /// Filled in by range reconciliation from a related flag.
    Derived,
    /// Not supplied, with no default.
    Unset,
}

impl FlagSource {
    /// Whether the user supplied the value, on the command line or through
    /// the environment.
    #[must_use]
    pub const fn is_user_supplied(self) -> bool {
        matches!(self, Self::CommandLine | Self::Environment)
    }
}

/// Resolution record for one flag.
#[derive(Debug, Clone)]
pub struct FlagState {
    name: String,
    value: Option<FlagValue>,
    source: FlagSource,
    default_is_unset: bool,
}

impl FlagState {
    pub(crate) const fn new(
        name: String,
        value: Option<FlagValue>,
        source: FlagSource,
        default_is_unset: bool,
    ) -> Self {
        Self {
            name,
            value,
            source,
            default_is_unset,
        }
    }

    /// Long name of the flag.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The processed value, or `None` when the flag is unset.
    #[must_use]
    pub const fn value(&self) -> Option<&FlagValue> {
        self.value.as_ref()
    }

    /// Where the value came from.
    #[must_use]
    pub const fn source(&self) -> FlagSource {
        self.source
    }

    /// Whether the flag was registered without a default.
    #[must_use]
    pub const fn default_is_unset(&self) -> bool {
        self.default_is_unset
    }
}

/// Values of every registered flag after processing, validation, and range
/// reconciliation.
///
/// Entries keep registration order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedFlags {
    entries: Vec<FlagState>,
    index: HashMap<String, usize>,
}

impl ResolvedFlags {
    pub(crate) fn push(&mut self, state: FlagState) {
        self.index.insert(state.name.clone(), self.entries.len());
        self.entries.push(state);
    }

    /// Typed value of `flag`, or `None` when it is unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_flags::FlagRegistry;
    ///
    /// # fn main() -> typed_flags::FlagResult<()> {
    /// let mut registry = FlagRegistry::new("demo");
    /// let vcpus = registry.int("vcpus").register()?;
    /// let resolved = registry.parse_from(["demo", "--vcpus", "4"])?;
    /// assert_eq!(resolved.get(&vcpus), Some(&4));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn get<T: FlagType>(&self, flag: &Flag<T>) -> Option<&T> {
        self.value(flag.name()).and_then(T::from_value)
    }

    /// Reconciled `(min, max)` bounds of a range triplet, or `None` when the
    /// triplet is unbounded.
    #[must_use]
    pub fn range<T: RangeValue>(&self, flags: &RangeFlags<T>) -> Option<(T, T)> {
        Some((*self.get(flags.min())?, *self.get(flags.max())?))
    }

    /// Untyped value of the flag called `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FlagValue> {
        self.state(name).and_then(FlagState::value)
    }

    /// Resolution record of the flag called `name`.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<&FlagState> {
        self.index.get(name).and_then(|&at| self.entries.get(at))
    }

    /// Where the value of `name` came from, or `None` for unknown flags.
    #[must_use]
    pub fn source(&self, name: &str) -> Option<FlagSource> {
        self.state(name).map(FlagState::source)
    }

    /// Whether the user supplied `name`, on the command line or through the
    /// environment.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.source(name).is_some_and(FlagSource::is_user_supplied)
    }

    /// Whether `name` was registered without a default.
    #[must_use]
    pub fn is_default_unset(&self, name: &str) -> bool {
        self.state(name).is_some_and(FlagState::default_is_unset)
    }

    /// Iterates over every flag in registration order.
    pub fn iter(&self) -> slice::Iter<'_, FlagState> {
        self.entries.iter()
    }

    /// Number of resolved flags.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no flags were registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the value of `name` with one computed from related flags.
    pub(crate) fn set_derived(&mut self, name: &str, value: FlagValue) {
        let Some(state) = self
            .index
            .get(name)
            .copied()
            .and_then(|at| self.entries.get_mut(at))
        else {
            return;
        };
        state.value = Some(value);
        state.source = FlagSource::Derived;
    }
}

impl<'a> IntoIterator for &'a ResolvedFlags {
    type Item = &'a FlagState;
    type IntoIter = slice::Iter<'a, FlagState>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
