//! Typed handles returned by flag registration.

use std::fmt;
use std::marker::PhantomData;

/// Handle to a registered flag whose resolved value has type `T`.
///
/// Pass the handle to [`ResolvedFlags::get`](crate::ResolvedFlags::get) to
/// read the value after parsing.
pub struct Flag<T> {
    name: String,
    marker: PhantomData<fn() -> T>,
}

impl<T> Flag<T> {
    pub(crate) const fn new(name: String) -> Self {
        Self {
            name,
            marker: PhantomData,
        }
    }

    /// Long name of the flag, without leading dashes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Flag<T> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl<T> fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Flag").field(&self.name).finish()
    }
}

/// Handles for an `X`, `X-min`, `X-max` triplet.
pub struct RangeFlags<T> {
    base: Flag<T>,
    min: Flag<T>,
    max: Flag<T>,
}

impl<T> RangeFlags<T> {
    pub(crate) const fn new(base: Flag<T>, min: Flag<T>, max: Flag<T>) -> Self {
        Self { base, min, max }
    }

    /// The `X` flag that sets both bounds.
    #[must_use]
    pub const fn base(&self) -> &Flag<T> {
        &self.base
    }

    /// The `X-min` flag.
    #[must_use]
    pub const fn min(&self) -> &Flag<T> {
        &self.min
    }

    /// The `X-max` flag.
    #[must_use]
    pub const fn max(&self) -> &Flag<T> {
        &self.max
    }
}

impl<T> Clone for RangeFlags<T> {
    fn clone(&self) -> Self {
        Self::new(self.base.clone(), self.min.clone(), self.max.clone())
    }
}

impl<T> fmt::Debug for RangeFlags<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeFlags")
            .field("base", &self.base.name)
            .field("min", &self.min.name)
            .field("max", &self.max.name)
            .finish()
    }
}
