//! `X` / `X-min` / `X-max` range triplets.
//!
//! A triplet is reconciled after every per-flag pipeline has succeeded:
//!
//! 1. when both bounds hold values, `X-min` must not exceed `X-max`;
//! 2. a user-supplied `X` cannot be combined with either bound;
//! 3. missing bounds are filled: `X` alone sets both, a lone `X-min` gets an
//!    unbounded maximum, and a lone `X-max` gets a zero minimum;
//! 4. a filled pair must still be ordered, so a negative lone `X-max` fails.

use std::fmt;

use crate::builders::FlagBuilder;
use crate::{ByteQuantity, FlagError, FlagRegistry, FlagResult, FlagType, ResolvedFlags};

/// Types that can back a range triplet.
pub trait RangeValue: FlagType + Copy + PartialOrd + fmt::Debug + 'static {
    /// Minimum filled in when only `X-max` is given.
    const LOWER: Self;
    /// Maximum filled in when only `X-min` is given.
    const UPPER: Self;

    /// Starts the single-flag builder used for each member of a triplet.
    fn flag_builder(registry: &mut FlagRegistry, name: String) -> FlagBuilder<'_, Self>;
}

impl RangeValue for i64 {
    const LOWER: Self = 0;
    const UPPER: Self = Self::MAX;

    fn flag_builder(registry: &mut FlagRegistry, name: String) -> FlagBuilder<'_, Self> {
        registry.int(name)
    }
}

impl RangeValue for i32 {
    const LOWER: Self = 0;
    const UPPER: Self = Self::MAX;

    fn flag_builder(registry: &mut FlagRegistry, name: String) -> FlagBuilder<'_, Self> {
        registry.int32(name)
    }
}

impl RangeValue for f64 {
    const LOWER: Self = 0.0;
    const UPPER: Self = Self::MAX;

    fn flag_builder(registry: &mut FlagRegistry, name: String) -> FlagBuilder<'_, Self> {
        registry.float(name)
    }
}

impl RangeValue for ByteQuantity {
    const LOWER: Self = Self::ZERO;
    const UPPER: Self = Self::MAX;

    fn flag_builder(registry: &mut FlagRegistry, name: String) -> FlagBuilder<'_, Self> {
        registry.byte_quantity(name)
    }
}

type Reconcile = fn(&RangeSpec, &mut ResolvedFlags) -> FlagResult<()>;

/// Names of one registered triplet and the reconciler for its value type.
pub(crate) struct RangeSpec {
    base: String,
    min: String,
    max: String,
    reconcile: Reconcile,
}

impl RangeSpec {
    pub(crate) fn new<T: RangeValue>(base: String, min: String, max: String) -> Self {
        Self {
            base,
            min,
            max,
            reconcile: reconcile::<T>,
        }
    }

    pub(crate) fn reconcile(&self, resolved: &mut ResolvedFlags) -> FlagResult<()> {
        (self.reconcile)(self, resolved)
    }

    fn order_error(&self) -> FlagError {
        FlagError::RangeOrder {
            min_flag: self.min.clone(),
            max_flag: self.max.clone(),
        }
    }
}

impl fmt::Debug for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSpec")
            .field("base", &self.base)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

fn typed<T: RangeValue>(resolved: &ResolvedFlags, name: &str) -> Option<T> {
    resolved.value(name).and_then(T::from_value).copied()
}

fn reconcile<T: RangeValue>(range: &RangeSpec, resolved: &mut ResolvedFlags) -> FlagResult<()> {
    let base = typed::<T>(resolved, &range.base);
    let min = typed::<T>(resolved, &range.min);
    let max = typed::<T>(resolved, &range.max);

    if let (Some(lower), Some(upper)) = (min, max)
        && lower > upper
    {
        return Err(range.order_error());
    }
    if (min.is_some() || max.is_some()) && resolved.is_set(&range.base) {
        return Err(FlagError::RangeConflict {
            flag: range.base.clone(),
            min_flag: range.min.clone(),
            max_flag: range.max.clone(),
        });
    }

    match (base, min, max) {
        (Some(value), None, None) => {
            tracing::debug!(flag = %range.base, ?value, "range bounds set from base flag");
            resolved.set_derived(&range.min, value.into_value());
            resolved.set_derived(&range.max, value.into_value());
        }
        (_, Some(lower), None) => {
            if lower > T::UPPER {
                return Err(range.order_error());
            }
            tracing::debug!(flag = %range.max, "range maximum left unbounded");
            resolved.set_derived(&range.max, T::UPPER.into_value());
        }
        (_, None, Some(upper)) => {
            if T::LOWER > upper {
                return Err(range.order_error());
            }
            tracing::debug!(flag = %range.min, "range minimum set to zero");
            resolved.set_derived(&range.min, T::LOWER.into_value());
        }
        _ => {}
    }
    Ok(())
}
