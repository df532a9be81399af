//! Byte-size quantities such as `16gb` or `512 MiB`.
//!
//! A [`ByteQuantity`] stores a whole number of bytes. Unit suffixes use binary
//! multiples, so `1gb` and `1gib` both denote 2^30 bytes, and a bare number is
//! read as gibibytes. Up to three fractional digits are accepted; the result
//! is rounded half up to a whole byte, except that a plain byte count cannot
//! carry a fraction.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;
const TIB: u64 = 1 << 40;

#[expect(clippy::expect_used, reason = "the pattern is a literal")]
static QUANTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)(?:\.([0-9]{0,3}))?\s?([a-z]+)?$").expect("valid byte quantity pattern")
});

/// Errors raised while parsing a [`ByteQuantity`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ByteQuantityError {
    /// The input does not match `<digits>[.<digits>][ ]<unit>`.
    #[error("{input} is not a valid byte quantity")]
    Malformed {
        /// Text supplied by the caller.
        input: String,
    },
    /// The unit suffix is not one of the recognised abbreviations.
    #[error("unit {unit} is not supported")]
    UnsupportedUnit {
        /// Unit suffix after normalisation.
        unit: String,
    },
    /// A count in plain bytes carries a non-zero fraction.
    #[error("{input} does not resolve to a whole number of bytes")]
    FractionalBytes {
        /// Text supplied by the caller.
        input: String,
    },
    /// The quantity does not fit in 64 bits.
    #[error("{input} is too large")]
    Overflow {
        /// Text supplied by the caller.
        input: String,
    },
}

/// A non-negative number of bytes.
///
/// Quantities compare by their byte count and render as gibibytes.
///
/// # Examples
///
/// ```
/// use typed_flags::ByteQuantity;
///
/// let memory: ByteQuantity = "16gb".parse()?;
/// assert_eq!(memory.to_string(), "16.000 GiB");
/// assert_eq!(memory, "16384 MiB".parse()?);
/// # Ok::<(), typed_flags::ByteQuantityError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteQuantity {
    bytes: u64,
}

impl ByteQuantity {
    /// The empty quantity.
    pub const ZERO: Self = Self { bytes: 0 };

    /// The largest representable quantity.
    pub const MAX: Self = Self { bytes: u64::MAX };

    /// Wraps an exact byte count.
    #[must_use]
    pub const fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    /// Builds a quantity of `mib` mebibytes, or `None` on overflow.
    #[must_use]
    pub const fn from_mib(mib: u64) -> Option<Self> {
        Self::scaled(mib, MIB)
    }

    /// Builds a quantity of `gib` gibibytes, or `None` on overflow.
    #[must_use]
    pub const fn from_gib(gib: u64) -> Option<Self> {
        Self::scaled(gib, GIB)
    }

    /// Builds a quantity of `tib` tebibytes, or `None` on overflow.
    #[must_use]
    pub const fn from_tib(tib: u64) -> Option<Self> {
        Self::scaled(tib, TIB)
    }

    const fn scaled(count: u64, unit: u64) -> Option<Self> {
        match count.checked_mul(unit) {
            Some(bytes) => Some(Self { bytes }),
            None => None,
        }
    }

    /// Exact byte count.
    #[must_use]
    pub const fn bytes(self) -> u64 {
        self.bytes
    }

    /// Size in mebibytes.
    #[must_use]
    pub fn mib(self) -> f64 {
        self.in_unit(MIB)
    }

    /// Size in gibibytes.
    #[must_use]
    pub fn gib(self) -> f64 {
        self.in_unit(GIB)
    }

    /// Size in tebibytes.
    #[must_use]
    pub fn tib(self) -> f64 {
        self.in_unit(TIB)
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "fractional unit views are for display and reporting only"
    )]
    fn in_unit(self, unit: u64) -> f64 {
        self.bytes as f64 / unit as f64
    }

    /// Renders the quantity as whole mebibytes, e.g. `512 MiB`.
    #[must_use]
    pub fn format_mib(self) -> String {
        format!("{} MiB", rounded(self.bytes, MIB))
    }

    /// Renders the quantity as gibibytes with three decimals, e.g. `16.000 GiB`.
    #[must_use]
    pub fn format_gib(self) -> String {
        self.to_string()
    }

    /// Renders the quantity as tebibytes with three decimals, e.g. `1.500 TiB`.
    #[must_use]
    pub fn format_tib(self) -> String {
        let (whole, thousandths) = three_decimals(self.bytes, TIB);
        format!("{whole}.{thousandths:03} TiB")
    }

    /// Parses a human byte quantity such as `16gb`, `512 MiB`, or `1.5t`.
    ///
    /// # Errors
    ///
    /// Returns a [`ByteQuantityError`] when the text is malformed, names an
    /// unknown unit, leaves a fractional byte, or overflows 64 bits.
    pub fn parse(input: &str) -> Result<Self, ByteQuantityError> {
        let normalised = input.trim().to_ascii_lowercase();
        let captures = QUANTITY_PATTERN
            .captures(&normalised)
            .ok_or_else(|| ByteQuantityError::Malformed {
                input: input.to_owned(),
            })?;
        let whole = captures.get(1).map_or("", |m| m.as_str());
        let fraction = captures.get(2).map_or("", |m| m.as_str());
        let unit = captures.get(3).map_or("gib", |m| m.as_str());

        let multiplier = unit_multiplier(unit).ok_or_else(|| ByteQuantityError::UnsupportedUnit {
            unit: unit.to_owned(),
        })?;
        let overflow = || ByteQuantityError::Overflow {
            input: input.to_owned(),
        };
        let whole_bytes = whole
            .parse::<u64>()
            .ok()
            .and_then(|count| count.checked_mul(multiplier))
            .ok_or_else(overflow)?;
        let fraction_bytes =
            fraction_bytes(fraction, multiplier).ok_or_else(|| ByteQuantityError::FractionalBytes {
                input: input.to_owned(),
            })?;
        whole_bytes
            .checked_add(fraction_bytes)
            .map(Self::from_bytes)
            .ok_or_else(overflow)
    }
}

fn unit_multiplier(unit: &str) -> Option<u64> {
    match unit {
        "b" | "byte" | "bytes" => Some(1),
        "k" | "kb" | "kib" => Some(KIB),
        "m" | "mb" | "mib" => Some(MIB),
        "g" | "gb" | "gib" => Some(GIB),
        "t" | "tb" | "tib" => Some(TIB),
        _ => None,
    }
}

/// Bytes contributed by up to three fractional digits of `multiplier`,
/// rounded half up. `None` when a plain byte count has a non-zero fraction.
fn fraction_bytes(fraction: &str, multiplier: u64) -> Option<u64> {
    if fraction.is_empty() {
        return Some(0);
    }
    let scale = 10_u64.checked_pow(u32::try_from(fraction.len()).ok()?)?;
    let scaled = fraction.parse::<u64>().ok()?.checked_mul(multiplier)?;
    if multiplier == 1 && scaled.checked_rem(scale)? != 0 {
        return None;
    }
    scaled.checked_add(scale.checked_div(2)?)?.checked_div(scale)
}

#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "fixed-point rendering rounds half up on whole byte counts"
)]
fn three_decimals(bytes: u64, unit: u64) -> (u128, u128) {
    let unit_wide = u128::from(unit);
    let thousandths = (u128::from(bytes) * 1000 + unit_wide / 2) / unit_wide;
    (thousandths / 1000, thousandths % 1000)
}

#[expect(
    clippy::integer_division,
    reason = "whole-unit rendering rounds half up"
)]
fn rounded(bytes: u64, unit: u64) -> u128 {
    let unit_wide = u128::from(unit);
    (u128::from(bytes) + unit_wide / 2) / unit_wide
}

impl fmt::Display for ByteQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, thousandths) = three_decimals(self.bytes, GIB);
        write!(f, "{whole}.{thousandths:03} GiB")
    }
}

impl FromStr for ByteQuantity {
    type Err = ByteQuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
