//! Parsing for `<int>:<int>` ratio values such as `1:2`.

use thiserror::Error;

/// Errors raised while parsing a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RatioError {
    /// The input is not two digit runs separated by `:`.
    #[error("a valid example is 1:2")]
    Malformed,
    /// One side is too large to be a ratio component.
    #[error("ratio values must be integers; a valid example is 1:2")]
    OutOfRange,
    /// The first component is zero, so the ratio is undefined.
    #[error("the first ratio value must be greater than zero; a valid example is 1:2")]
    ZeroFirstComponent,
}

/// Parses `first:second` and returns `second / first`.
///
/// # Errors
///
/// Returns [`RatioError`] when the grammar does not match, when either side
/// exceeds `u32::MAX`, or when the first component is zero.
///
/// # Examples
///
/// ```
/// use typed_flags::ratio::parse_ratio;
///
/// assert_eq!(parse_ratio("1:2"), Ok(2.0));
/// assert_eq!(parse_ratio("2:1"), Ok(0.5));
/// assert!(parse_ratio("1-2").is_err());
/// ```
pub fn parse_ratio(input: &str) -> Result<f64, RatioError> {
    let (first, second) = input.split_once(':').ok_or(RatioError::Malformed)?;
    if !is_digits(first) || !is_digits(second) {
        return Err(RatioError::Malformed);
    }
    let first_value: u32 = first.parse().map_err(|_| RatioError::OutOfRange)?;
    let second_value: u32 = second.parse().map_err(|_| RatioError::OutOfRange)?;
    if first_value == 0 {
        return Err(RatioError::ZeroFirstComponent);
    }
    Ok(divide(second_value, first_value))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

#[expect(clippy::float_arithmetic, reason = "a ratio is a floating-point factor")]
fn divide(numerator: u32, denominator: u32) -> f64 {
    f64::from(numerator) / f64::from(denominator)
}
