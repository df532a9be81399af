//! Stock processors and validators used by the registry's typed builders.

use regex::Regex;

use super::{Processor, Validator};
use crate::path::expand_home;
use crate::ratio::parse_ratio;
use crate::{ByteQuantity, FlagError, FlagValue, ValueKind};

/// Parses text into a [`ByteQuantity`]; byte quantities pass through.
#[must_use]
pub fn byte_quantity_processor() -> impl Processor {
    |flag: &str, value: FlagValue| match value {
        FlagValue::Text(text) => ByteQuantity::parse(&text)
            .map(FlagValue::Bytes)
            .map_err(|err| FlagError::malformed(flag, format!("{err}; a valid example is 16gb"))),
        bytes @ FlagValue::Bytes(_) => Ok(bytes),
        other => Err(FlagError::unsupported(flag, ValueKind::Bytes, other.kind())),
    }
}

/// Compiles text into a [`Regex`]; compiled expressions pass through.
#[must_use]
pub fn regex_processor() -> impl Processor {
    |flag: &str, value: FlagValue| match value {
        FlagValue::Text(text) => Regex::new(&text)
            .map(FlagValue::Regex)
            .map_err(|err| FlagError::malformed(flag, err.to_string())),
        regex @ FlagValue::Regex(_) => Ok(regex),
        other => Err(FlagError::unsupported(flag, ValueKind::Regex, other.kind())),
    }
}

/// Expands a leading `~` in text or path values.
#[must_use]
pub fn path_processor() -> impl Processor {
    |flag: &str, value: FlagValue| {
        let raw = match value {
            FlagValue::Text(text) => text,
            FlagValue::Path(path) => path.into_string(),
            other => return Err(FlagError::unsupported(flag, ValueKind::Path, other.kind())),
        };
        expand_home(&raw)
            .map(FlagValue::Path)
            .map_err(|err| FlagError::malformed(flag, err.to_string()))
    }
}

/// Parses `a:b` text into the factor `b / a`; floats pass through.
#[must_use]
pub fn ratio_processor() -> impl Processor {
    |flag: &str, value: FlagValue| match value {
        FlagValue::Text(text) => parse_ratio(&text)
            .map(FlagValue::Float)
            .map_err(|err| FlagError::malformed(flag, err.to_string())),
        factor @ FlagValue::Float(_) => Ok(factor),
        other => Err(FlagError::unsupported(flag, ValueKind::Float, other.kind())),
    }
}

/// Rejects values that are not of `kind`.
#[must_use]
pub fn expect_kind(kind: ValueKind) -> impl Validator {
    move |flag: &str, value: &FlagValue| {
        if value.kind() == kind {
            Ok(())
        } else {
            Err(FlagError::unsupported(flag, kind, value.kind()))
        }
    }
}

/// Accepts text matching one of `options`, ignoring ASCII case.
///
/// Non-text values are rejected as unsupported.
#[must_use]
pub fn one_of(options: Vec<String>) -> impl Validator {
    move |flag: &str, value: &FlagValue| {
        let FlagValue::Text(text) = value else {
            return Err(FlagError::unsupported(flag, ValueKind::Text, value.kind()));
        };
        if options.iter().any(|option| option.eq_ignore_ascii_case(text)) {
            Ok(())
        } else {
            Err(FlagError::NotAllowed {
                flag: flag.to_owned(),
                value: text.clone(),
                allowed: options.clone(),
            })
        }
    }
}

/// Rejects `NaN` floats.
#[must_use]
pub fn not_nan() -> impl Validator {
    |flag: &str, value: &FlagValue| match value {
        FlagValue::Float(f) if f.is_nan() => Err(FlagError::malformed(flag, "NaN is not a number")),
        _ => Ok(()),
    }
}
