//! Resolved flag values.
//!
//! Every flag resolves to one [`FlagValue`] variant. The [`FlagType`] trait
//! ties each variant to its Rust type so typed handles can read values back
//! without runtime casts.

use std::fmt;

use camino::Utf8PathBuf;
use regex::Regex;

use crate::ByteQuantity;

/// A parsed or processed flag value.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum FlagValue {
    /// A boolean switch.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 32-bit signed integer.
    Int32(i32),
    /// A 64-bit float, including ratio factors.
    Float(f64),
    /// Free text, or the raw form of a string-backed flag before processing.
    Text(String),
    /// A list of strings.
    List(Vec<String>),
    /// A byte quantity.
    Bytes(ByteQuantity),
    /// A compiled regular expression.
    Regex(Regex),
    /// A filesystem path with `~` expanded.
    Path(Utf8PathBuf),
}

impl FlagValue {
    /// The variant tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Int32(_) => ValueKind::Int32,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Regex(_) => ValueKind::Regex,
            Self::Path(_) => ValueKind::Path,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::Int(value) => fmt::Display::fmt(value, f),
            Self::Int32(value) => fmt::Display::fmt(value, f),
            Self::Float(value) => fmt::Display::fmt(value, f),
            Self::Text(value) => f.write_str(value),
            Self::List(values) => f.write_str(&values.join(",")),
            Self::Bytes(value) => fmt::Display::fmt(value, f),
            Self::Regex(value) => f.write_str(value.as_str()),
            Self::Path(value) => f.write_str(value.as_str()),
        }
    }
}

/// Names the variants of [`FlagValue`] for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValueKind {
    /// [`FlagValue::Bool`].
    Bool,
    /// [`FlagValue::Int`].
    Int,
    /// [`FlagValue::Int32`].
    Int32,
    /// [`FlagValue::Float`].
    Float,
    /// [`FlagValue::Text`].
    Text,
    /// [`FlagValue::List`].
    List,
    /// [`FlagValue::Bytes`].
    Bytes,
    /// [`FlagValue::Regex`].
    Regex,
    /// [`FlagValue::Path`].
    Path,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Int32 => "32-bit integer",
            Self::Float => "float",
            Self::Text => "string",
            Self::List => "string list",
            Self::Bytes => "byte quantity",
            Self::Regex => "regular expression",
            Self::Path => "path",
        })
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Rust types a flag can resolve to.
///
/// Implemented for the payload of every [`FlagValue`] variant; the trait is
/// sealed.
pub trait FlagType: Sized + sealed::Sealed {
    /// Variant holding values of this type.
    const KIND: ValueKind;

    /// Borrows the payload when `value` is of this type.
    fn from_value(value: &FlagValue) -> Option<&Self>;

    /// Wraps `self` in its [`FlagValue`] variant.
    fn into_value(self) -> FlagValue;
}

macro_rules! flag_type {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl FlagType for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_value(value: &FlagValue) -> Option<&Self> {
                match value {
                    FlagValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn into_value(self) -> FlagValue {
                FlagValue::$variant(self)
            }
        }
    };
}

flag_type!(bool, Bool);
flag_type!(i64, Int);
flag_type!(i32, Int32);
flag_type!(f64, Float);
flag_type!(String, Text);
flag_type!(Vec<String>, List);
flag_type!(ByteQuantity, Bytes);
flag_type!(Regex, Regex);
flag_type!(Utf8PathBuf, Path);
