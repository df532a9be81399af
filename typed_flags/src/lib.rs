//! Typed command-line flags with processing, validation, and range
//! reconciliation.
//!
//! Flags are declared on a [`FlagRegistry`] through typed builders. Each
//! registration returns a [`Flag<T>`] handle, and parsing produces a
//! [`ResolvedFlags`] from which values are read back with their Rust type:
//!
//! ```
//! use typed_flags::{ByteQuantity, FlagRegistry};
//!
//! # fn main() -> typed_flags::FlagResult<()> {
//! let mut registry = FlagRegistry::new("selector");
//! let vcpus = registry.int_range("vcpus").short('c').register()?;
//! let arch = registry
//!     .string_options("cpu-architecture", ["x86_64", "arm64"])
//!     .register()?;
//! let memory = registry.byte_quantity("memory").register()?;
//!
//! let resolved = registry.parse_from([
//!     "selector",
//!     "--vcpus=4",
//!     "--cpu-architecture",
//!     "ARM64",
//!     "--memory",
//!     "16gb",
//! ])?;
//! assert_eq!(resolved.range(&vcpus), Some((4, 4)));
//! assert_eq!(resolved.get(&arch).map(String::as_str), Some("ARM64"));
//! assert_eq!(resolved.get(&memory), ByteQuantity::from_gib(16).as_ref());
//! # Ok(())
//! # }
//! ```
//!
//! After parsing, every flag runs through its processor and validators in
//! registration order. Range triplets are reconciled only once every flag
//! has resolved cleanly. Failures are reported as [`FlagError`], with several
//! failures combined into [`FlagError::Aggregate`].

pub mod byte_quantity;
mod builders;
mod error;
mod handle;
pub mod path;
pub mod pipeline;
mod range;
pub mod ratio;
mod registry;
mod value;

pub use builders::{FlagBuilder, RangeBuilder};
pub use byte_quantity::{ByteQuantity, ByteQuantityError};
pub use error::{AggregatedErrors, FlagError, is_display_request};
pub use handle::{Flag, RangeFlags};
pub use range::RangeValue;
pub use registry::{FlagGroup, FlagRegistry, FlagSource, FlagState, ResolvedFlags};
pub use value::{FlagType, FlagValue, ValueKind};

/// Result type for flag registration and resolution.
pub type FlagResult<T> = Result<T, FlagError>;
