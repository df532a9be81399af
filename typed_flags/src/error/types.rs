//! Primary error enum for flag registration and resolution.

use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::ValueKind;

/// Errors raised while registering, parsing, or resolving flags.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// The underlying parser rejected the arguments, or displayed help.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// The raw input does not match the grammar the flag expects.
    #[error("invalid input for --{flag}: {message}")]
    MalformedValue {
        /// Flag whose input was rejected.
        flag: String,
        /// What was wrong with the input.
        message: String,
    },

    /// A pipeline stage received a value of a kind it cannot handle.
    ///
    /// This signals a registration mistake rather than bad user input.
    #[error("invalid input for --{flag}: {found} input is unsupported, expected {expected}")]
    UnsupportedInputType {
        /// Flag whose pipeline failed.
        flag: String,
        /// Kind the stage expected.
        expected: ValueKind,
        /// Kind the stage received.
        found: ValueKind,
    },

    /// Both bounds of a range were supplied and the minimum exceeds the maximum.
    #[error(
        "invalid input for --{min_flag} and --{max_flag}: {min_flag} must be less than or equal to {max_flag}"
    )]
    RangeOrder {
        /// Name of the `X-min` flag.
        min_flag: String,
        /// Name of the `X-max` flag.
        max_flag: String,
    },

    /// The base flag of a range was combined with one of its bounds.
    #[error("--{min_flag} and --{max_flag} cannot be set at the same time as --{flag}")]
    RangeConflict {
        /// Name of the base `X` flag.
        flag: String,
        /// Name of the `X-min` flag.
        min_flag: String,
        /// Name of the `X-max` flag.
        max_flag: String,
    },

    /// The value is not in the flag's allow-list.
    #[error("--{flag} must be one of: {}", allowed.join(", "))]
    NotAllowed {
        /// Flag whose value was rejected.
        flag: String,
        /// Value supplied by the user.
        value: String,
        /// Accepted values, in declaration order.
        allowed: Vec<String>,
    },

    /// A flag could not be added to the registry.
    #[error("cannot register --{flag}: {reason}")]
    Registration {
        /// Name passed to the builder.
        flag: String,
        /// Why the registration was refused.
        reason: String,
    },

    /// Several flags failed during one resolution pass.
    #[error("multiple flag errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
