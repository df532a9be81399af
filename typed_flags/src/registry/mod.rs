//! The flag registry: registration, parsing, and resolution.
//!
//! A [`FlagRegistry`] owns every flag spec and range triplet. Parsing builds a
//! clap [`Command`] from the specs, runs each flag's pipeline, reconciles the
//! range triplets, and hands back a [`ResolvedFlags`].

use std::ffi::OsString;

use clap::Command;

use crate::range::RangeSpec;
use crate::{FlagError, FlagResult};

mod resolved;
mod spec;

pub use resolved::{FlagSource, FlagState, ResolvedFlags};
pub(crate) use spec::{FlagSpec, RawKind};
pub use spec::FlagGroup;

#[cfg(test)]
mod tests;

const RESERVED_NAMES: [&str; 2] = ["help", "version"];
const RESERVED_SHORTS: [char; 2] = ['h', 'V'];

/// Registry of typed flags for one command.
///
/// # Examples
///
/// ```
/// use typed_flags::{ByteQuantity, FlagRegistry};
///
/// # fn main() -> typed_flags::FlagResult<()> {
/// let mut registry = FlagRegistry::new("selector").about("Filter instance types");
/// let memory = registry
///     .byte_quantity_range("memory")
///     .short('m')
///     .help("Amount of memory available")
///     .register()?;
///
/// let resolved = registry.parse_from(["selector", "--memory-min", "4gb"])?;
/// assert_eq!(
///     resolved.range(&memory),
///     Some((ByteQuantity::from_bytes(4 << 30), ByteQuantity::MAX))
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FlagRegistry {
    name: String,
    about: Option<String>,
    version: Option<String>,
    env_prefix: Option<String>,
    specs: Vec<FlagSpec>,
    ranges: Vec<RangeSpec>,
}

impl FlagRegistry {
    /// Creates an empty registry for the command `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            version: None,
            env_prefix: None,
            specs: Vec::new(),
            ranges: Vec::new(),
        }
    }

    /// Sets the description shown at the top of `--help`.
    #[must_use]
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Sets the version and enables `--version`.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Makes every flag also read `<prefix><NAME>` from the environment, with
    /// the name upper-cased and `-` replaced by `_`.
    ///
    /// Command-line values take precedence over the environment.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Long names of every registered flag, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.name.as_str())
    }

    /// Builds the clap command for the registered flags.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.name.clone()).args_override_self(true);
        if let Some(about) = &self.about {
            command = command.about(about.clone());
        }
        if let Some(version) = &self.version {
            command = command.version(version.clone());
        }
        let prefix = self.env_prefix.as_deref();
        command.args(self.specs.iter().map(|spec| spec.to_arg(prefix)))
    }

    /// Parses the process arguments.
    ///
    /// # Errors
    ///
    /// See [`FlagRegistry::parse_from`].
    pub fn try_parse(&self) -> FlagResult<ResolvedFlags> {
        self.parse_from(std::env::args_os())
    }

    /// Parses `args`, whose first item is the binary name.
    ///
    /// Every flag's pipeline runs, in registration order. When any of them
    /// fails the errors are returned together and range reconciliation is
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::CliParsing`] when clap rejects the arguments or
    /// displays help, the pipeline or range error when exactly one flag
    /// fails, and [`FlagError::Aggregate`] when several do.
    pub fn parse_from<I, T>(&self, args: I) -> FlagResult<ResolvedFlags>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        tracing::debug!(command = %self.name, flags = self.specs.len(), "parsing flags");
        let matches = self.command().try_get_matches_from(args)?;

        let mut resolved = ResolvedFlags::default();
        let mut failures = Vec::new();
        for spec in &self.specs {
            match spec.resolve(&matches) {
                Ok(state) => resolved.push(state),
                Err(err) => failures.push(err),
            }
        }
        if let Some(err) = FlagError::try_aggregate(failures) {
            return Err(err);
        }

        let conflicts: Vec<FlagError> = self
            .ranges
            .iter()
            .filter_map(|range| range.reconcile(&mut resolved).err())
            .collect();
        if let Some(err) = FlagError::try_aggregate(conflicts) {
            return Err(err);
        }

        tracing::debug!(command = %self.name, "flags resolved");
        Ok(resolved)
    }

    /// Rejects `name` and `short` unless both are free and well formed.
    pub(crate) fn check_available(&self, name: &str, short: Option<char>) -> FlagResult<()> {
        let refuse = |reason: String| Err(FlagError::registration(name, reason));
        if name.is_empty() {
            return refuse("the name is empty".to_owned());
        }
        if name.starts_with('-') {
            return refuse("names are given without leading dashes".to_owned());
        }
        if name.chars().any(|c| c.is_whitespace() || c == '=') {
            return refuse("names cannot contain whitespace or '='".to_owned());
        }
        if RESERVED_NAMES.contains(&name) {
            return refuse("the name is reserved".to_owned());
        }
        if self.specs.iter().any(|spec| spec.name == name) {
            return refuse("the name is already registered".to_owned());
        }
        let Some(short) = short else {
            return Ok(());
        };
        if !short.is_ascii_alphanumeric() {
            return refuse(format!("-{short} is not a valid shorthand"));
        }
        if RESERVED_SHORTS.contains(&short) {
            return refuse(format!("-{short} is reserved"));
        }
        if self.specs.iter().any(|spec| spec.short == Some(short)) {
            return refuse(format!("-{short} is already registered"));
        }
        Ok(())
    }

    pub(crate) fn insert(&mut self, spec: FlagSpec) -> FlagResult<()> {
        self.check_available(&spec.name, spec.short)?;
        tracing::debug!(
            flag = %spec.name,
            raw = ?spec.raw,
            group = ?spec.group,
            has_default = spec.default.is_some(),
            "registered flag"
        );
        self.specs.push(spec);
        Ok(())
    }

    pub(crate) fn push_range(&mut self, range: RangeSpec) {
        self.ranges.push(range);
    }
}
