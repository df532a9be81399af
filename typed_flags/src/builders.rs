//! Typed flag builders.
//!
//! Each builder method on [`FlagRegistry`] starts a [`FlagBuilder`] for one
//! semantic type. The builder picks the primitive clap reads and attaches the
//! processor and validators that turn that primitive into the final value.

use std::marker::PhantomData;

use camino::Utf8PathBuf;
use regex::Regex;

use crate::pipeline::{
    Processor, Validator, byte_quantity_processor, expect_kind, not_nan, one_of, path_processor,
    ratio_processor, regex_processor,
};
use crate::range::{RangeSpec, RangeValue};
use crate::registry::{FlagSpec, RawKind};
use crate::{ByteQuantity, Flag, FlagGroup, FlagRegistry, FlagResult, FlagType, RangeFlags};

/// Configures one flag before it is registered.
///
/// Nothing is added to the registry until [`FlagBuilder::register`] is
/// called.
#[must_use = "a flag is only added by calling `register`"]
pub struct FlagBuilder<'r, T> {
    registry: &'r mut FlagRegistry,
    spec: FlagSpec,
    marker: PhantomData<fn() -> T>,
}

impl<'r, T: FlagType> FlagBuilder<'r, T> {
    fn new(registry: &'r mut FlagRegistry, name: String, raw: RawKind) -> Self {
        Self {
            registry,
            spec: FlagSpec::new(name, raw),
            marker: PhantomData,
        }
    }

    fn processor(mut self, processor: impl Processor + 'static) -> Self {
        self.spec.pipeline.set_processor(Box::new(processor));
        self
    }

    /// Sets the one-character shorthand, used as `-c`.
    pub const fn short(mut self, short: char) -> Self {
        self.spec.short = Some(short);
        self
    }

    /// Sets the help text.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.spec.help = Some(help.into());
        self
    }

    /// Sets the value used when the flag is not supplied.
    ///
    /// Without a default the flag resolves to `None` and is reported as
    /// default-unset.
    pub fn default_value(mut self, value: T) -> Self {
        self.spec.default = Some(value.into_value());
        self
    }

    /// Places the flag in `group`.
    pub const fn group(mut self, group: FlagGroup) -> Self {
        self.spec.group = group;
        self
    }

    /// Shorthand for [`FlagGroup::Config`].
    pub const fn config(self) -> Self {
        self.group(FlagGroup::Config)
    }

    /// Shorthand for [`FlagGroup::Suite`].
    pub const fn suite(self) -> Self {
        self.group(FlagGroup::Suite)
    }

    /// Appends a validator that runs after the built-in stages.
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.spec.pipeline.push_validator(Box::new(validator));
        self
    }

    /// Adds the flag to the registry.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Registration`](crate::FlagError::Registration)
    /// when the name or shorthand is malformed, reserved, or already taken.
    pub fn register(self) -> FlagResult<Flag<T>> {
        let name = self.spec.name.clone();
        self.registry.insert(self.spec)?;
        Ok(Flag::new(name))
    }
}

/// Configures an `X` / `X-min` / `X-max` triplet before it is registered.
///
/// The shorthand and default apply to the base flag only; the bounds never
/// have defaults.
#[must_use = "a range is only added by calling `register`"]
pub struct RangeBuilder<'r, T> {
    registry: &'r mut FlagRegistry,
    name: String,
    short: Option<char>,
    help: String,
    default: Option<T>,
    group: FlagGroup,
}

impl<'r, T: RangeValue> RangeBuilder<'r, T> {
    fn new(registry: &'r mut FlagRegistry, name: String) -> Self {
        Self {
            registry,
            name,
            short: None,
            help: String::new(),
            default: None,
            group: FlagGroup::Primary,
        }
    }

    /// Sets the shorthand of the base flag.
    pub const fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the description shared by all three flags.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Sets the default of the base flag.
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Places all three flags in `group`.
    pub const fn group(mut self, group: FlagGroup) -> Self {
        self.group = group;
        self
    }

    /// Shorthand for [`FlagGroup::Config`].
    pub const fn config(self) -> Self {
        self.group(FlagGroup::Config)
    }

    /// Shorthand for [`FlagGroup::Suite`].
    pub const fn suite(self) -> Self {
        self.group(FlagGroup::Suite)
    }

    /// Adds the three flags and their reconciliation to the registry.
    ///
    /// All three names are checked before any is added, so a failure leaves
    /// the registry unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Registration`](crate::FlagError::Registration)
    /// when any of the three names, or the shorthand, is unusable.
    pub fn register(self) -> FlagResult<RangeFlags<T>> {
        let Self {
            registry,
            name,
            short,
            help,
            default,
            group,
        } = self;
        let min_name = format!("{name}-min");
        let max_name = format!("{name}-max");
        registry.check_available(&name, short)?;
        registry.check_available(&min_name, None)?;
        registry.check_available(&max_name, None)?;

        let mut base_builder = T::flag_builder(registry, name.clone())
            .help(describe(
                &help,
                &format!("(sets --{name}-min and -max to the same value)"),
            ))
            .group(group);
        if let Some(letter) = short {
            base_builder = base_builder.short(letter);
        }
        if let Some(value) = default {
            base_builder = base_builder.default_value(value);
        }
        let base = base_builder.register()?;
        let min = T::flag_builder(registry, min_name.clone())
            .help(describe(
                &format!("Minimum {help}"),
                &format!("If --{name}-max is not specified, the upper bound will be infinity"),
            ))
            .group(group)
            .register()?;
        let max = T::flag_builder(registry, max_name.clone())
            .help(describe(
                &format!("Maximum {help}"),
                &format!("If --{name}-min is not specified, the lower bound will be 0"),
            ))
            .group(group)
            .register()?;

        registry.push_range(RangeSpec::new::<T>(name, min_name, max_name));
        Ok(RangeFlags::new(base, min, max))
    }
}

fn describe(help: &str, suffix: &str) -> String {
    let lead = help.trim_end();
    if lead.is_empty() {
        suffix.to_owned()
    } else {
        format!("{lead} {suffix}")
    }
}

impl FlagRegistry {
    /// A boolean switch: `--name` means true, `--name=false` is explicit.
    pub fn bool(&mut self, name: impl Into<String>) -> FlagBuilder<'_, bool> {
        FlagBuilder::new(self, name.into(), RawKind::Bool)
    }

    /// A 64-bit integer; negative values are accepted.
    pub fn int(&mut self, name: impl Into<String>) -> FlagBuilder<'_, i64> {
        FlagBuilder::new(self, name.into(), RawKind::Int)
    }

    /// A 32-bit integer; negative values are accepted.
    pub fn int32(&mut self, name: impl Into<String>) -> FlagBuilder<'_, i32> {
        FlagBuilder::new(self, name.into(), RawKind::Int32)
    }

    /// A float; `NaN` is rejected.
    pub fn float(&mut self, name: impl Into<String>) -> FlagBuilder<'_, f64> {
        FlagBuilder::new(self, name.into(), RawKind::Float).validator(not_nan())
    }

    /// Free text.
    pub fn string(&mut self, name: impl Into<String>) -> FlagBuilder<'_, String> {
        FlagBuilder::new(self, name.into(), RawKind::Text)
    }

    /// A list of strings. Each occurrence is split on `,` and repeated
    /// occurrences append.
    pub fn string_list(&mut self, name: impl Into<String>) -> FlagBuilder<'_, Vec<String>> {
        FlagBuilder::new(self, name.into(), RawKind::List)
    }

    /// Text restricted to `options`, compared ignoring ASCII case.
    ///
    /// The resolved value keeps the user's spelling.
    pub fn string_options<I, S>(
        &mut self,
        name: impl Into<String>,
        options: I,
    ) -> FlagBuilder<'_, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = options.into_iter().map(Into::into).collect();
        FlagBuilder::new(self, name.into(), RawKind::Text).validator(one_of(allowed))
    }

    /// Text turned into `T` by a caller-supplied processor.
    ///
    /// The processor must produce the [`FlagValue`](crate::FlagValue) variant
    /// of `T`; anything else fails as unsupported input.
    pub fn processed_string<T: FlagType>(
        &mut self,
        name: impl Into<String>,
        processor: impl Processor + 'static,
    ) -> FlagBuilder<'_, T> {
        FlagBuilder::new(self, name.into(), RawKind::Text)
            .processor(processor)
            .validator(expect_kind(T::KIND))
    }

    /// A byte quantity such as `16gb` or `512 MiB`.
    pub fn byte_quantity(&mut self, name: impl Into<String>) -> FlagBuilder<'_, ByteQuantity> {
        self.processed_string(name, byte_quantity_processor())
    }

    /// A regular expression, compiled during resolution.
    pub fn regex(&mut self, name: impl Into<String>) -> FlagBuilder<'_, Regex> {
        self.processed_string(name, regex_processor())
    }

    /// A filesystem path; a leading `~` expands to the home directory.
    pub fn path(&mut self, name: impl Into<String>) -> FlagBuilder<'_, Utf8PathBuf> {
        FlagBuilder::new(self, name.into(), RawKind::Text).processor(path_processor())
    }

    /// A ratio `a:b`, resolved to the factor `b / a`.
    pub fn ratio(&mut self, name: impl Into<String>) -> FlagBuilder<'_, f64> {
        self.processed_string(name, ratio_processor())
    }

    /// An integer range triplet.
    pub fn int_range(&mut self, name: impl Into<String>) -> RangeBuilder<'_, i64> {
        self.range(name)
    }

    /// A 32-bit integer range triplet.
    pub fn int32_range(&mut self, name: impl Into<String>) -> RangeBuilder<'_, i32> {
        self.range(name)
    }

    /// A float range triplet.
    pub fn float_range(&mut self, name: impl Into<String>) -> RangeBuilder<'_, f64> {
        self.range(name)
    }

    /// A byte quantity range triplet.
    pub fn byte_quantity_range(
        &mut self,
        name: impl Into<String>,
    ) -> RangeBuilder<'_, ByteQuantity> {
        self.range(name)
    }

    /// A range triplet of any [`RangeValue`] type.
    pub fn range<T: RangeValue>(&mut self, name: impl Into<String>) -> RangeBuilder<'_, T> {
        RangeBuilder::new(self, name.into())
    }
}
