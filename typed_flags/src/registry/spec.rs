//! Per-flag registration records and their clap arguments.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, value_parser};

use super::resolved::{FlagSource, FlagState};
use crate::pipeline::Pipeline;
use crate::{FlagError, FlagResult, FlagValue};

/// Help-output grouping of a flag.
///
/// Grouping never changes how a flag parses or validates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FlagGroup {
    /// Ordinary filter flags, listed under the default options heading.
    #[default]
    Primary,
    /// Persistent settings shared by every command, listed as global flags.
    Config,
    /// Flags that apply to aggregate filters, listed as suite flags.
    Suite,
}

impl FlagGroup {
    const fn heading(self) -> Option<&'static str> {
        match self {
            Self::Primary => None,
            Self::Config => Some("Global Flags"),
            Self::Suite => Some("Suite Flags"),
        }
    }
}

/// Primitive the parser reads for a flag before its pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawKind {
    Bool,
    Int,
    Int32,
    Float,
    Text,
    List,
}

#[derive(Debug)]
pub(crate) struct FlagSpec {
    pub(crate) name: String,
    pub(crate) short: Option<char>,
    pub(crate) help: Option<String>,
    pub(crate) group: FlagGroup,
    pub(crate) raw: RawKind,
    pub(crate) default: Option<FlagValue>,
    pub(crate) pipeline: Pipeline,
}

impl FlagSpec {
    pub(crate) fn new(name: String, raw: RawKind) -> Self {
        Self {
            name,
            short: None,
            help: None,
            group: FlagGroup::Primary,
            raw,
            default: None,
            pipeline: Pipeline::default(),
        }
    }

    /// Environment variable read for this flag under `prefix`.
    pub(crate) fn env_var(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.name.to_ascii_uppercase().replace('-', "_"))
    }

    fn help_text(&self) -> Option<String> {
        match (&self.help, &self.default) {
            (Some(help), Some(default)) => Some(format!("{help} [default: {default}]")),
            (None, Some(default)) => Some(format!("[default: {default}]")),
            (help, None) => help.clone(),
        }
    }

    /// Builds the clap argument. No clap-level default is set, so a value
    /// source reported by clap always means the user supplied the value.
    pub(crate) fn to_arg(&self, env_prefix: Option<&str>) -> Arg {
        let mut arg = Arg::new(self.name.clone()).long(self.name.clone());
        arg = match self.raw {
            RawKind::Bool => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(value_parser!(bool)),
            RawKind::Int => arg
                .action(ArgAction::Set)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
            RawKind::Int32 => arg
                .action(ArgAction::Set)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32)),
            RawKind::Float => arg
                .action(ArgAction::Set)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64)),
            RawKind::Text => arg
                .action(ArgAction::Set)
                .value_parser(value_parser!(String)),
            RawKind::List => arg
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_parser(value_parser!(String)),
        };
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if let Some(help) = self.help_text() {
            arg = arg.help(help);
        }
        if let Some(heading) = self.group.heading() {
            arg = arg.help_heading(heading);
        }
        if self.group == FlagGroup::Config {
            arg = arg.global(true);
        }
        if let Some(prefix) = env_prefix {
            arg = arg.env(self.env_var(prefix));
        }
        arg
    }

    /// Reads the flag from `matches`, falls back to its default, and runs the
    /// pipeline over whatever value results.
    pub(crate) fn resolve(&self, matches: &ArgMatches) -> FlagResult<FlagState> {
        let supplied = self.read_raw(matches)?;
        let (raw, source) = match supplied {
            Some(value) => (Some(value), source_of(matches.value_source(&self.name))),
            None => match &self.default {
                Some(default) => (Some(default.clone()), FlagSource::Default),
                None => (None, FlagSource::Unset),
            },
        };
        let value = raw
            .map(|input| self.pipeline.run(&self.name, input))
            .transpose()?;
        Ok(FlagState::new(
            self.name.clone(),
            value,
            source,
            self.default.is_none(),
        ))
    }

    fn read_raw(&self, matches: &ArgMatches) -> FlagResult<Option<FlagValue>> {
        let name = self.name.as_str();
        let read = match self.raw {
            RawKind::Bool => matches
                .try_get_one::<bool>(name)
                .map(|value| value.copied().map(FlagValue::Bool)),
            RawKind::Int => matches
                .try_get_one::<i64>(name)
                .map(|value| value.copied().map(FlagValue::Int)),
            RawKind::Int32 => matches
                .try_get_one::<i32>(name)
                .map(|value| value.copied().map(FlagValue::Int32)),
            RawKind::Float => matches
                .try_get_one::<f64>(name)
                .map(|value| value.copied().map(FlagValue::Float)),
            RawKind::Text => matches
                .try_get_one::<String>(name)
                .map(|value| value.cloned().map(FlagValue::Text)),
            RawKind::List => matches
                .try_get_many::<String>(name)
                .map(|values| values.map(|items| FlagValue::List(items.cloned().collect()))),
        };
        read.map_err(|err| FlagError::malformed(name, err.to_string()))
    }
}

const fn source_of(source: Option<ValueSource>) -> FlagSource {
    match source {
        Some(ValueSource::CommandLine) => FlagSource::CommandLine,
        Some(ValueSource::EnvVariable) => FlagSource::Environment,
        _ => FlagSource::Default,
    }
}
