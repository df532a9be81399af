//! Unit tests for registration checks and flag resolution.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};

use super::*;
use crate::FlagValue;

#[fixture]
fn registry() -> FlagRegistry {
    FlagRegistry::new("demo")
}

#[rstest]
#[case("", "the name is empty")]
#[case("-vcpus", "names are given without leading dashes")]
#[case("gpu memory", "names cannot contain whitespace or '='")]
#[case("a=b", "names cannot contain whitespace or '='")]
#[case("help", "the name is reserved")]
#[case("version", "the name is reserved")]
fn rejects_malformed_names(
    mut registry: FlagRegistry,
    #[case] name: &str,
    #[case] reason: &str,
) -> Result<()> {
    let Err(err) = registry.bool(name).register() else {
        return Err(anyhow!("{name:?} should be refused"));
    };
    ensure!(
        matches!(&err, FlagError::Registration { reason: actual, .. } if actual == reason),
        "unexpected error: {err}"
    );
    ensure!(registry.names().next().is_none(), "nothing should be registered");
    Ok(())
}

#[rstest]
fn rejects_duplicate_names(mut registry: FlagRegistry) -> Result<()> {
    registry.int("vcpus").register()?;
    let err = registry
        .string("vcpus")
        .register()
        .err()
        .ok_or_else(|| anyhow!("duplicate name accepted"))?;
    ensure!(err.to_string() == "cannot register --vcpus: the name is already registered");
    Ok(())
}

#[rstest]
#[case('h', "-h is reserved")]
#[case('V', "-V is reserved")]
#[case('-', "-- is not a valid shorthand")]
fn rejects_unusable_shorthands(
    mut registry: FlagRegistry,
    #[case] short: char,
    #[case] reason: &str,
) -> Result<()> {
    let err = registry
        .bool("flag")
        .short(short)
        .register()
        .err()
        .ok_or_else(|| anyhow!("-{short} accepted"))?;
    ensure!(err.to_string() == format!("cannot register --flag: {reason}"), "{err}");
    Ok(())
}

#[rstest]
fn rejects_duplicate_shorthands(mut registry: FlagRegistry) -> Result<()> {
    registry.int("vcpus").short('c').register()?;
    ensure!(registry.string("cpu").short('c').register().is_err());
    Ok(())
}

#[rstest]
fn failed_range_registration_leaves_registry_unchanged(mut registry: FlagRegistry) -> Result<()> {
    registry.int("vcpus-max").register()?;
    ensure!(registry.int_range("vcpus").register().is_err());
    let names: Vec<&str> = registry.names().collect();
    ensure!(names == ["vcpus-max"], "unexpected names: {names:?}");
    Ok(())
}

#[rstest]
fn unset_and_zero_are_distinguishable(mut registry: FlagRegistry) -> Result<()> {
    let without_default = registry.int("gpus").register()?;
    let zero_default = registry.int("max-results").default_value(0).register()?;
    let resolved = registry.parse_from(["demo"])?;

    ensure!(resolved.get(&without_default).is_none());
    ensure!(resolved.is_default_unset("gpus"));
    ensure!(resolved.source("gpus") == Some(FlagSource::Unset));

    ensure!(resolved.get(&zero_default) == Some(&0));
    ensure!(!resolved.is_default_unset("max-results"));
    ensure!(resolved.source("max-results") == Some(FlagSource::Default));
    ensure!(!resolved.is_set("max-results"));
    Ok(())
}

#[rstest]
fn explicit_zero_counts_as_set(mut registry: FlagRegistry) -> Result<()> {
    let gpus = registry.int("gpus").register()?;
    let resolved = registry.parse_from(["demo", "--gpus", "0"])?;
    ensure!(resolved.get(&gpus) == Some(&0));
    ensure!(resolved.is_set("gpus"));
    ensure!(resolved.is_default_unset("gpus"));
    Ok(())
}

#[rstest]
#[case(&["demo"], None)]
#[case(&["demo", "--hibernation-support"], Some(true))]
#[case(&["demo", "--hibernation-support=false"], Some(false))]
#[case(&["demo", "-b"], Some(true))]
fn parses_boolean_switches(
    mut registry: FlagRegistry,
    #[case] args: &[&str],
    #[case] expected: Option<bool>,
) -> Result<()> {
    let flag = registry.bool("hibernation-support").short('b').register()?;
    let resolved = registry.parse_from(args)?;
    ensure!(resolved.get(&flag).copied() == expected);
    Ok(())
}

#[rstest]
fn accepts_negative_numbers(mut registry: FlagRegistry) -> Result<()> {
    let offset = registry.int("offset").register()?;
    let scale = registry.float("scale").register()?;
    let resolved = registry.parse_from(["demo", "--offset", "-3", "--scale", "-0.5"])?;
    ensure!(resolved.get(&offset) == Some(&-3));
    ensure!(matches!(resolved.value("scale"), Some(FlagValue::Float(f)) if f.is_sign_negative()));
    ensure!(resolved.get(&scale).is_some());
    Ok(())
}

#[rstest]
fn list_occurrences_append_and_split(mut registry: FlagRegistry) -> Result<()> {
    let zones = registry.string_list("availability-zones").short('z').register()?;
    let resolved = registry.parse_from(["demo", "-z", "us-east-1a,us-east-1b", "-z", "us-east-1c"])?;
    let values = resolved.get(&zones).ok_or_else(|| anyhow!("zones unset"))?;
    ensure!(values == &["us-east-1a", "us-east-1b", "us-east-1c"], "{values:?}");
    Ok(())
}

#[rstest]
fn repeated_flag_keeps_last_value(mut registry: FlagRegistry) -> Result<()> {
    let region = registry.string("region").register()?;
    let resolved = registry.parse_from(["demo", "--region", "us-east-1", "--region", "eu-west-1"])?;
    ensure!(resolved.get(&region).map(String::as_str) == Some("eu-west-1"));
    Ok(())
}

#[rstest]
fn defaults_run_through_the_pipeline(mut registry: FlagRegistry) -> Result<()> {
    let arch = registry
        .string_options("cpu-architecture", ["x86_64", "arm64"])
        .default_value("sparc".to_owned())
        .register()?;
    let err = registry
        .parse_from(["demo"])
        .err()
        .ok_or_else(|| anyhow!("invalid default accepted"))?;
    ensure!(err.flag() == Some(arch.name()), "{err}");
    Ok(())
}

#[rstest]
fn parser_errors_are_wrapped(mut registry: FlagRegistry) -> Result<()> {
    registry.int("vcpus").register()?;
    let err = registry
        .parse_from(["demo", "--vcpus", "four"])
        .err()
        .ok_or_else(|| anyhow!("non-numeric integer accepted"))?;
    ensure!(matches!(err, FlagError::CliParsing(_)), "{err}");
    ensure!(err.display_request().is_none());
    Ok(())
}

#[rstest]
fn help_is_a_display_request(mut registry: FlagRegistry) -> Result<()> {
    registry.int("vcpus").register()?;
    let err = registry
        .parse_from(["demo", "--help"])
        .err()
        .ok_or_else(|| anyhow!("help should short-circuit parsing"))?;
    ensure!(err.display_request().is_some());
    Ok(())
}

#[rstest]
fn pipeline_failures_are_aggregated(mut registry: FlagRegistry) -> Result<()> {
    registry.byte_quantity("memory").register()?;
    registry.regex("allow-list").register()?;
    registry.ratio("vcpus-to-memory-ratio").register()?;
    let err = registry
        .parse_from([
            "demo",
            "--memory",
            "lots",
            "--allow-list",
            "(",
            "--vcpus-to-memory-ratio",
            "1:2",
        ])
        .err()
        .ok_or_else(|| anyhow!("malformed values accepted"))?;
    let FlagError::Aggregate(errors) = err else {
        return Err(anyhow!("expected an aggregate, got {err}"));
    };
    let flags: Vec<_> = errors.iter().filter_map(FlagError::flag).collect();
    ensure!(flags == ["memory", "allow-list"], "{flags:?}");
    Ok(())
}

#[rstest]
fn groups_render_under_headings(mut registry: FlagRegistry) -> Result<()> {
    registry.int("vcpus").help("Number of vCPUs").register()?;
    registry.bool("flexible").suite().help("Flexible").register()?;
    registry
        .int("max-results")
        .config()
        .help("Results")
        .default_value(20)
        .register()?;
    let help = registry.command().render_help().to_string();
    ensure!(help.contains("Suite Flags:"), "{help}");
    ensure!(help.contains("Global Flags:"), "{help}");
    ensure!(help.contains("[default: 20]"), "{help}");
    Ok(())
}

#[rstest]
fn env_var_names_follow_prefix() {
    let spec = FlagSpec::new("gpu-memory-total".to_owned(), RawKind::Text);
    assert_eq!(spec.env_var("EC2_"), "EC2_GPU_MEMORY_TOTAL");
}
