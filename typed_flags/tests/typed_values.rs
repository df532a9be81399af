//! Integration tests for the typed builders and their pipelines.

use anyhow::{Result, anyhow, ensure};
use camino::Utf8PathBuf;
use rstest::rstest;
use serial_test::serial;
use test_helpers::env;
use typed_flags::{ByteQuantity, FlagError, FlagRegistry, FlagResult, FlagValue, ValueKind};

fn resolve_one<T, F>(register: F, args: &[&str]) -> FlagResult<Option<T>>
where
    T: typed_flags::FlagType + Clone,
    F: FnOnce(&mut FlagRegistry) -> FlagResult<typed_flags::Flag<T>>,
{
    let mut registry = FlagRegistry::new("selector");
    let flag = register(&mut registry)?;
    let resolved = registry.parse_from(std::iter::once("selector").chain(args.iter().copied()))?;
    Ok(resolved.get(&flag).cloned())
}

#[rstest]
#[case("1:2", 2.0)]
#[case("2:1", 0.5)]
#[case("4:10", 2.5)]
fn ratio_resolves_to_factor(#[case] input: &str, #[case] factor: f64) -> Result<()> {
    let value = resolve_one(|r| r.ratio("vcpus-to-memory-ratio").register(), &[
        "--vcpus-to-memory-ratio",
        input,
    ])?
    .ok_or_else(|| anyhow!("ratio unset"))?;
    ensure!(value.total_cmp(&factor).is_eq(), "{input} resolved to {value}");
    Ok(())
}

#[rstest]
#[case("abc")]
#[case("1-2")]
#[case("0:5")]
#[case("1:")]
fn ratio_rejects_malformed_input(#[case] input: &str) -> Result<()> {
    let err = resolve_one(|r| r.ratio("vcpus-to-memory-ratio").register(), &[
        "--vcpus-to-memory-ratio",
        input,
    ])
    .err()
    .ok_or_else(|| anyhow!("{input} accepted"))?;
    ensure!(
        matches!(&err, FlagError::MalformedValue { flag, .. } if flag == "vcpus-to-memory-ratio"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn regex_compiles_and_matches() -> Result<()> {
    let regex = resolve_one(|r| r.regex("allow-list").register(), &["--allow-list", "^a.*z$"])?
        .ok_or_else(|| anyhow!("regex unset"))?;
    ensure!(regex.is_match("abcz"));
    ensure!(!regex.is_match("abc"));
    Ok(())
}

#[test]
fn malformed_regex_names_the_flag() -> Result<()> {
    let err = resolve_one(|r| r.regex("deny-list").register(), &["--deny-list", "(unclosed"])
        .err()
        .ok_or_else(|| anyhow!("unbalanced group accepted"))?;
    ensure!(err.to_string().starts_with("invalid input for --deny-list:"), "{err}");
    Ok(())
}

#[rstest]
#[case("B")]
#[case("b")]
#[case("a")]
fn options_accept_members_in_any_case(#[case] input: &str) -> Result<()> {
    let value = resolve_one(|r| r.string_options("mode", ["a", "b", "c"]).register(), &[
        "--mode", input,
    ])?;
    ensure!(value.as_deref() == Some(input), "user spelling should be kept");
    Ok(())
}

#[test]
fn options_list_allowed_values() -> Result<()> {
    let err = resolve_one(|r| r.string_options("mode", ["a", "b", "c"]).register(), &[
        "--mode", "d",
    ])
    .err()
    .ok_or_else(|| anyhow!("d accepted"))?;
    ensure!(err.to_string() == "--mode must be one of: a, b, c", "{err}");
    Ok(())
}

#[rstest]
#[case("16gb", 16 << 30)]
#[case("512mb", 512 << 20)]
#[case("1.5 GiB", 3 << 29)]
#[case("8", 8 << 30)]
#[case("1.1gb", 1_181_116_006)]
#[case("0.098 GiB", 105_226_699)]
fn byte_quantities_parse_units(#[case] input: &str, #[case] bytes: u64) -> Result<()> {
    let value = resolve_one(|r| r.byte_quantity("memory").register(), &["--memory", input])?
        .ok_or_else(|| anyhow!("memory unset"))?;
    ensure!(value.bytes() == bytes, "{input} resolved to {value}");
    Ok(())
}

#[test]
fn byte_quantity_round_trips_through_display() -> Result<()> {
    let parsed: ByteQuantity = "16gb".parse()?;
    let reparsed: ByteQuantity = parsed.to_string().parse()?;
    ensure!(parsed == reparsed);
    ensure!(parsed.to_string() == "16.000 GiB");
    Ok(())
}

#[test]
fn rendered_byte_quantity_is_accepted_as_input() -> Result<()> {
    let rendered = ByteQuantity::from_bytes(100 << 20).to_string();
    let value = resolve_one(|r| r.byte_quantity("memory").register(), &["--memory", rendered.as_str()])?
        .ok_or_else(|| anyhow!("memory unset"))?;
    ensure!(value.to_string() == rendered, "{rendered} resolved to {value}");
    Ok(())
}

#[test]
fn byte_quantity_default_passes_through() -> Result<()> {
    let default = ByteQuantity::from_gib(2).ok_or_else(|| anyhow!("overflow"))?;
    let value =
        resolve_one(|r| r.byte_quantity("memory").default_value(default).register(), &[])?;
    ensure!(value == Some(default));
    Ok(())
}

#[rstest]
#[case("~/data", "/home/tester/data")]
#[case("/abs/path", "/abs/path")]
#[serial]
fn paths_expand_home(#[case] input: &str, #[case] expected: &str) -> Result<()> {
    let _home = env::home("/home/tester");
    let value = resolve_one(|r| r.path("cache-dir").register(), &["--cache-dir", input])?;
    ensure!(value == Some(Utf8PathBuf::from(expected)), "{value:?}");
    Ok(())
}

#[test]
#[serial]
fn path_defaults_expand_home() -> Result<()> {
    let _home = env::home("/home/tester");
    let value = resolve_one(
        |r| {
            r.path("cache-dir")
                .config()
                .default_value(Utf8PathBuf::from("~/.cache/selector"))
                .register()
        },
        &[],
    )?;
    ensure!(value == Some(Utf8PathBuf::from("/home/tester/.cache/selector")));
    Ok(())
}

#[test]
fn float_rejects_nan() -> Result<()> {
    let err = resolve_one(|r| r.float("price-per-hour").register(), &["--price-per-hour", "NaN"])
        .err()
        .ok_or_else(|| anyhow!("NaN accepted"))?;
    ensure!(err.flag() == Some("price-per-hour"));
    Ok(())
}

#[test]
fn caller_validators_run_after_builtin_stages() -> Result<()> {
    let reject_large = |flag: &str, value: &FlagValue| match value {
        FlagValue::Bytes(q) if q.bytes() > 1 << 40 => {
            Err(FlagError::malformed(flag, "at most 1 TiB is supported"))
        }
        _ => Ok(()),
    };
    let err = resolve_one(
        |r| r.byte_quantity("memory").validator(reject_large).register(),
        &["--memory", "2tb"],
    )
    .err()
    .ok_or_else(|| anyhow!("2tb accepted"))?;
    ensure!(err.to_string() == "invalid input for --memory: at most 1 TiB is supported");
    Ok(())
}

#[test]
fn processed_string_checks_processor_output() -> Result<()> {
    let to_upper = |_: &str, value: FlagValue| -> FlagResult<FlagValue> {
        Ok(FlagValue::Text(value.to_string().to_uppercase()))
    };
    let value = resolve_one(
        |r| r.processed_string::<String>("region", to_upper).register(),
        &["--region", "us-east-1"],
    )?;
    ensure!(value.as_deref() == Some("US-EAST-1"));

    let to_int = |_: &str, _: FlagValue| -> FlagResult<FlagValue> { Ok(FlagValue::Int(1)) };
    let err = resolve_one(
        |r| r.processed_string::<String>("region", to_int).register(),
        &["--region", "us-east-1"],
    )
    .err()
    .ok_or_else(|| anyhow!("wrong kind accepted"))?;
    ensure!(
        matches!(
            err,
            FlagError::UnsupportedInputType {
                expected: ValueKind::Text,
                found: ValueKind::Int,
                ..
            }
        ),
        "{err}"
    );
    Ok(())
}
