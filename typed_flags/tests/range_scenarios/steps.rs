//! Step definitions for the range scenarios.

use anyhow::{Result, anyhow, ensure};
use rstest_bdd_macros::{then, when};
use typed_flags::{ByteQuantity, FlagError, FlagRegistry, ResolvedFlags};

use crate::fixtures::RangeContext;

fn invoke(range_context: &RangeContext, args: &[&str]) -> Result<()> {
    let mut registry = FlagRegistry::new("selector");
    let vcpus = registry.int_range("vcpus").short('c').register()?;
    let memory = registry.byte_quantity_range("memory").short('m').register()?;
    let outcome = registry.parse_from(std::iter::once("selector").chain(args.iter().copied()));
    range_context.vcpus.set(vcpus);
    range_context.memory.set(memory);
    range_context.outcome.set(outcome);
    Ok(())
}

fn resolved(range_context: &RangeContext) -> Result<ResolvedFlags> {
    range_context
        .outcome
        .take()
        .ok_or_else(|| anyhow!("the selector has not been invoked"))?
        .map_err(|err| anyhow!("parsing failed: {err}"))
}

fn failure(range_context: &RangeContext) -> Result<FlagError> {
    match range_context.outcome.take() {
        Some(Err(err)) => Ok(err),
        Some(Ok(_)) => Err(anyhow!("parsing unexpectedly succeeded")),
        None => Err(anyhow!("the selector has not been invoked")),
    }
}

fn vcpu_range(range_context: &RangeContext) -> Result<Option<(i64, i64)>> {
    let flags = range_context
        .vcpus
        .take()
        .ok_or_else(|| anyhow!("vcpus were not registered"))?;
    Ok(resolved(range_context)?.range(&flags))
}

#[when("the selector is invoked with \"{args}\"")]
fn invoke_with(range_context: &RangeContext, args: String) -> Result<()> {
    let split: Vec<&str> = args.split_whitespace().collect();
    invoke(range_context, &split)
}

#[when("the selector is invoked without range flags")]
fn invoke_without(range_context: &RangeContext) -> Result<()> {
    invoke(range_context, &[])
}

#[then("the vcpus range is {min:i64} to {max:i64}")]
fn vcpus_between(range_context: &RangeContext, min: i64, max: i64) -> Result<()> {
    let range = vcpu_range(range_context)?;
    ensure!(range == Some((min, max)), "unexpected vcpus range {range:?}");
    Ok(())
}

#[then("the vcpus minimum is {min:i64} with no upper bound")]
fn vcpus_open_above(range_context: &RangeContext, min: i64) -> Result<()> {
    let range = vcpu_range(range_context)?;
    ensure!(range == Some((min, i64::MAX)), "unexpected vcpus range {range:?}");
    Ok(())
}

#[then("the vcpus range is unbounded")]
fn vcpus_unbounded(range_context: &RangeContext) -> Result<()> {
    let range = vcpu_range(range_context)?;
    ensure!(range.is_none(), "unexpected vcpus range {range:?}");
    Ok(())
}

#[then("the memory range spans {min:u64} to {max:u64} bytes")]
fn memory_between(range_context: &RangeContext, min: u64, max: u64) -> Result<()> {
    let flags = range_context
        .memory
        .take()
        .ok_or_else(|| anyhow!("memory was not registered"))?;
    let range = resolved(range_context)?.range(&flags);
    let expected = (ByteQuantity::from_bytes(min), ByteQuantity::from_bytes(max));
    ensure!(range == Some(expected), "unexpected memory range {range:?}");
    Ok(())
}

#[then("parsing fails because vcpus-min exceeds vcpus-max")]
fn fails_on_order(range_context: &RangeContext) -> Result<()> {
    let err = failure(range_context)?;
    ensure!(
        matches!(err, FlagError::RangeOrder { .. }),
        "expected a range order error, got {err}"
    );
    ensure!(err.to_string().contains("--vcpus-min and --vcpus-max"), "{err}");
    Ok(())
}

#[then("parsing fails because vcpus conflicts with its bounds")]
fn fails_on_conflict(range_context: &RangeContext) -> Result<()> {
    let err = failure(range_context)?;
    ensure!(
        matches!(err, FlagError::RangeConflict { .. }),
        "expected a range conflict, got {err}"
    );
    ensure!(err.flag() == Some("vcpus"));
    Ok(())
}
