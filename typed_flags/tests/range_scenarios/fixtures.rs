//! Shared state for the range scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use typed_flags::{ByteQuantity, FlagResult, RangeFlags, ResolvedFlags};

/// Handles and parse outcome shared between steps.
#[derive(Debug, Default, ScenarioState)]
pub struct RangeContext {
    pub vcpus: Slot<RangeFlags<i64>>,
    pub memory: Slot<RangeFlags<ByteQuantity>>,
    pub outcome: Slot<FlagResult<ResolvedFlags>>,
}

/// Starts each scenario with no parse outcome.
#[fixture]
pub fn range_context() -> RangeContext {
    RangeContext::default()
}
