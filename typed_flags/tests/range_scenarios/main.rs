//! Behavioural scenarios for range triplets, bound to
//! `tests/features/range_flags.feature`.

mod fixtures;
mod steps;

use fixtures::{RangeContext, range_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/range_flags.feature",
    fixtures = [range_context: RangeContext]
);
