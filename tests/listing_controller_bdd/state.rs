//! Scenario state for listing controller BDD tests.

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

use super::Harness;

/// State shared across steps in a listing controller scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct ControllerState {
    /// Controller under test together with its simulated data source.
    pub(crate) harness: Slot<Harness>,
}
