//! Support modules for the listing controller BDD tests.

pub(crate) mod harness;
pub(crate) mod state;

pub(crate) use harness::Harness;
pub(crate) use state::ControllerState;
