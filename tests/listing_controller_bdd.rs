//! Behavioural tests for the listing query controller.

#[path = "listing_controller_bdd/mod.rs"]
mod listing_controller_bdd_support;

use listing_controller_bdd_support::{ControllerState, Harness};
use listwise::listing::ListingMsg;
use listwise::{LoadStatus, ViewMode};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Result type for BDD test steps.
type StepResult = Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn controller_state() -> ControllerState {
    ControllerState::default()
}

fn with_harness<R>(
    controller_state: &ControllerState,
    action: impl FnOnce(&mut Harness) -> R,
) -> Result<R, Box<dyn std::error::Error>> {
    controller_state
        .harness
        .with_mut(action)
        .ok_or_else(|| "listing must be initialised".into())
}

#[given("a grid listing of {count:u32} jobs")]
fn given_grid_listing(controller_state: &ControllerState, count: u32) {
    controller_state
        .harness
        .set(Harness::mounted(count, ViewMode::Accumulating));
}

#[given("a table listing of {count:u32} jobs")]
fn given_table_listing(controller_state: &ControllerState, count: u32) {
    controller_state
        .harness
        .set(Harness::mounted(count, ViewMode::Paged));
}

#[given("the data source is failing")]
fn given_failing_source(controller_state: &ControllerState) -> StepResult {
    with_harness(controller_state, |harness| harness.set_failing(true))
}

#[when("the data source recovers")]
fn when_source_recovers(controller_state: &ControllerState) -> StepResult {
    with_harness(controller_state, |harness| harness.set_failing(false))
}

#[when("the user types {text} at {millis:u64} ms")]
fn when_user_types(controller_state: &ControllerState, text: String, millis: u64) -> StepResult {
    with_harness(controller_state, |harness| {
        let at = harness.at(millis);
        harness.send(ListingMsg::SearchChanged {
            text: text.trim_matches('"').to_owned(),
            at,
        });
    })
}

#[when("the debounce elapses at {millis:u64} ms")]
fn when_debounce_elapses(controller_state: &ControllerState, millis: u64) -> StepResult {
    with_harness(controller_state, |harness| {
        let at = harness.at(millis);
        harness.send(ListingMsg::SettleDue { at });
    })
}

#[when("the user goes to the next page")]
fn when_next_page(controller_state: &ControllerState) -> StepResult {
    with_harness(controller_state, |harness| harness.send(ListingMsg::NextPage))
}

#[when("the user jumps to page {page:u32}")]
fn when_go_to_page(controller_state: &ControllerState, page: u32) -> StepResult {
    with_harness(controller_state, |harness| {
        harness.send(ListingMsg::GoToPage(page));
    })
}

#[when("the user scrolls near the end")]
fn when_near_end(controller_state: &ControllerState) -> StepResult {
    with_harness(controller_state, |harness| {
        harness.send(ListingMsg::NearEnd(true));
    })
}

#[when("the user switches to the grid view")]
fn when_switch_to_grid(controller_state: &ControllerState) -> StepResult {
    with_harness(controller_state, |harness| {
        harness.send(ListingMsg::SetMode(ViewMode::Accumulating));
    })
}

#[when("the user retries")]
fn when_retry(controller_state: &ControllerState) -> StepResult {
    with_harness(controller_state, |harness| harness.send(ListingMsg::Retry))
}

#[when("the oldest pending fetch completes")]
fn when_oldest_completes(controller_state: &ControllerState) -> StepResult {
    with_harness(controller_state, Harness::complete_oldest)
}

#[when("the newest pending fetch completes")]
fn when_newest_completes(controller_state: &ControllerState) -> StepResult {
    with_harness(controller_state, Harness::complete_newest)
}

#[then("{count:usize} fetch is pending")]
fn then_pending_count(controller_state: &ControllerState, count: usize) -> StepResult {
    let pending = with_harness(controller_state, |harness| harness.pending().len())?;
    if pending != count {
        return Err(format!("expected {count} pending fetches, found {pending}").into());
    }
    Ok(())
}

#[then("the pending fetch searches for {text}")]
fn then_pending_search(controller_state: &ControllerState, text: String) -> StepResult {
    let expected = text.trim_matches('"');
    let pending = with_harness(controller_state, |harness| harness.pending())?;
    let search = pending
        .last()
        .map(|request| request.query.search.clone())
        .ok_or("expected a pending fetch")?;
    if search != expected {
        return Err(format!("expected fetch for '{expected}', got '{search}'").into());
    }
    Ok(())
}

#[then("the listing is loading")]
fn then_loading(controller_state: &ControllerState) -> StepResult {
    let status = with_harness(controller_state, |harness| harness.snapshot().status)?;
    if status != LoadStatus::Loading {
        return Err(format!("expected Loading, got {status:?}").into());
    }
    Ok(())
}

#[then("the listing shows an error")]
fn then_error(controller_state: &ControllerState) -> StepResult {
    let snapshot = with_harness(controller_state, |harness| harness.snapshot())?;
    if snapshot.status != LoadStatus::Error || snapshot.error.is_none() {
        return Err(format!(
            "expected an error, got {:?} with {:?}",
            snapshot.status, snapshot.error
        )
        .into());
    }
    Ok(())
}

#[then("the listing shows items {first:usize} to {last:usize} of {total:usize}")]
fn then_visible_range(
    controller_state: &ControllerState,
    first: usize,
    last: usize,
    total: usize,
) -> StepResult {
    let snapshot = with_harness(controller_state, |harness| harness.snapshot())?;
    if snapshot.visible_range != Some((first, last)) || snapshot.total_count != total {
        return Err(format!(
            "expected {first} to {last} of {total}, got {:?} of {}",
            snapshot.visible_range, snapshot.total_count
        )
        .into());
    }
    Ok(())
}

#[then("the current page is {page:u32}")]
fn then_current_page(controller_state: &ControllerState, page: u32) -> StepResult {
    let current = with_harness(controller_state, |harness| harness.snapshot().page)?;
    if current != page {
        return Err(format!("expected page {page}, got {current}").into());
    }
    Ok(())
}

#[then("{count:usize} items are shown")]
fn then_item_count(controller_state: &ControllerState, count: usize) -> StepResult {
    let shown = with_harness(controller_state, |harness| harness.snapshot().items.len())?;
    if shown != count {
        return Err(format!("expected {count} items, got {shown}").into());
    }
    Ok(())
}

#[then("more items are not available")]
fn then_no_more(controller_state: &ControllerState) -> StepResult {
    let has_more = with_harness(controller_state, |harness| harness.snapshot().has_more)?;
    if has_more {
        return Err("expected the listing to be exhausted".into());
    }
    Ok(())
}

#[scenario(path = "tests/features/listing_controller.feature", index = 0)]
fn rapid_typing_issues_single_fetch(controller_state: ControllerState) {
    let _ = controller_state;
}

#[scenario(path = "tests/features/listing_controller.feature", index = 1)]
fn superseded_page_is_discarded(controller_state: ControllerState) {
    let _ = controller_state;
}

#[scenario(path = "tests/features/listing_controller.feature", index = 2)]
fn scrolling_accumulates_pages(controller_state: ControllerState) {
    let _ = controller_state;
}

#[scenario(path = "tests/features/listing_controller.feature", index = 3)]
fn failed_page_can_be_retried(controller_state: ControllerState) {
    let _ = controller_state;
}

#[scenario(path = "tests/features/listing_controller.feature", index = 4)]
fn switching_view_resets_page(controller_state: ControllerState) {
    let _ = controller_state;
}
