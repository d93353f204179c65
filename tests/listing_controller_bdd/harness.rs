//! Drives a listing controller by hand, answering fetches on demand.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::time::Duration;

use listwise::listing::models::test_support::numbered_jobs;
use listwise::listing::{Effect, FetchRequest, ListingMsg};
use listwise::{
    InMemoryCatalogue, Job, ListingController, ListingError, ListingOptions, ListingSnapshot,
    ViewMode,
};
use tokio::time::Instant;

/// Debounce window used by every scenario.
pub(crate) const DEBOUNCE: Duration = Duration::from_millis(500);

/// A controller plus the fetches it has asked for but not yet received.
pub(crate) struct Harness {
    controller: ListingController<Job>,
    catalogue: InMemoryCatalogue<Job>,
    pending: VecDeque<FetchRequest>,
    origin: Instant,
    failing: bool,
}

impl Harness {
    /// Mounts a controller over `count` numbered jobs and loads page one.
    pub(crate) fn mounted(count: u32, mode: ViewMode) -> Self {
        let page_size = NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN);
        let options = ListingOptions::default()
            .with_page_size(page_size)
            .with_debounce(DEBOUNCE)
            .with_mode(mode);
        let mut harness = Self {
            controller: ListingController::new(options),
            catalogue: InMemoryCatalogue::new(numbered_jobs(count)),
            pending: VecDeque::new(),
            origin: Instant::now(),
            failing: false,
        };
        let effect = harness.controller.mount();
        harness.apply(effect);
        harness.complete_newest();
        harness
    }

    /// Makes later fetch completions fail or succeed.
    pub(crate) const fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Returns the instant `millis` after the scenario started.
    pub(crate) fn at(&self, millis: u64) -> Instant {
        self.origin + Duration::from_millis(millis)
    }

    /// Sends a message and records the effect it requests.
    pub(crate) fn send(&mut self, msg: ListingMsg<Job>) {
        let effect = self.controller.handle_message(msg);
        self.apply(effect);
    }

    /// Answers the oldest outstanding fetch.
    pub(crate) fn complete_oldest(&mut self) {
        if let Some(request) = self.pending.pop_front() {
            self.answer(request);
        }
    }

    /// Answers the newest outstanding fetch and forgets older ones.
    pub(crate) fn complete_newest(&mut self) {
        if let Some(request) = self.pending.pop_back() {
            self.pending.clear();
            self.answer(request);
        }
    }

    /// Returns the outstanding fetches, oldest first.
    pub(crate) fn pending(&self) -> Vec<FetchRequest> {
        self.pending.iter().cloned().collect()
    }

    /// Returns what the UI would render.
    pub(crate) fn snapshot(&self) -> ListingSnapshot<Job> {
        self.controller.snapshot()
    }

    fn answer(&mut self, request: FetchRequest) {
        let result = if self.failing {
            Err(ListingError::fetch_failed("service unavailable"))
        } else {
            Ok(self.catalogue.query(&request.query))
        };
        self.send(ListingMsg::FetchCompleted { request, result });
    }

    fn apply(&mut self, effect: Option<Effect>) {
        match effect {
            Some(Effect::Fetch(request)) => self.pending.push_back(request),
            Some(Effect::ScheduleSettle { .. } | Effect::CancelSettle) | None => {}
        }
    }
}
