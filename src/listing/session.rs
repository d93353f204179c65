//! Async driver that runs a listing controller on tokio.
//!
//! A session owns a [`ListingController`], executes the effects it emits and
//! publishes a fresh [`ListingSnapshot`] after every transition. UI input
//! arrives through a [`ListingHandle`]; fetches run as tasks in a `JoinSet`;
//! the debounce timer is a single deadline that is replaced, never stacked,
//! so a superseded timer cannot fire.
//!
//! Dropping the handle or calling [`ListingHandle::shutdown`] unmounts the
//! controller and aborts outstanding fetches.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{Id, JoinError, JoinHandle, JoinSet};
use tokio::time::{Instant, sleep_until};

use super::controller::{ListingController, ListingOptions};
use super::error::ListingError;
use super::messages::{Effect, FetchRequest, ListingMsg};
use super::source::{ListingSource, ResultPage};
use super::state::{ListingSnapshot, ViewMode};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Input a UI shell can send to a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingInput {
    /// Raw search text changed.
    Search(String),
    /// Previous page (paged mode).
    PrevPage,
    /// Next page (paged mode).
    NextPage,
    /// Specific page (paged mode).
    GoToPage(u32),
    /// Proximity signal (accumulating mode).
    NearEnd(bool),
    /// Select a mode.
    SetMode(ViewMode),
    /// Switch to the other mode.
    ToggleMode,
    /// Re-issue the last failed fetch.
    Retry,
    /// Stop the session.
    Shutdown,
}

impl ListingInput {
    fn into_msg<T>(self, now: Instant) -> Option<ListingMsg<T>> {
        let msg = match self {
            Self::Search(text) => ListingMsg::SearchChanged { text, at: now },
            Self::PrevPage => ListingMsg::PrevPage,
            Self::NextPage => ListingMsg::NextPage,
            Self::GoToPage(page) => ListingMsg::GoToPage(page),
            Self::NearEnd(visible) => ListingMsg::NearEnd(visible),
            Self::SetMode(mode) => ListingMsg::SetMode(mode),
            Self::ToggleMode => ListingMsg::ToggleMode,
            Self::Retry => ListingMsg::Retry,
            Self::Shutdown => return None,
        };
        Some(msg)
    }
}

struct FetchOutcome<T> {
    request: FetchRequest,
    result: Result<ResultPage<T>, ListingError>,
    latency: Duration,
}

/// Builder and event loop for a listing session.
pub struct ListingSession<S>
where
    S: ListingSource + 'static,
{
    controller: ListingController<S::Item>,
    source: Arc<S>,
    telemetry: Arc<dyn TelemetrySink>,
    settle_deadline: Option<Instant>,
    fetches: JoinSet<FetchOutcome<S::Item>>,
    /// Request each running fetch task answers, keyed by task id.
    fetch_requests: HashMap<Id, FetchRequest>,
    snapshots: watch::Sender<ListingSnapshot<S::Item>>,
}

impl<S> ListingSession<S>
where
    S: ListingSource + 'static,
{
    /// Creates a session over `source` with the given controller options.
    #[must_use]
    pub fn new(source: Arc<S>, options: ListingOptions) -> Self {
        let controller = ListingController::new(options);
        let (snapshots, _initial_receiver) = watch::channel(controller.snapshot());
        Self {
            controller,
            source,
            telemetry: Arc::new(NoopTelemetrySink),
            settle_deadline: None,
            fetches: JoinSet::new(),
            fetch_requests: HashMap::new(),
            snapshots,
        }
    }

    /// Routes telemetry events to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// Mounts the controller and runs the session on the current runtime.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(self) -> ListingHandle<S::Item> {
        let (inputs, receiver) = mpsc::unbounded_channel();
        let snapshots = self.snapshots.subscribe();
        let task = tokio::spawn(self.run(receiver));
        ListingHandle {
            inputs,
            snapshots,
            task: Some(task),
        }
    }

    async fn run(mut self, mut inputs: mpsc::UnboundedReceiver<ListingInput>) {
        let effect = self.controller.mount();
        self.execute(effect);
        self.publish();

        loop {
            tokio::select! {
                input = inputs.recv() => {
                    let Some(msg) = input.and_then(|input| input.into_msg(Instant::now())) else {
                        break;
                    };
                    self.dispatch(msg);
                }
                () = wait_for_deadline(self.settle_deadline) => {
                    self.settle_deadline = None;
                    self.dispatch(ListingMsg::SettleDue { at: Instant::now() });
                }
                Some(joined) = self.fetches.join_next_with_id(), if !self.fetches.is_empty() => {
                    self.handle_joined(joined);
                }
            }
        }

        self.teardown();
    }

    fn dispatch(&mut self, msg: ListingMsg<S::Item>) {
        let effect = self.controller.handle_message(msg);
        self.execute(effect);
        self.publish();
    }

    fn execute(&mut self, effect: Option<Effect>) {
        match effect {
            Some(Effect::ScheduleSettle { deadline }) => self.settle_deadline = Some(deadline),
            Some(Effect::CancelSettle) => self.settle_deadline = None,
            Some(Effect::Fetch(request)) => self.spawn_fetch(request),
            None => {}
        }
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let tracked = request.clone();
        let task = self.fetches.spawn(async move {
            let started = Instant::now();
            let result = source.fetch(&request.query).await;
            FetchOutcome {
                request,
                result,
                latency: started.elapsed(),
            }
        });
        self.fetch_requests.insert(task.id(), tracked);
    }

    fn handle_joined(&mut self, joined: Result<(Id, FetchOutcome<S::Item>), JoinError>) {
        let outcome = match joined {
            Ok((id, outcome)) => {
                self.fetch_requests.remove(&id);
                outcome
            }
            Err(error) => {
                let request = self.fetch_requests.remove(&error.id());
                if !error.is_panic() {
                    return;
                }
                tracing::warn!("listing fetch task panicked: {error}");
                // A panic fails the task's own request; the stale guard
                // decides whether that still matters.
                let Some(request) = request else {
                    return;
                };
                FetchOutcome {
                    request,
                    result: Err(ListingError::fetch_failed(error)),
                    latency: Duration::ZERO,
                }
            }
        };

        self.record_outcome(&outcome);
        self.dispatch(ListingMsg::FetchCompleted {
            request: outcome.request,
            result: outcome.result,
        });
    }

    fn record_outcome(&self, outcome: &FetchOutcome<S::Item>) {
        let page = outcome.request.query.page;
        let event = if !self.controller.is_current(&outcome.request) {
            TelemetryEvent::StaleResponseDiscarded { page }
        } else if let Ok(result) = &outcome.result {
            TelemetryEvent::FetchCompleted {
                latency_ms: u64::try_from(outcome.latency.as_millis()).unwrap_or(u64::MAX),
                item_count: result.items.len(),
                page,
            }
        } else {
            TelemetryEvent::FetchFailed { page }
        };
        self.telemetry.record(event);
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.controller.snapshot());
    }

    fn teardown(&mut self) {
        let effect = self.controller.unmount();
        self.execute(effect);
        self.fetches.abort_all();
        self.fetch_requests.clear();
        self.publish();
    }
}

async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Handle through which a UI shell drives a running session.
///
/// Dropping the handle stops the session.
#[derive(Debug)]
pub struct ListingHandle<T> {
    inputs: mpsc::UnboundedSender<ListingInput>,
    snapshots: watch::Receiver<ListingSnapshot<T>>,
    task: Option<JoinHandle<()>>,
}

impl<T> ListingHandle<T>
where
    T: Clone,
{
    /// Sends raw input to the session.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::SessionClosed`] when the session has stopped.
    pub fn send(&self, input: ListingInput) -> Result<(), ListingError> {
        self.inputs
            .send(input)
            .map_err(|_closed| ListingError::SessionClosed)
    }

    /// Updates the raw search text.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::SessionClosed`] when the session has stopped.
    pub fn search(&self, text: impl Into<String>) -> Result<(), ListingError> {
        self.send(ListingInput::Search(text.into()))
    }

    /// Returns the latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ListingSnapshot<T> {
        self.snapshots.borrow().clone()
    }

    /// Returns a receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListingSnapshot<T>> {
        self.snapshots.clone()
    }

    /// Waits until a published snapshot satisfies `predicate`.
    ///
    /// The current snapshot is checked first.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::SessionClosed`] if the session stops first.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&ListingSnapshot<T>) -> bool,
    ) -> Result<ListingSnapshot<T>, ListingError> {
        self.snapshots
            .wait_for(predicate)
            .await
            .map(|snapshot| (*snapshot).clone())
            .map_err(|_closed| ListingError::SessionClosed)
    }

    /// Stops the session and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::SessionClosed`] if the session task panicked.
    pub async fn shutdown(mut self) -> Result<(), ListingError> {
        let _already_stopped = self.inputs.send(ListingInput::Shutdown).is_err();
        match self.task.take() {
            Some(task) => task.await.map_err(|_join_error| ListingError::SessionClosed),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use async_trait::async_trait;
    use mockall::predicate::always;
    use rstest::rstest;

    use super::*;
    use crate::listing::catalogue::InMemoryCatalogue;
    use crate::listing::models::Job;
    use crate::listing::models::test_support::{job, numbered_jobs};
    use crate::listing::source::{MockListingSource, PageQuery};
    use crate::listing::state::LoadStatus;
    use crate::telemetry::test_support::RecordingTelemetrySink;

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn options(mode: ViewMode) -> ListingOptions {
        ListingOptions::default()
            .with_page_size(NonZeroUsize::new(10).expect("page size should be non-zero"))
            .with_debounce(DEBOUNCE)
            .with_mode(mode)
    }

    /// Answers searches for `slow_search` only after `slow_latency`.
    struct ScriptedSource {
        catalogue: InMemoryCatalogue<Job>,
        slow_search: &'static str,
        slow_latency: Duration,
    }

    #[async_trait]
    impl ListingSource for ScriptedSource {
        type Item = Job;

        async fn fetch(&self, query: &PageQuery) -> Result<ResultPage<Job>, ListingError> {
            if query.search == self.slow_search {
                tokio::time::sleep(self.slow_latency).await;
            }
            Ok(self.catalogue.query(query))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn mount_publishes_first_page() {
        let source = Arc::new(InMemoryCatalogue::new(numbered_jobs(23)));
        let mut handle = ListingSession::new(source, options(ViewMode::Paged)).spawn();

        let snapshot = handle
            .wait_for(|s| s.status == LoadStatus::Loaded)
            .await
            .expect("session should publish");

        assert_eq!(snapshot.items.len(), 10);
        assert_eq!(snapshot.total_pages, 3);
        handle.shutdown().await.expect("shutdown should succeed");
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_typing_issues_a_single_fetch() {
        let mut source = MockListingSource::new();
        source
            .expect_fetch()
            .with(always())
            .times(2)
            .returning(|query| {
                Ok(ResultPage {
                    items: vec![job(1, &format!("match for {}", query.search), "Acme")],
                    total_count: 1,
                    page: query.page,
                })
            });
        let mut handle =
            ListingSession::new(Arc::new(source), options(ViewMode::Accumulating)).spawn();
        handle
            .wait_for(|s| s.status == LoadStatus::Loaded)
            .await
            .expect("initial load");

        for text in ["r", "ru", "rus", "rust"] {
            handle.search(text).expect("session should accept input");
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let snapshot = handle
            .wait_for(|s| s.settled_search == "rust" && s.status == LoadStatus::Loaded)
            .await
            .expect("search should settle");
        assert_eq!(
            snapshot.items.first().map(|item| item.title.as_str()),
            Some("match for rust")
        );
        handle.shutdown().await.expect("shutdown should succeed");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_stale_search_is_discarded_and_recorded() {
        let source = Arc::new(ScriptedSource {
            catalogue: InMemoryCatalogue::new(vec![
                job(1, "Rust Engineer", "Ferrous Labs"),
                job(2, "Go Developer", "Gopher Inc"),
            ]),
            slow_search: "rust",
            slow_latency: Duration::from_secs(3),
        });
        let sink = Arc::new(RecordingTelemetrySink::default());
        let mut handle = ListingSession::new(source, options(ViewMode::Accumulating))
            .with_telemetry(Arc::clone(&sink) as Arc<dyn TelemetrySink>)
            .spawn();

        handle.search("rust").expect("session should accept input");
        tokio::time::sleep(Duration::from_millis(600)).await;
        handle.search("gopher").expect("session should accept input");
        handle
            .wait_for(|s| s.settled_search == "gopher" && s.status == LoadStatus::Loaded)
            .await
            .expect("second search should load");

        tokio::time::sleep(Duration::from_secs(5)).await;

        let snapshot = handle.snapshot();
        let ids: Vec<&str> = snapshot.items.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
        assert!(
            sink.events()
                .contains(&TelemetryEvent::StaleResponseDiscarded { page: 1 }),
            "expected a stale discard, got {:?}",
            sink.events()
        );
        handle.shutdown().await.expect("shutdown should succeed");
    }

    /// Panics on searches for `panic_search` after a delay and answers
    /// everything else after `latency`.
    struct PanickingSource {
        catalogue: InMemoryCatalogue<Job>,
        panic_search: &'static str,
        panic_after: Duration,
        latency: Duration,
    }

    #[async_trait]
    impl ListingSource for PanickingSource {
        type Item = Job;

        async fn fetch(&self, query: &PageQuery) -> Result<ResultPage<Job>, ListingError> {
            if query.search == self.panic_search {
                tokio::time::sleep(self.panic_after).await;
                panic!("source exploded");
            }
            if !query.search.is_empty() {
                tokio::time::sleep(self.latency).await;
            }
            Ok(self.catalogue.query(query))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn panic_in_superseded_fetch_does_not_fail_current_request() {
        let source = Arc::new(PanickingSource {
            catalogue: InMemoryCatalogue::new(vec![
                job(1, "Rust Engineer", "Ferrous Labs"),
                job(2, "Go Developer", "Gopher Inc"),
            ]),
            panic_search: "boom",
            panic_after: Duration::from_secs(3),
            latency: Duration::from_secs(5),
        });
        let sink = Arc::new(RecordingTelemetrySink::default());
        let mut handle = ListingSession::new(source, options(ViewMode::Accumulating))
            .with_telemetry(Arc::clone(&sink) as Arc<dyn TelemetrySink>)
            .spawn();
        handle
            .wait_for(|s| s.status == LoadStatus::Loaded)
            .await
            .expect("initial load");

        handle.search("boom").expect("session should accept input");
        tokio::time::sleep(Duration::from_millis(600)).await;
        handle.search("gopher").expect("session should accept input");
        tokio::time::sleep(Duration::from_secs(10)).await;

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.status, LoadStatus::Loaded);
        assert_eq!(snapshot.error, None);
        assert_eq!(snapshot.settled_search, "gopher");
        let ids: Vec<&str> = snapshot.items.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
        assert!(
            sink.events()
                .contains(&TelemetryEvent::StaleResponseDiscarded { page: 1 }),
            "expected the panicked fetch to be discarded, got {:?}",
            sink.events()
        );
        handle.shutdown().await.expect("shutdown should succeed");
    }

    #[tokio::test(start_paused = true)]
    async fn panic_in_current_fetch_is_surfaced_as_failure() {
        let source = Arc::new(PanickingSource {
            catalogue: InMemoryCatalogue::new(numbered_jobs(3)),
            panic_search: "boom",
            panic_after: Duration::from_millis(100),
            latency: Duration::ZERO,
        });
        let mut handle = ListingSession::new(source, options(ViewMode::Paged)).spawn();
        handle
            .wait_for(|s| s.status == LoadStatus::Loaded)
            .await
            .expect("initial load");

        handle.search("boom").expect("session should accept input");
        let snapshot = handle
            .wait_for(|s| s.status == LoadStatus::Error)
            .await
            .expect("panic should be published as a failure");

        assert!(
            snapshot
                .error
                .as_deref()
                .is_some_and(|message| message.contains("source exploded"))
        );
        handle.shutdown().await.expect("shutdown should succeed");
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_surfaced_as_state() {
        let mut source = MockListingSource::new();
        source
            .expect_fetch()
            .returning(|_| Err(ListingError::fetch_failed("backend offline")));
        let sink = Arc::new(RecordingTelemetrySink::default());
        let mut handle = ListingSession::new(Arc::new(source), options(ViewMode::Paged))
            .with_telemetry(Arc::clone(&sink) as Arc<dyn TelemetrySink>)
            .spawn();

        let snapshot = handle
            .wait_for(|s| s.status == LoadStatus::Error)
            .await
            .expect("failure should be published");

        assert!(snapshot.items.is_empty());
        assert_eq!(
            snapshot.error.as_deref(),
            Some("failed to fetch listing page: backend offline")
        );
        assert_eq!(sink.events(), vec![TelemetryEvent::FetchFailed { page: 1 }]);
        handle.shutdown().await.expect("shutdown should succeed");
    }

    #[tokio::test(start_paused = true)]
    async fn accumulating_session_loads_until_short_page() {
        let source = Arc::new(
            InMemoryCatalogue::new(numbered_jobs(23)).with_latency(Duration::from_millis(500)),
        );
        let mut handle = ListingSession::new(source, options(ViewMode::Accumulating)).spawn();

        for expected in [10, 20, 23] {
            let snapshot = handle
                .wait_for(|s| s.status == LoadStatus::Loaded && s.items.len() == expected)
                .await
                .expect("page should load");
            handle.send(ListingInput::NearEnd(true)).expect("input");
            if expected == 23 {
                assert!(!snapshot.has_more);
            }
        }

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(handle.snapshot().items.len(), 23, "no fetch past the end");
        handle.shutdown().await.expect("shutdown should succeed");
    }

    #[rstest]
    #[case::explicit_shutdown(true)]
    #[case::dropped_handle(false)]
    #[tokio::test(start_paused = true)]
    async fn session_stops_publishing_when_closed(#[case] explicit: bool) {
        let source = Arc::new(InMemoryCatalogue::new(numbered_jobs(3)));
        let handle = ListingSession::new(source, options(ViewMode::Paged)).spawn();
        let mut receiver = handle.subscribe();

        if explicit {
            handle.shutdown().await.expect("shutdown should succeed");
        } else {
            drop(handle);
        }

        while receiver.changed().await.is_ok() {}
        assert!(
            receiver.has_changed().is_err(),
            "session should drop its sender once closed"
        );
    }
}
