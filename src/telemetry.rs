//! Application telemetry events and sinks.
//!
//! Listings run entirely in-process, but fetch latency and discarded stale
//! responses are still worth capturing when debugging a slow or flaky data
//! source.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by a listing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A fetch for the current query was applied.
    FetchCompleted {
        /// Time from issuing the request to its completion.
        latency_ms: u64,
        /// Items on the fetched page.
        item_count: usize,
        /// Page that was fetched.
        page: u32,
    },
    /// A fetch for the current query failed.
    FetchFailed {
        /// Page that was requested.
        page: u32,
    },
    /// A completion arrived for a request that had been superseded.
    StaleResponseDiscarded {
        /// Page the stale request asked for.
        page: u32,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    //! Telemetry sink that keeps events in memory for assertions.

    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that records every event it receives.
    #[derive(Debug, Default)]
    pub struct RecordingTelemetrySink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingTelemetrySink {
        /// Returns a copy of the recorded events.
        ///
        /// # Panics
        ///
        /// Panics if the events mutex is poisoned.
        #[must_use]
        #[expect(clippy::expect_used, reason = "test helper; poisoning is a bug")]
        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .expect("events mutex should be available")
                .clone()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        #[expect(clippy::expect_used, reason = "test helper; poisoning is a bug")]
        fn record(&self, event: TelemetryEvent) {
            self.events
                .lock()
                .expect("events mutex should be available")
                .push(event);
        }
    }
}
