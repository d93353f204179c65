//! Debounce primitive for rapidly changing input.
//!
//! A [`Debounce`] holds the raw value as typed and a settled value that only
//! catches up once the raw value has stopped changing for the configured
//! delay. Time is passed in explicitly so the owner decides how deadlines are
//! scheduled; the listing session arms a tokio timer for
//! [`Debounce::deadline`] and aborts it whenever a newer update supersedes
//! it.

use std::time::Duration;

use tokio::time::Instant;

/// Lags a value behind its raw input by a quiescence window.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use listwise::listing::debounce::Debounce;
/// use tokio::time::Instant;
///
/// let start = Instant::now();
/// let mut search = Debounce::new(String::new(), Duration::from_millis(500));
///
/// search.update("r".to_owned(), start);
/// search.update("ru".to_owned(), start + Duration::from_millis(100));
/// assert_eq!(search.poll(start + Duration::from_millis(500)), None);
/// assert_eq!(
///     search.poll(start + Duration::from_millis(600)),
///     Some("ru".to_owned())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    raw: T,
    settled: T,
    deadline: Option<Instant>,
}

impl<T> Debounce<T>
where
    T: Clone + PartialEq,
{
    /// Creates a debouncer whose settled value starts as `initial`.
    #[must_use]
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            raw: initial.clone(),
            settled: initial,
            deadline: None,
        }
    }

    /// Records a new raw value and returns the deadline at which it settles.
    ///
    /// Any previously pending deadline is replaced and will never settle.
    pub fn update(&mut self, value: T, now: Instant) -> Instant {
        self.raw = value;
        let deadline = now + self.delay;
        self.deadline = Some(deadline);
        deadline
    }

    /// Settles the raw value if its deadline has passed.
    ///
    /// Returns the new settled value only when it differs from the previous
    /// one. Polling before the deadline, or with nothing pending, returns
    /// `None` and leaves the pending deadline in place.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        if self.raw == self.settled {
            return None;
        }
        self.settled = self.raw.clone();
        Some(self.settled.clone())
    }

    /// Drops any pending deadline without settling.
    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true while a raw value is waiting to settle.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the raw value as last updated.
    #[must_use]
    pub const fn raw(&self) -> &T {
        &self.raw
    }

    /// Returns the settled value.
    #[must_use]
    pub const fn settled(&self) -> &T {
        &self.settled
    }

    /// Returns the quiescence window.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}
