//! Debouncing: coalescing bursts of repeated triggers.
//!
//! Each event binding owns one [`Debouncer`]; distinct bindings never share
//! a timer. Only the *scheduling* of the next call is debounced — an action
//! that has already started is never cancelled.

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::trace;

// ============================================================================
// DebounceMode
// ============================================================================

/// Edge on which a debounced binding fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceMode {
    /// Fire once after the wait elapses from the *last* call; a new call
    /// inside the window cancels and restarts the wait.
    #[default]
    Trailing,
    /// Fire immediately on the first call, then suppress further calls
    /// until the wait elapses.
    Leading,
}

// ============================================================================
// Debouncer
// ============================================================================

/// Mutable debounce state: the armed timer or the suppression deadline.
#[derive(Default)]
struct DebounceInner {
    /// Armed trailing-edge timer, if any.
    pending: Option<JoinHandle<()>>,
    /// Leading-edge suppression deadline, if armed.
    suppressed_until: Option<Instant>,
}

/// A per-binding debounce timer.
///
/// `schedule` replaces whatever was pending; the most recent closure is the
/// one that runs. Dropping the debouncer does not cancel an armed timer —
/// use [`Debouncer::cancel`] for that.
pub struct Debouncer {
    /// Quiet period.
    wait: Duration,
    /// Firing edge.
    mode: DebounceMode,
    /// Shared timer state.
    inner: Arc<Mutex<DebounceInner>>,
}

impl Debouncer {
    /// Creates a trailing-edge debouncer.
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self::with_mode(wait, DebounceMode::Trailing)
    }

    /// Creates a debouncer with an explicit mode.
    #[must_use]
    pub fn with_mode(wait: Duration, mode: DebounceMode) -> Self {
        Self {
            wait,
            mode,
            inner: Arc::new(Mutex::new(DebounceInner::default())),
        }
    }

    /// Returns the configured quiet period.
    #[inline]
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Returns `true` if a trailing-edge timer is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner
            .lock()
            .pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Schedules `action`, coalescing with any pending schedule.
    ///
    /// Trailing mode: cancels the armed timer and re-arms it around the new
    /// closure, so a burst collapses to one firing of the *last* closure.
    /// Leading mode: runs immediately unless inside the suppression window.
    ///
    /// Must be called within a tokio runtime.
    pub fn schedule<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        match self.mode {
            DebounceMode::Trailing => self.schedule_trailing(action),
            DebounceMode::Leading => self.schedule_leading(action),
        }
    }

    /// Cancels any armed trailing-edge timer without firing it.
    pub fn cancel(&self) {
        if let Some(handle) = self.inner.lock().pending.take() {
            handle.abort();
            trace!("Debounce timer cancelled");
        }
    }

    fn schedule_trailing<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut inner = self.inner.lock();

        if let Some(handle) = inner.pending.take() {
            handle.abort();
            trace!("Debounce timer restarted");
        }

        let wait = self.wait;
        let shared = Arc::clone(&self.inner);

        inner.pending = Some(tokio::spawn(async move {
            sleep(wait).await;
            // The wait has elapsed; from here the action is in flight and
            // no longer cancelable by a later schedule.
            shared.lock().pending = None;
            action().await;
        }));
    }

    fn schedule_leading<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let now = Instant::now();

        {
            let mut inner = self.inner.lock();
            if inner.suppressed_until.is_some_and(|until| now < until) {
                trace!("Leading-edge call suppressed");
                return;
            }
            inner.suppressed_until = Some(now + self.wait);
        }

        tokio::spawn(action());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::time::{advance, pause};

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    async fn settle() {
        // Let spawned timer tasks reach their sleep points.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_trailing_coalesces_to_last_call() {
        pause();
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let calls = counter();
        let last = Arc::new(AtomicUsize::new(0));

        for argument in 1..=3 {
            let calls = Arc::clone(&calls);
            let last = Arc::clone(&last);
            debouncer.schedule(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                last.store(argument, Ordering::SeqCst);
            });
            settle().await;
            advance(Duration::from_millis(50)).await;
        }

        // 50ms after the last call: still waiting.
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        advance(Duration::from_millis(60)).await;
        settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_trailing_fires_after_quiet_period() {
        pause();
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let calls = counter();

        let c = Arc::clone(&calls);
        debouncer.schedule(move || async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        settle().await;
        assert!(debouncer.is_pending());

        advance(Duration::from_millis(110)).await;
        settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test]
    async fn test_separate_debouncers_are_independent() {
        pause();
        let first = Debouncer::new(Duration::from_millis(100));
        let second = Debouncer::new(Duration::from_millis(100));
        let calls = counter();

        for debouncer in [&first, &second] {
            let c = Arc::clone(&calls);
            debouncer.schedule(move || async move {
                c.fetch_add(1, Ordering::SeqCst);
            });
            settle().await;
        }

        advance(Duration::from_millis(110)).await;
        settle().await;

        // Two bindings, two timers, two firings.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cancel_prevents_firing() {
        pause();
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let calls = counter();

        let c = Arc::clone(&calls);
        debouncer.schedule(move || async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        settle().await;
        debouncer.cancel();

        advance(Duration::from_millis(200)).await;
        settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_leading_fires_immediately_then_suppresses() {
        pause();
        let debouncer = Debouncer::with_mode(Duration::from_millis(100), DebounceMode::Leading);
        let calls = counter();

        for _ in 0..3 {
            let c = Arc::clone(&calls);
            debouncer.schedule(move || async move {
                c.fetch_add(1, Ordering::SeqCst);
            });
            settle().await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        advance(Duration::from_millis(110)).await;
        settle().await;

        let c = Arc::clone(&calls);
        debouncer.schedule(move || async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
