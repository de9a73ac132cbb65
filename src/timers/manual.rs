//! Deterministic virtual-clock timer host.

use super::host::{RevealToken, TimerHost, TimerId};
use std::collections::BTreeMap;
use std::time::Duration;

/// Timer host driven by explicit [`advance`](ManualTimerHost::advance) calls.
///
/// Timers fire in due-time order; timers due at the same instant fire in the
/// order they were scheduled.
///
/// # Example
///
/// ```
/// use showcase::timers::{ManualTimerHost, RevealToken, TimerHost};
/// use std::time::Duration;
///
/// let mut timers = ManualTimerHost::default();
/// let token = RevealToken { section: "faq".into(), item: "q1".into() };
/// let id = timers.schedule(Duration::from_millis(100), token.clone());
///
/// assert!(timers.advance(Duration::from_millis(99)).is_empty());
/// assert_eq!(timers.advance(Duration::from_millis(1)), vec![token]);
/// assert!(!timers.cancel(id));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualTimerHost {
    now: Duration,
    next_id: u64,
    // Keyed by (due, id) so iteration order is firing order.
    queue: BTreeMap<(Duration, TimerId), RevealToken>,
}

impl ManualTimerHost {
    /// Elapsed virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers not yet fired or cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest pending timer, relative to now.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue
            .keys()
            .next()
            .map(|(due, _)| due.saturating_sub(self.now))
    }

    /// Moves the clock forward and returns the tokens of every timer that came due.
    pub fn advance(&mut self, by: Duration) -> Vec<RevealToken> {
        self.now = self.now.saturating_add(by);

        let mut fired = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            fired.push(entry.remove());
        }

        tracing::trace!(now_ms = self.now.as_millis(), fired = fired.len(), "virtual clock advanced");
        fired
    }
}

impl TimerHost for ManualTimerHost {
    fn schedule(&mut self, delay: Duration, token: RevealToken) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.queue.insert((self.now.saturating_add(delay), id), token);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.queue.keys().find(|(_, timer)| *timer == id).copied();
        key.is_some_and(|key| self.queue.remove(&key).is_some())
    }
}
