//! Cancelable one-shot timers.
//!
//! Controllers ask a [`Scheduler`] for a timer and get a [`TimerHandle`]
//! back. When the timer comes due the host hands the same handle to the
//! owning controller. Cancelled handles are never delivered.

use std::collections::BTreeSet;
use std::time::Duration;

/// Identity of one scheduled timer. Never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Source of one-shot timers.
pub trait Scheduler {
    /// Schedules a one-shot timer firing after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Cancels a pending timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing fires on its own: call [`ManualScheduler::advance`] and deliver
/// the returned handles.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    /// Ordered by (deadline, handle) so ties fire in schedule order.
    pending: BTreeSet<(Duration, TimerHandle)>,
}

impl ManualScheduler {
    /// Creates a scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if `handle` is still pending.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|(_, h)| *h == handle)
    }

    /// Advances the clock and returns every handle that came due, in
    /// deadline order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        self.now += by;
        let mut fired = Vec::new();
        while let Some(&(deadline, handle)) = self.pending.first() {
            if deadline > self.now {
                break;
            }
            self.pending.pop_first();
            fired.push(handle);
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.insert((self.now + delay, handle));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(_, h)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_deadline() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(100));

        assert!(scheduler.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![handle]);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_cancelled_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let cancelled = scheduler.schedule(Duration::from_millis(10));
        let kept = scheduler.schedule(Duration::from_millis(20));

        scheduler.cancel(cancelled);
        assert!(!scheduler.is_pending(cancelled));

        assert_eq!(scheduler.advance(Duration::from_secs(1)), vec![kept]);
    }

    #[test]
    fn test_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.schedule(Duration::from_millis(50));
        let early = scheduler.schedule(Duration::from_millis(5));
        let tie = scheduler.schedule(Duration::from_millis(50));

        assert_eq!(scheduler.advance(Duration::from_millis(60)), vec![early, late, tie]);
        assert_eq!(scheduler.now(), Duration::from_millis(60));
    }
}
