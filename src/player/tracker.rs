//! Position tracker: a deadline-driven tick source the runtime loop polls.
//!
//! The tracker owns no thread. The loop sleeps until [`PositionTracker::deadline`]
//! and then calls [`PositionTracker::poll`], which reports how many whole
//! intervals elapsed since the last tick.

use std::time::{Duration, Instant};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Tick {
    /// Whole intervals elapsed; 0 when the deadline has not passed.
    pub elapsed: u32,
    /// Set when this poll crossed a reconciliation boundary.
    pub reconcile: bool,
}

#[derive(Debug, Clone)]
pub struct PositionTracker {
    interval: Duration,
    reconcile_every: u32,
    next_tick: Option<Instant>,
    ticks: u64,
}

impl PositionTracker {
    /// `reconcile_every == 0` disables reconciliation.
    pub fn new(interval: Duration, reconcile_every: u32) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            reconcile_every,
            next_tick: None,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// When the next tick is due, if running.
    pub fn deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Start ticking one interval from `now`. Already running: no-op,
    /// returns `false`.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.next_tick.is_some() {
            return false;
        }
        self.next_tick = Some(now.checked_add(self.interval).unwrap_or(now));
        true
    }

    /// Safe to call when not running.
    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn poll(&mut self, now: Instant) -> Tick {
        let Some(deadline) = self.next_tick else {
            return Tick::default();
        };
        if now < deadline {
            return Tick::default();
        }

        let behind = now.duration_since(deadline).as_nanos() / self.interval.as_nanos();
        let elapsed = u32::try_from(behind).unwrap_or(u32::MAX - 1) + 1;
        self.next_tick = Some(
            deadline
                .checked_add(self.interval.saturating_mul(elapsed))
                .unwrap_or(now + self.interval),
        );

        let before = self.ticks;
        self.ticks = self.ticks.saturating_add(u64::from(elapsed));
        let reconcile = self.reconcile_every > 0 && {
            let every = u64::from(self.reconcile_every);
            before / every != self.ticks / every
        };

        Tick { elapsed, reconcile }
    }
}
