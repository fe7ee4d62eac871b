//! Cycle timestamps supplied by the host scheduler.

use std::time::Duration;

/// Timestamp of one control cycle.
///
/// Produced by the host's timing source and consumed read-only by the
/// execution hooks. `elapsed` is monotonic across the life of the loop;
/// `period` is the actual time since the previous cycle (the nominal cycle
/// time plus jitter), which integrating controllers should use as their step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTime {
    elapsed: Duration,
    period: Duration,
}

impl CycleTime {
    /// Create a timestamp from time-since-loop-start and the actual period.
    pub const fn new(elapsed: Duration, period: Duration) -> Self {
        Self { elapsed, period }
    }

    /// Monotonic time since the host loop started.
    #[inline]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Actual time since the previous cycle.
    #[inline]
    pub const fn period(&self) -> Duration {
        self.period
    }
}
