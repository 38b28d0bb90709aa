#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep accumulator and one-shot timeline for the simulation.
//!
//! The caller feeds wall-clock time through [`SimulationClock::advance`], which
//! reports how many whole ticks elapsed. The timeline keeps advancing even when
//! the caller skips logical updates, so scheduled tasks still come due.

use std::{collections::BTreeMap, time::Duration};

use warp_adventure_core::TICK_DURATION;

/// Accumulates elapsed time into fixed ticks and releases scheduled tasks.
#[derive(Debug)]
pub struct SimulationClock<T> {
    tick_duration: Duration,
    accumulator: Duration,
    now: Duration,
    ticks: u64,
    timeline: BTreeMap<(Duration, u64), T>,
    next_sequence: u64,
}

impl<T> Default for SimulationClock<T> {
    fn default() -> Self {
        Self::new(TICK_DURATION)
    }
}

impl<T> SimulationClock<T> {
    /// Creates a clock emitting one tick per `tick_duration`.
    #[must_use]
    pub fn new(tick_duration: Duration) -> Self {
        Self {
            tick_duration,
            accumulator: Duration::ZERO,
            now: Duration::ZERO,
            ticks: 0,
            timeline: BTreeMap::new(),
            next_sequence: 0,
        }
    }

    /// Simulated time at which the given tick was released.
    #[must_use]
    pub fn tick_time(&self, tick: u64) -> Duration {
        let nanos = self.tick_duration.as_nanos().saturating_mul(u128::from(tick));
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Simulated time elapsed since the clock was created.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Total number of whole ticks released so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time accumulated towards the next tick.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Adds elapsed wall time and returns how many whole ticks it completed.
    ///
    /// Each completed tick is subtracted from the accumulator; the remainder
    /// carries over to the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.now = self.now.saturating_add(elapsed);
        if self.tick_duration.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(elapsed);
        let mut completed = 0;
        while self.accumulator >= self.tick_duration {
            self.accumulator -= self.tick_duration;
            completed += 1;
        }
        self.ticks = self.ticks.saturating_add(u64::from(completed));
        completed
    }

    /// Queues a one-shot task that comes due `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        self.schedule_from(self.now, delay, task);
    }

    /// Queues a one-shot task that comes due `delay` after `origin`.
    ///
    /// An origin in the past shortens the wait accordingly; a task already
    /// overdue drains on the next [`SimulationClock::drain_due`].
    pub fn schedule_from(&mut self, origin: Duration, delay: Duration, task: T) {
        let due = origin.saturating_add(delay);
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        let _ = self.timeline.insert((due, sequence), task);
    }

    /// Moves every task due at or before the current time into `out`.
    ///
    /// Tasks are yielded in due order; tasks due at the same instant keep
    /// their scheduling order.
    pub fn drain_due(&mut self, out: &mut Vec<T>) {
        let later = self
            .timeline
            .split_off(&(self.now.saturating_add(Duration::from_nanos(1)), 0));
        let due = std::mem::replace(&mut self.timeline, later);
        out.extend(due.into_values());
    }

    /// Number of tasks waiting on the timeline.
    #[must_use]
    pub fn scheduled(&self) -> usize {
        self.timeline.len()
    }
}
