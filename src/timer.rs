//! Cancellable periodic timers, driven by a pluggable clock.

use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimerHandle(u64);

/// The timer service the game loop schedules its ticks on.
pub trait Scheduler {
    /// Starts a timer that fires every `period`, first after one full period.
    fn schedule(&mut self, period: Duration) -> TimerHandle;

    /// Stops a timer. Cancelling an unknown or already cancelled handle does nothing.
    fn cancel(&mut self, handle: TimerHandle);

    /// Consumes one elapsed firing, earliest deadline first.
    fn next_fired(&mut self) -> Option<TimerHandle>;

    /// Time left until the next firing, or `None` when no timer is active.
    fn until_next(&self) -> Option<Duration>;
}

pub trait Clock {
    /// Time elapsed since some fixed origin.
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock { origin: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

struct Entry {
    handle: TimerHandle,
    period: Duration,
    due: Duration,
}

pub struct PeriodicTimer<C: Clock> {
    clock: C,
    entries: Vec<Entry>,
    next_id: u64,
}

impl<C: Clock> PeriodicTimer<C> {
    pub fn new(clock: C) -> Self {
        PeriodicTimer { clock, entries: vec![], next_id: 0 }
    }
}

impl<C: Clock> Scheduler for PeriodicTimer<C> {
    fn schedule(&mut self, period: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let due = self.clock.now() + period;
        self.entries.push(Entry { handle, period, due });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|entry| entry.handle != handle);
    }

    fn next_fired(&mut self) -> Option<TimerHandle> {
        let now = self.clock.now();
        let entry = self.entries.iter_mut()
            .filter(|entry| entry.due <= now)
            .min_by_key(|entry| entry.due)?;

        // Missed periods are fired one by one on subsequent calls
        entry.due += entry.period;
        Some(entry.handle)
    }

    fn until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.entries.iter()
            .map(|entry| entry.due.checked_sub(now).unwrap_or_default())
            .min()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use std::{cell::Cell, rc::Rc, time::Duration};

    use super::Clock;

    /// A clock that only moves when told to. Clones share the same time.
    #[derive(Clone, Default)]
    pub struct ManualClock {
        now: Rc<Cell<Duration>>,
    }

    impl ManualClock {
        pub fn advance(&self, millis: u64) {
            self.now.set(self.now.get() + Duration::from_millis(millis));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            self.now.get()
        }
    }
}
