//! # Timer Module - Session Countdown
//!
//! A countdown clock measured in whole seconds. It stays idle until the first keystroke,
//! counts down once per tick, and ends for good when it reaches zero.
//!
//! ## States
//!
#![doc = simple_mermaid::mermaid!("../diagrams/timer_states.mmd")]
//!
//! Ticks are produced by a [Ticker]: a deadline scheduler the owner polls with the current
//! time. Cancelling it drops the pending deadline, so a superseded session never sees a
//! stale tick.
//!
//! ## Usage
//!
//! ```rust
//! use platen::timer::{TickOutcome, Timer, TimerState};
//!
//! let mut timer = Timer::new(2);
//! assert_eq!(timer.tick(), TickOutcome::Ignored); // not started yet
//!
//! timer.start();
//! assert_eq!(timer.tick(), TickOutcome::Running { remaining: 1 });
//! assert_eq!(timer.tick(), TickOutcome::Ended);
//! assert_eq!(timer.state(), TimerState::Ended);
//! ```

use serde::Serialize;
use web_time::{Duration, Instant};

use crate::Seconds;

/// Where the countdown is in its lifecycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Waiting for the first keystroke
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Reached zero. Terminal.
    Ended,
}

/// What a single tick did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is not running
    Ignored,
    /// One second passed and time is left
    Running { remaining: Seconds },
    /// The final second passed
    Ended,
}

/// The session countdown
///
/// Keeps `0 <= remaining <= total`, and `remaining == 0` exactly when the timer has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    state: TimerState,
    total: Seconds,
    remaining: Seconds,
}

impl Timer {
    /// Create an idle timer.
    ///
    /// A timer with no time on it starts out ended.
    pub fn new(total: Seconds) -> Self {
        let state = if total == 0 {
            TimerState::Ended
        } else {
            TimerState::Idle
        };

        Self {
            state,
            total,
            remaining: total,
        }
    }

    pub const fn state(&self) -> TimerState {
        self.state
    }

    pub const fn total(&self) -> Seconds {
        self.total
    }

    pub const fn remaining(&self) -> Seconds {
        self.remaining
    }

    pub const fn elapsed(&self) -> Seconds {
        self.total - self.remaining
    }

    /// True until the countdown has reached zero
    pub fn is_active(&self) -> bool {
        self.state != TimerState::Ended
    }

    /// True once the first keystroke has been seen
    pub fn has_started(&self) -> bool {
        self.state != TimerState::Idle
    }

    /// Move from idle to running.
    ///
    /// Returns `true` if this call started the timer.
    pub fn start(&mut self) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.state = TimerState::Running;
        tracing::debug!(total = self.total, "timer started");
        true
    }

    /// Count down one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Ignored;
        }

        if self.remaining <= 1 {
            self.remaining = 0;
            self.state = TimerState::Ended;
            tracing::debug!(total = self.total, "timer ended");
            return TickOutcome::Ended;
        }

        self.remaining -= 1;
        TickOutcome::Running {
            remaining: self.remaining,
        }
    }

    /// Add `delta` seconds to both the total and the remaining time.
    ///
    /// Does not touch the started state: extending a running timer keeps it running, and an
    /// idle timer still waits for the first keystroke. An ended timer cannot be extended.
    ///
    /// Returns `true` if time was added.
    pub fn extend(&mut self, delta: Seconds) -> bool {
        if self.state == TimerState::Ended || delta == 0 {
            return false;
        }

        self.total = self.total.saturating_add(delta);
        self.remaining = self.remaining.saturating_add(delta);
        tracing::debug!(
            delta,
            total = self.total,
            remaining = self.remaining,
            "timer extended"
        );
        true
    }
}

/// A cancellable fixed-interval deadline scheduler
///
/// The ticker never sleeps or spawns anything. Its owner polls it with the current time and
/// receives the number of whole intervals that have passed since the last poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl Ticker {
    /// Create a disarmed ticker.
    ///
    /// Intervals shorter than a millisecond are raised to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_deadline: None,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn is_armed(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// Schedule the first deadline one interval after `now`. Does nothing if already armed.
    ///
    /// A deadline that cannot be represented never fires.
    pub fn arm(&mut self, now: Instant) {
        if self.next_deadline.is_none() {
            self.next_deadline = now.checked_add(self.interval);
        }
    }

    /// Drop the pending deadline
    pub fn cancel(&mut self) {
        self.next_deadline = None;
    }

    /// Count the deadlines that have passed by `now` and schedule the next one.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.next_deadline else {
            return 0;
        };

        if now < deadline {
            return 0;
        }

        let behind = now.duration_since(deadline).as_nanos() / self.interval.as_nanos();
        let fired = u32::try_from(behind).unwrap_or(u32::MAX - 1) + 1;
        self.next_deadline = self
            .interval
            .checked_mul(fired)
            .and_then(|step| deadline.checked_add(step));
        fired
    }

    /// How long until the next deadline, if armed
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
