//! # Session Module - Typing Session Controller
//!
//! Owns every piece of session state and is the only place it changes. A front end feeds
//! it three kinds of events and reads back a [Snapshot] after each of them:
//!
//! - [`on_input`](TypingSession::on_input): the whole input buffer after an edit
//! - [`on_tick`](TypingSession::on_tick): one second of the countdown has passed
//! - [`reset`](TypingSession::reset): start over with a new text
//!
//! ## Event Flow
//!
#![doc = simple_mermaid::mermaid!("../diagrams/session_flow.mmd")]
//!
//! ## Usage Example
//!
//! ```rust
//! use platen::{Cursor, InputEvent, Status, TypingSession};
//!
//! let mut session = TypingSession::new("cat dog", 60).unwrap();
//!
//! for buffer in ["c", "ca", "cat", "cat ", "cat d"] {
//!     session.on_input(InputEvent::typed(buffer));
//! }
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.cursor, Cursor { word_index: 1, letter_index: 1 });
//! assert_eq!(snapshot.stats.correct_letters, 5);
//! assert_eq!(snapshot.character_statuses[5].status, Status::Untyped);
//! ```
//!
//! ## Driving the clock
//!
//! Front ends either call [`on_tick`](TypingSession::on_tick) from their own 1 Hz timer, or
//! let the session schedule ticks and call [`poll_ticks`](TypingSession::poll_ticks) from
//! their event loop:
//!
//! ```rust
//! use platen::{InputEvent, TypingSession};
//! use web_time::{Duration, Instant};
//!
//! let mut session = TypingSession::new("hello", 3).unwrap();
//! let start = Instant::now();
//!
//! session.on_input(InputEvent::typed("h"));
//! session.poll_ticks(start); // arms the scheduler
//!
//! assert_eq!(session.poll_ticks(start + Duration::from_secs(2)), 2);
//! assert_eq!(session.state().time_remaining, 1);
//! ```

use serde::Serialize;
use web_time::{Duration, Instant};

use crate::config::Configuration;
use crate::diff::{self, CharacterStatus};
use crate::error::SessionError;
use crate::stats::Stats;
use crate::tally::KeystrokeTally;
use crate::timer::{TickOutcome, Ticker, Timer, TimerState};
use crate::word_index::{Cursor, WordIndex};
use crate::Seconds;

/// A raw edit of the input control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    /// The full contents of the input after the edit
    pub value: String,
    /// Flat caret position inside `value`, in characters
    pub cursor_offset: usize,
}

impl InputEvent {
    pub fn new(value: impl Into<String>, cursor_offset: usize) -> Self {
        Self {
            value: value.into(),
            cursor_offset,
        }
    }

    /// An edit that leaves the caret at the end of `value`
    pub fn typed(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor_offset = value.chars().count();
        Self {
            value,
            cursor_offset,
        }
    }
}

/// Lifecycle flags and clock of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// False once the clock has run out
    pub is_active: bool,
    /// True from the first non-empty input onwards
    pub has_started: bool,
    pub time_remaining: Seconds,
    pub total_time: Seconds,
}

/// Read-only view of a session for the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot<'a> {
    pub character_statuses: &'a [CharacterStatus],
    pub cursor: Cursor,
    pub session_state: SessionState,
    pub stats: Stats,
    pub keystroke_tally: &'a KeystrokeTally,
}

/// A single timed typing session
///
/// # Thread Safety
///
/// A session is a plain value with no interior mutability. Input events and ticks are
/// applied one at a time through `&mut self`, so they can never interleave.
#[derive(Debug, Clone)]
pub struct TypingSession {
    target: String,
    word_index: WordIndex,
    statuses: Vec<CharacterStatus>,
    input: String,
    cursor: Cursor,
    timer: Timer,
    ticker: Ticker,
    stats: Stats,
    tally: KeystrokeTally,
    config: Configuration,
}

impl TypingSession {
    /// Create a session over `target` lasting `total_time` seconds
    ///
    /// # Errors
    ///
    /// Fails if `target` is empty or `total_time` is zero.
    ///
    /// ```rust
    /// use platen::{SessionError, TypingSession};
    ///
    /// assert_eq!(TypingSession::new("", 60).unwrap_err(), SessionError::EmptyText);
    /// assert_eq!(TypingSession::new("hi", 0).unwrap_err(), SessionError::ZeroDuration);
    /// ```
    pub fn new(target: &str, total_time: Seconds) -> Result<Self, SessionError> {
        Self::with_configuration(
            target,
            Configuration {
                total_time,
                ..Configuration::default()
            },
        )
    }

    /// Create a session using the duration and tick interval from `config`
    pub fn with_configuration(target: &str, config: Configuration) -> Result<Self, SessionError> {
        if target.is_empty() {
            return Err(SessionError::EmptyText);
        }
        if config.total_time == 0 {
            return Err(SessionError::ZeroDuration);
        }
        if target.starts_with(' ') || target.ends_with(' ') {
            tracing::warn!("target text begins or ends with a space");
        }

        let word_index = WordIndex::new(target);
        tracing::debug!(
            characters = word_index.text_len(),
            words = word_index.word_count(),
            total_time = config.total_time,
            "session created"
        );

        Ok(Self {
            target: target.to_string(),
            word_index,
            statuses: diff::untyped(target),
            input: String::new(),
            cursor: Cursor::default(),
            timer: Timer::new(config.total_time),
            ticker: Ticker::new(config.tick_interval),
            stats: Stats::default(),
            tally: KeystrokeTally::new(),
            config,
        })
    }

    /// Apply an edit of the input control.
    ///
    /// The first non-empty input starts the clock. Once the clock has run out, events are
    /// ignored. Returns `true` if the event was applied.
    pub fn on_input(&mut self, event: InputEvent) -> bool {
        let InputEvent {
            value,
            cursor_offset,
        } = event;

        if !value.is_empty() {
            self.timer.start();
        }

        if !self.timer.is_active() {
            tracing::trace!("input ignored, session has ended");
            return false;
        }

        self.cursor = self.word_index.resolve(cursor_offset);
        self.statuses = diff::diff(&self.target, &value);
        let keystroke = self.tally.on_input_change(&self.input, &value, &self.target);
        self.input = value;
        self.stats = self.compute_stats();

        tracing::trace!(
            input_len = self.input.chars().count(),
            ?keystroke,
            "input applied"
        );
        true
    }

    /// Count down one second.
    ///
    /// When this tick ends the session, the stats are frozen against the full duration and
    /// the tick scheduler is cancelled.
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.timer.tick();

        if outcome == TickOutcome::Ended {
            self.ticker.cancel();
            self.stats = self.compute_stats();
            tracing::debug!(
                wpm = self.stats.words_per_minute,
                accuracy = self.stats.accuracy(),
                "session ended"
            );
        }

        outcome
    }

    /// Apply every tick that has fallen due by `now`.
    ///
    /// The scheduler is armed by the first poll after the clock starts, and cancelled when
    /// the session ends. Returns the number of ticks applied.
    pub fn poll_ticks(&mut self, now: Instant) -> u32 {
        if self.timer.state() != TimerState::Running {
            self.ticker.cancel();
            return 0;
        }

        self.ticker.arm(now);

        let mut applied = 0;
        for _ in 0..self.ticker.poll(now) {
            applied += 1;
            if self.on_tick() == TickOutcome::Ended {
                break;
            }
        }
        applied
    }

    /// Time until the next scheduled tick, if the scheduler is armed
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    /// Add `delta` seconds to the clock.
    ///
    /// Extending never re-arms the first-keystroke gate: a running session keeps running. An
    /// ended session cannot be extended. Returns `true` if time was added.
    pub fn extend(&mut self, delta: Seconds) -> bool {
        self.timer.extend(delta)
    }

    /// Replace this session with a fresh one over `target` lasting `total_time` seconds.
    ///
    /// Everything is rebuilt, including the tally and the tick scheduler. On error the
    /// current session is left as it was.
    pub fn reset(&mut self, target: &str, total_time: Seconds) -> Result<(), SessionError> {
        let config = Configuration {
            total_time,
            ..self.config.clone()
        };
        *self = Self::with_configuration(target, config)?;
        tracing::debug!("session reset");
        Ok(())
    }

    /// The read model for the rendering layer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            character_statuses: &self.statuses,
            cursor: self.cursor,
            session_state: self.state(),
            stats: self.stats,
            keystroke_tally: &self.tally,
        }
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            is_active: self.timer.is_active(),
            has_started: self.timer.has_started(),
            time_remaining: self.timer.remaining(),
            total_time: self.timer.total(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn statuses(&self) -> &[CharacterStatus] {
        &self.statuses
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn stats(&self) -> Stats {
        self.stats
    }

    pub const fn tally(&self) -> &KeystrokeTally {
        &self.tally
    }

    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    pub const fn word_index(&self) -> &WordIndex {
        &self.word_index
    }

    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Flat offset of the cursor
    pub fn cursor_offset(&self) -> usize {
        self.word_index.flat_offset(self.cursor)
    }

    fn compute_stats(&self) -> Stats {
        Stats::compute(&self.statuses, self.timer.total(), self.timer.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Status;
    use std::collections::BTreeMap;

    fn type_all(session: &mut TypingSession, buffers: &[&str]) {
        for buffer in buffers {
            session.on_input(InputEvent::typed(*buffer));
        }
    }

    #[test]
    fn test_new_session_state() {
        let session = TypingSession::new("cat dog", 30).unwrap();

        assert_eq!(
            session.state(),
            SessionState {
                is_active: true,
                has_started: false,
                time_remaining: 30,
                total_time: 30,
            }
        );
        assert_eq!(session.statuses().len(), 7);
        assert!(
            session
                .statuses()
                .iter()
                .all(|entry| entry.status == Status::Untyped)
        );
        assert_eq!(session.cursor(), Cursor::default());
        assert_eq!(session.stats(), Stats::default());
        assert!(session.tally().is_empty());
    }

    #[test]
    fn test_end_to_end_cat_dog() {
        let mut session = TypingSession::new("cat dog", 60).unwrap();
        type_all(&mut session, &["c", "ca", "cat", "cat ", "cat d"]);

        let statuses = session.statuses();
        assert_eq!(statuses.len(), 7);
        assert!(statuses[..5].iter().all(|entry| entry.status == Status::Correct));
        assert_eq!(statuses[3].character, ' ');
        assert!(statuses[5..].iter().all(|entry| entry.status == Status::Untyped));
        assert_eq!(
            session.cursor(),
            Cursor {
                word_index: 1,
                letter_index: 1
            }
        );
        assert_eq!(session.cursor_offset(), 5);
        assert_eq!(session.tally().total_asserts(), 5);
        assert_eq!(session.stats().correct_letters, 5);
        // No time has passed yet
        assert_eq!(session.stats().words_per_minute, 0);
    }

    #[test]
    fn test_tally_scenario() {
        let mut session = TypingSession::new("cat", 60).unwrap();
        type_all(&mut session, &["c", "cx"]);

        assert_eq!(session.tally().asserts(), &BTreeMap::from([('c', 1)]));
        assert_eq!(session.tally().fails(), &BTreeMap::from([('x', 1)]));
    }

    #[test]
    fn test_backspace_recomputes_statuses() {
        let mut session = TypingSession::new("cat", 60).unwrap();
        type_all(&mut session, &["c", "cx", "c"]);

        assert_eq!(session.statuses()[1].status, Status::Untyped);
        assert_eq!(session.stats().incorrect_letters, 0);
        // The mistake stays in the tally
        assert_eq!(session.tally().fails_for('x'), 1);
    }

    #[test]
    fn test_paste_regrades_but_skips_tally() {
        let mut session = TypingSession::new("cat dog", 60).unwrap();
        session.on_input(InputEvent::typed("cat dox"));

        assert_eq!(session.stats().correct_letters, 6);
        assert_eq!(session.stats().incorrect_letters, 1);
        assert!(session.tally().is_empty());
    }

    #[test]
    fn test_empty_input_does_not_start() {
        let mut session = TypingSession::new("cat", 60).unwrap();
        assert!(session.on_input(InputEvent::typed("")));
        assert!(!session.state().has_started);

        session.on_input(InputEvent::typed("c"));
        assert!(session.state().has_started);

        // Clearing the input does not un-start the session
        session.on_input(InputEvent::typed(""));
        assert!(session.state().has_started);
    }

    #[test]
    fn test_ticks_before_first_input_are_ignored() {
        let mut session = TypingSession::new("cat", 5).unwrap();
        for _ in 0..10 {
            assert_eq!(session.on_tick(), TickOutcome::Ignored);
        }
        assert_eq!(session.state().time_remaining, 5);
        assert!(session.state().is_active);
    }

    #[test]
    fn test_session_ends_after_last_tick() {
        let mut session = TypingSession::new("cat dog", 30).unwrap();
        session.on_input(InputEvent::typed("c"));

        for _ in 0..29 {
            session.on_tick();
            assert!(session.state().is_active);
        }

        assert_eq!(session.on_tick(), TickOutcome::Ended);
        assert!(!session.state().is_active);
        assert_eq!(session.state().time_remaining, 0);
    }

    #[test]
    fn test_final_stats_are_frozen() {
        let mut session = TypingSession::new("aaaaaaaaaa", 60).unwrap();
        session.on_input(InputEvent::typed("aaaaaaaaaa"));

        for _ in 0..60 {
            session.on_tick();
        }

        // 10 correct characters over one minute
        assert_eq!(session.stats().words_per_minute, 2);

        let before = session.snapshot().stats;
        assert!(!session.on_input(InputEvent::typed("aaaaaaaaa")));
        assert_eq!(session.stats(), before);
        assert_eq!(session.input(), "aaaaaaaaaa");
        assert_eq!(session.statuses()[9].status, Status::Correct);
    }

    #[test]
    fn test_extend_mid_session_keeps_started() {
        let mut session = TypingSession::new("cat", 30).unwrap();
        session.on_input(InputEvent::typed("c"));
        session.on_tick();

        assert!(session.extend(30));
        let state = session.state();
        assert!(state.has_started);
        assert!(state.is_active);
        assert_eq!(state.total_time, 60);
        assert_eq!(state.time_remaining, 59);

        // The clock keeps running without another keystroke
        assert_eq!(session.on_tick(), TickOutcome::Running { remaining: 58 });
    }

    #[test]
    fn test_extend_after_end_is_rejected() {
        let mut session = TypingSession::new("cat", 1).unwrap();
        session.on_input(InputEvent::typed("c"));
        session.on_tick();

        assert!(!session.extend(60));
        assert!(!session.state().is_active);
        assert_eq!(session.state().time_remaining, 0);
    }

    #[test]
    fn test_reset_builds_fresh_state() {
        let mut session = TypingSession::new("cat", 2).unwrap();
        type_all(&mut session, &["c", "cx"]);
        session.on_tick();
        session.on_tick();
        assert!(!session.state().is_active);

        session.reset("dog fish", 45).unwrap();

        assert_eq!(session.target(), "dog fish");
        assert_eq!(session.input(), "");
        assert_eq!(session.statuses(), diff::untyped("dog fish").as_slice());
        assert_eq!(session.cursor(), Cursor::default());
        assert_eq!(session.stats(), Stats::default());
        assert!(session.tally().is_empty());
        assert_eq!(session.word_index().boundaries(), &[0, 4]);
        assert_eq!(
            session.state(),
            SessionState {
                is_active: true,
                has_started: false,
                time_remaining: 45,
                total_time: 45,
            }
        );
    }

    #[test]
    fn test_failed_reset_keeps_session() {
        let mut session = TypingSession::new("cat", 30).unwrap();
        session.on_input(InputEvent::typed("c"));

        assert_eq!(session.reset("", 30), Err(SessionError::EmptyText));
        assert_eq!(session.reset("dog", 0), Err(SessionError::ZeroDuration));
        assert_eq!(session.target(), "cat");
        assert_eq!(session.input(), "c");
    }

    #[test]
    fn test_input_past_target_clamps_cursor() {
        let mut session = TypingSession::new("ab cd", 30).unwrap();
        session.on_input(InputEvent::typed("ab cdxyz"));

        assert_eq!(
            session.cursor(),
            Cursor {
                word_index: 1,
                letter_index: 2
            }
        );
        assert_eq!(session.statuses().len(), 5);
        assert_eq!(session.stats().correct_letters, 5);
    }

    #[test]
    fn test_caret_inside_buffer() {
        let mut session = TypingSession::new("ab cd", 30).unwrap();
        session.on_input(InputEvent::new("ab c", 1));

        assert_eq!(
            session.cursor(),
            Cursor {
                word_index: 0,
                letter_index: 1
            }
        );
    }

    #[test]
    fn test_poll_ticks_drives_the_clock() {
        let mut session = TypingSession::new("hello", 3).unwrap();
        let start = Instant::now();

        // Nothing is scheduled before the first keystroke
        assert_eq!(session.poll_ticks(start + Duration::from_secs(5)), 0);
        assert_eq!(session.next_tick_in(start), None);

        session.on_input(InputEvent::typed("h"));
        assert_eq!(session.poll_ticks(start), 0);
        assert_eq!(session.next_tick_in(start), Some(Duration::from_secs(1)));

        // Catching up past the end stops at the final tick
        assert_eq!(session.poll_ticks(start + Duration::from_secs(10)), 3);
        assert!(!session.state().is_active);
        assert_eq!(session.next_tick_in(start), None);
    }

    #[test]
    fn test_huge_tick_interval_never_ticks() {
        let config = Configuration {
            total_time: 5,
            tick_interval: Duration::MAX,
            ..Configuration::default()
        };
        let mut session = TypingSession::with_configuration("hello", config).unwrap();
        let start = Instant::now();

        session.on_input(InputEvent::typed("h"));
        assert_eq!(session.poll_ticks(start), 0);
        assert_eq!(session.poll_ticks(start + Duration::from_secs(60)), 0);
        assert_eq!(session.state().time_remaining, 5);
        assert!(session.state().is_active);
    }

    #[test]
    fn test_reset_cancels_scheduled_ticks() {
        let mut session = TypingSession::new("hello", 30).unwrap();
        let start = Instant::now();
        session.on_input(InputEvent::typed("h"));
        session.poll_ticks(start);

        session.reset("world", 30).unwrap();

        assert_eq!(session.next_tick_in(start), None);
        assert_eq!(session.poll_ticks(start + Duration::from_secs(3)), 0);
        assert_eq!(session.state().time_remaining, 30);
    }

    #[test]
    fn test_reset_keeps_configuration() {
        let config = Configuration {
            total_time: 10,
            extend_presets: vec![15],
            tick_interval: Duration::from_millis(250),
        };
        let mut session = TypingSession::with_configuration("hello", config).unwrap();
        session.reset("world", 20).unwrap();

        assert_eq!(session.config().extend_presets, vec![15]);
        assert_eq!(session.config().tick_interval, Duration::from_millis(250));
        assert_eq!(session.config().total_time, 20);
    }
}
