//! # Platen - A typing-session engine
//!
//! Platen tracks a single timed typing-practice session: given a fixed target text and a
//! stream of input events, it keeps per-character correctness, the cursor position, a
//! countdown clock and the derived performance metrics up to date.
//!
//! The crate renders nothing. A front end feeds it raw input buffers and clock ticks and
//! reads back a [`Snapshot`](session::Snapshot) after every event.
//!
//! ## Components
//!
//! - [`word_index`]: flat-offset word boundaries and cursor resolution
//! - [`diff`]: per-character status computation
//! - [`tally`]: cumulative per-key success/failure counters
//! - [`timer`]: the countdown state machine and its tick scheduler
//! - [`stats`]: words-per-minute and accuracy
//! - [`session`]: the controller composing all of the above
//! - [`source`]: the seam for target-text providers
//!
//! ## Usage
//!
//! ```rust
//! use platen::{InputEvent, TypingSession};
//!
//! let mut session = TypingSession::new("cat dog", 30).unwrap();
//!
//! session.on_input(InputEvent::typed("ca"));
//! assert!(session.state().has_started);
//!
//! for _ in 0..30 {
//!     session.on_tick();
//! }
//! assert!(!session.state().is_active);
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod session;
pub mod source;
pub mod stats;
pub mod tally;
pub mod timer;
pub mod word_index;

pub use config::Configuration;
pub use diff::{CharacterStatus, Status};
pub use error::SessionError;
pub use session::{InputEvent, SessionState, Snapshot, TypingSession};
pub use source::{Paragraphs, TextSource};
pub use stats::Stats;
pub use tally::{Keystroke, KeystrokeTally};
pub use timer::{TickOutcome, Ticker, Timer, TimerState};
pub use word_index::{Cursor, WordIndex};

/// The number of characters that make up one "word" in words-per-minute.
pub const AVERAGE_WORD_LENGTH: usize = 5;

/// Whole seconds, as counted by the session clock.
pub type Seconds = u32;

type Minutes = f64;

// Get the minutes elapsed from a number of seconds
pub(crate) fn minutes(seconds: Seconds) -> Minutes {
    f64::from(seconds) / 60.0
}
