//! # Configuration Module - Session Defaults
//!
//! Settings that shape a session without being part of its state.
//!
//! ## Usage
//!
//! ```rust
//! use platen::config::Configuration;
//! use platen::TypingSession;
//!
//! let config = Configuration {
//!     total_time: 30,
//!     ..Configuration::default()
//! };
//!
//! let session = TypingSession::with_configuration("hello world", config).unwrap();
//! assert_eq!(session.state().total_time, 30);
//! ```

use web_time::Duration;

use crate::Seconds;

/// Runtime configuration for a typing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Length of a session in seconds
    ///
    /// **Default**: 60 seconds
    pub total_time: Seconds,

    /// Amounts of time a front end offers for extending a session
    ///
    /// **Default**: 30 and 60 seconds
    pub extend_presets: Vec<Seconds>,

    /// Wall-clock time between two ticks of the session clock
    ///
    /// Each tick takes one second off the countdown. Only change this for testing or
    /// slow-motion practice.
    ///
    /// **Default**: 1 second
    pub tick_interval: Duration,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            total_time: 60,
            extend_presets: vec![30, 60],
            tick_interval: Duration::from_secs(1),
        }
    }
}
