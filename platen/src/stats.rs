//! # Stats Module - Speed and Accuracy
//!
//! Derives the session metrics from the current status array and the clock. Stats are
//! never authoritative: they can always be recomputed from the statuses and elapsed time.
//!
//! ## Formulas
//!
//! ```text
//! elapsed minutes = (total - remaining) / 60
//! WPM             = round(correct / 5 / elapsed minutes)      0 if no time has passed
//! accuracy        = round(correct / (correct + incorrect) * 100)  0 if nothing was typed
//! ```

use serde::Serialize;

use crate::diff::{self, CharacterStatus, Status};
use crate::{AVERAGE_WORD_LENGTH, Seconds};

/// Snapshot of the session metrics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Characters currently graded correct
    pub correct_letters: usize,
    /// Characters currently graded incorrect
    pub incorrect_letters: usize,
    /// Correct characters per minute, in five-character words
    pub words_per_minute: u32,
}

impl Stats {
    /// Compute the stats for `statuses` after `total - remaining` seconds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use platen::diff::diff;
    /// use platen::stats::Stats;
    ///
    /// let statuses = diff("hello world", "hello world");
    /// let stats = Stats::compute(&statuses, 60, 30);
    /// assert_eq!(stats.correct_letters, 11);
    /// assert_eq!(stats.words_per_minute, 4); // 11 / 5 / 0.5 = 4.4
    /// assert_eq!(stats.accuracy(), 100);
    /// ```
    pub fn compute(statuses: &[CharacterStatus], total: Seconds, remaining: Seconds) -> Self {
        let correct_letters = diff::count(statuses, Status::Correct);
        let incorrect_letters = diff::count(statuses, Status::Incorrect);

        Self {
            correct_letters,
            incorrect_letters,
            words_per_minute: words_per_minute(correct_letters, total.saturating_sub(remaining)),
        }
    }

    /// Percentage of typed characters that are correct
    pub fn accuracy(&self) -> u32 {
        accuracy(self.correct_letters, self.incorrect_letters)
    }

    /// Characters that have been graded either way
    pub const fn typed_letters(&self) -> usize {
        self.correct_letters + self.incorrect_letters
    }
}

/// Words per minute for `correct_letters` typed over `elapsed` seconds
pub fn words_per_minute(correct_letters: usize, elapsed: Seconds) -> u32 {
    if elapsed == 0 {
        return 0;
    }

    let minutes = crate::minutes(elapsed);
    let words = correct_letters as f64 / AVERAGE_WORD_LENGTH as f64;
    (words / minutes).round() as u32
}

/// Rounded percentage of correct characters among all graded characters
pub fn accuracy(correct_letters: usize, incorrect_letters: usize) -> u32 {
    let typed = correct_letters + incorrect_letters;
    if typed == 0 {
        return 0;
    }

    (correct_letters as f64 / typed as f64 * 100.0).round() as u32
}
