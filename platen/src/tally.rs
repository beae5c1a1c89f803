//! # Tally Module - Cumulative Keystroke Counters
//!
//! Keeps two per-character counters for a session, used to drive a keyboard heatmap:
//!
//! - **asserts**: how often each target character was typed correctly
//! - **fails**: how often each physical key produced a wrong character
//!
//! Only single-character appends are counted. Pastes and deletions still regrade the text
//! (see [`diff`](crate::diff)) but leave the tally alone. Counters only ever grow: fixing a
//! mistake later does not take the failure back.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single graded keystroke derived from two consecutive input buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    /// The expected character was typed
    Assert(char),
    /// A wrong character was typed. Holds the character actually produced.
    Fail(char),
}

impl Keystroke {
    /// Derive the keystroke that turned `previous` into `current`.
    ///
    /// Returns `None` unless `current` is exactly one character longer than `previous`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use platen::tally::Keystroke;
    ///
    /// assert_eq!(Keystroke::between("c", "cx", "cat"), Some(Keystroke::Fail('x')));
    /// assert_eq!(Keystroke::between("", "c", "cat"), Some(Keystroke::Assert('c')));
    /// assert_eq!(Keystroke::between("", "ca", "cat"), None);
    /// ```
    pub fn between(previous: &str, current: &str, target: &str) -> Option<Self> {
        let index = previous.chars().count();
        if current.chars().count() != index + 1 {
            return None;
        }

        let typed = current.chars().nth(index)?;
        match target.chars().nth(index) {
            Some(expected) if expected == typed => Some(Self::Assert(expected)),
            _ => Some(Self::Fail(typed)),
        }
    }
}

/// One row of the per-character table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TallyRow {
    pub character: char,
    pub asserts: usize,
    pub fails: usize,
}

/// Per-character success and failure counters for one session
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct KeystrokeTally {
    asserts: BTreeMap<char, usize>,
    fails: BTreeMap<char, usize>,
}

impl KeystrokeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grade the change from `previous` to `current` and record it.
    ///
    /// Returns the recorded keystroke, if the change was a single-character append.
    pub fn on_input_change(
        &mut self,
        previous: &str,
        current: &str,
        target: &str,
    ) -> Option<Keystroke> {
        let keystroke = Keystroke::between(previous, current, target)?;
        self.record(keystroke);
        Some(keystroke)
    }

    pub fn record(&mut self, keystroke: Keystroke) {
        let (counter, char) = match keystroke {
            Keystroke::Assert(char) => (&mut self.asserts, char),
            Keystroke::Fail(char) => (&mut self.fails, char),
        };
        *counter.entry(char).or_insert(0) += 1;
    }

    pub const fn asserts(&self) -> &BTreeMap<char, usize> {
        &self.asserts
    }

    pub const fn fails(&self) -> &BTreeMap<char, usize> {
        &self.fails
    }

    pub fn asserts_for(&self, char: char) -> usize {
        self.asserts.get(&char).copied().unwrap_or(0)
    }

    pub fn fails_for(&self, char: char) -> usize {
        self.fails.get(&char).copied().unwrap_or(0)
    }

    pub fn total_asserts(&self) -> usize {
        self.asserts.values().sum()
    }

    pub fn total_fails(&self) -> usize {
        self.fails.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.asserts.is_empty() && self.fails.is_empty()
    }

    /// Every character present in either counter, sorted
    pub fn letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self
            .asserts
            .keys()
            .chain(self.fails.keys())
            .copied()
            .collect();
        letters.sort_unstable();
        letters.dedup();
        letters
    }

    /// One row per character in [letters](Self::letters)
    pub fn rows(&self) -> Vec<TallyRow> {
        self.letters()
            .into_iter()
            .map(|character| TallyRow {
                character,
                asserts: self.asserts_for(character),
                fails: self.fails_for(character),
            })
            .collect()
    }
}
