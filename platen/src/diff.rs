//! # Diff Module - Per-Character Status Computation
//!
//! Compares the current input buffer against the target text and assigns every target
//! character one of three states.
//!
//! The status array is always rebuilt from the whole input buffer. Input edits include
//! deletions as well as appends, so patching only the last slot would leave stale
//! `Correct`/`Incorrect` entries behind after a backspace.
//!
//! ```text
//! Target: [c][a][t][ ][d][o][g]
//! Input:  [c][x][t]
//! Status:  ✓  ✗  ✓  ·  ·  ·  ·
//! ```

use serde::Serialize;
use strum::{Display, EnumIter};

/// Grading state of a single target character
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// Not reached by the input yet
    #[default]
    Untyped,
    /// Typed, but does not match the target
    Incorrect,
    /// Typed and matches the target
    Correct,
}

/// A target character with its current [Status]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CharacterStatus {
    pub character: char,
    pub status: Status,
}

impl CharacterStatus {
    pub const fn untyped(character: char) -> Self {
        Self {
            character,
            status: Status::Untyped,
        }
    }
}

/// Grade `input` against `target`, one entry per target character.
///
/// Input beyond the end of the target is ignored.
///
/// # Examples
///
/// ```rust
/// use platen::diff::{diff, Status};
///
/// let statuses = diff("cat", "cx");
/// let states: Vec<Status> = statuses.iter().map(|s| s.status).collect();
/// assert_eq!(states, [Status::Correct, Status::Incorrect, Status::Untyped]);
/// ```
pub fn diff(target: &str, input: &str) -> Vec<CharacterStatus> {
    let mut typed = input.chars();

    target
        .chars()
        .map(|character| {
            let status = match typed.next() {
                Some(input) if input == character => Status::Correct,
                Some(_) => Status::Incorrect,
                None => Status::Untyped,
            };
            CharacterStatus { character, status }
        })
        .collect()
}

/// The status array of a target nobody has typed into yet
pub fn untyped(target: &str) -> Vec<CharacterStatus> {
    target.chars().map(CharacterStatus::untyped).collect()
}

/// Count the entries of `statuses` that are in `status`
pub fn count(statuses: &[CharacterStatus], status: Status) -> usize {
    statuses.iter().filter(|entry| entry.status == status).count()
}
