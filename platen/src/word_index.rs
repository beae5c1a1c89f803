//! # Word Index Module - Flat Offsets and Word Coordinates
//!
//! Maps a flat character offset into the target text onto a `(word, letter)` coordinate
//! that a renderer can place a cursor at.
//!
//! Words are split on the literal space character only. Each boundary is the flat offset
//! of the first character of a word, so for `"hello big world"`:
//!
//! ```text
//! Characters: [h][e][l][l][o][ ][b][i][g][ ][w][o][r][l][d]
//! Boundaries:  0                 6           10
//! ```
//!
//! Offsets are counted in `char`s, not bytes.

use serde::Serialize;

/// A `(word, letter)` coordinate into the target text
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cursor {
    /// Index of the word the cursor is in
    pub word_index: usize,
    /// Offset of the cursor from the start of that word
    pub letter_index: usize,
}

/// Precomputed word boundaries for a target text
///
/// Built once per target text and never mutated afterwards.
///
/// # Examples
///
/// ```rust
/// use platen::word_index::{Cursor, WordIndex};
///
/// let index = WordIndex::new("ab cd");
/// assert_eq!(index.boundaries(), &[0, 3]);
/// assert_eq!(index.resolve(4), Cursor { word_index: 1, letter_index: 1 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordIndex {
    boundaries: Vec<usize>,
    text_len: usize,
}

impl WordIndex {
    pub fn new(target: &str) -> Self {
        Self {
            boundaries: compute_boundaries(target),
            text_len: target.chars().count(),
        }
    }

    /// The flat offset of the first character of each word
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    pub fn word_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Length of the indexed text in characters
    pub const fn text_len(&self) -> usize {
        self.text_len
    }

    /// Resolve a flat offset into a [Cursor].
    ///
    /// Offsets past the end of the text are clamped to the position right after the final
    /// character.
    pub fn resolve(&self, flat_offset: usize) -> Cursor {
        resolve_cursor(flat_offset.min(self.text_len), &self.boundaries)
    }

    /// Turn a [Cursor] back into a flat offset, clamped to the text length.
    pub fn flat_offset(&self, cursor: Cursor) -> usize {
        self.boundaries
            .get(cursor.word_index)
            .map_or(self.text_len, |start| start + cursor.letter_index)
            .min(self.text_len)
    }
}

/// Compute the flat offset of the first character of every space-separated word.
///
/// Each boundary is the previous one plus the previous word's length plus one for the
/// separating space. Consecutive spaces produce empty words, so the sequence stays strictly
/// increasing.
pub fn compute_boundaries(target: &str) -> Vec<usize> {
    let mut position = 0;
    target
        .split(' ')
        .map(|word| {
            let start = position;
            position += word.chars().count() + 1;
            start
        })
        .collect()
}

/// Find the greatest word whose boundary is at or before `flat_offset`.
///
/// An empty boundary list resolves everything to the origin.
pub fn resolve_cursor(flat_offset: usize, boundaries: &[usize]) -> Cursor {
    if boundaries.is_empty() {
        return Cursor::default();
    }

    let word_index = boundaries
        .partition_point(|&start| start <= flat_offset)
        .saturating_sub(1);
    let start = boundaries.get(word_index).copied().unwrap_or(0);

    Cursor {
        word_index,
        letter_index: flat_offset.saturating_sub(start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_two_words() {
        assert_eq!(compute_boundaries("ab cd"), vec![0, 3]);
    }

    #[test]
    fn test_boundaries_single_word() {
        assert_eq!(compute_boundaries("hello"), vec![0]);
    }

    #[test]
    fn test_boundaries_repeated_spaces() {
        // "a", "", "b"
        assert_eq!(compute_boundaries("a  b"), vec![0, 2, 3]);
    }

    #[test]
    fn test_boundaries_count_chars_not_bytes() {
        assert_eq!(compute_boundaries("café 🚀 ok"), vec![0, 5, 7]);
    }

    #[test]
    fn test_resolve_inside_second_word() {
        let index = WordIndex::new("ab cd");
        assert_eq!(
            index.resolve(4),
            Cursor {
                word_index: 1,
                letter_index: 1
            }
        );
    }

    #[test]
    fn test_resolve_on_separator_stays_in_previous_word() {
        let index = WordIndex::new("ab cd");
        assert_eq!(
            index.resolve(2),
            Cursor {
                word_index: 0,
                letter_index: 2
            }
        );
    }

    #[test]
    fn test_resolve_end_of_text() {
        let index = WordIndex::new("ab cd");
        assert_eq!(
            index.resolve(5),
            Cursor {
                word_index: 1,
                letter_index: 2
            }
        );
    }

    #[test]
    fn test_resolve_clamps_past_end() {
        let index = WordIndex::new("ab cd");
        assert_eq!(index.resolve(42), index.resolve(5));
    }

    #[test]
    fn test_resolve_empty_boundaries() {
        assert_eq!(resolve_cursor(3, &[]), Cursor::default());
    }

    #[test]
    fn test_flat_offset_round_trips_resolve() {
        let index = WordIndex::new("the quick brown fox");
        for offset in 0..=index.text_len() {
            assert_eq!(index.flat_offset(index.resolve(offset)), offset);
        }
    }

    #[test]
    fn test_flat_offset_clamps_unknown_word() {
        let index = WordIndex::new("ab cd");
        let cursor = Cursor {
            word_index: 9,
            letter_index: 0,
        };
        assert_eq!(index.flat_offset(cursor), 5);
    }
}
