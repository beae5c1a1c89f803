//! # Source Module - Target Text Providers
//!
//! Sessions do not choose their own text. A [TextSource] hands out the next target text
//! whenever a session starts or restarts.

/// Supplies target texts for new sessions
///
/// Returned texts should be non-empty and should not begin or end with a space.
///
/// Any `FnMut() -> Option<String>` is a source:
///
/// ```rust
/// use platen::source::TextSource;
///
/// let mut source = || Some(String::from("the quick brown fox"));
/// assert_eq!(source.next_text().as_deref(), Some("the quick brown fox"));
/// ```
pub trait TextSource {
    /// The next text to type, or `None` if the source is exhausted
    fn next_text(&mut self) -> Option<String>;
}

impl<F: FnMut() -> Option<String>> TextSource for F {
    fn next_text(&mut self) -> Option<String> {
        self()
    }
}

/// A fixed pool of paragraphs handed out in rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraphs {
    paragraphs: Vec<String>,
    next: usize,
}

impl Paragraphs {
    /// Create a pool from the given paragraphs, skipping empty ones.
    ///
    /// Returns `None` if no paragraph is left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use platen::source::{Paragraphs, TextSource};
    ///
    /// let mut pool = Paragraphs::new(["first", "", "second"]).unwrap();
    /// assert_eq!(pool.len(), 2);
    /// assert_eq!(pool.next_text().as_deref(), Some("first"));
    /// assert_eq!(pool.next_text().as_deref(), Some("second"));
    /// assert_eq!(pool.next_text().as_deref(), Some("first"));
    ///
    /// assert!(Paragraphs::new(Vec::<String>::new()).is_none());
    /// ```
    pub fn new<I, S>(paragraphs: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paragraphs: Vec<String> = paragraphs
            .into_iter()
            .map(Into::into)
            .filter(|paragraph| !paragraph.is_empty())
            .collect();

        if paragraphs.is_empty() {
            return None;
        }

        Some(Self {
            paragraphs,
            next: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Always false: an empty pool cannot be built
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

impl TextSource for Paragraphs {
    fn next_text(&mut self) -> Option<String> {
        let paragraph = self.paragraphs.get(self.next)?.clone();
        self.next = (self.next + 1) % self.paragraphs.len();
        Some(paragraph)
    }
}
