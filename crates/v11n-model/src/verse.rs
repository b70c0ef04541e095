//! Verse addresses and inclusive verse ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::book::BookId;
use crate::versification::Versification;

/// The two testament ranges of a reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Testament {
    Old,
    New,
}

/// A (book, chapter, verse) address.
///
/// Chapter 0 and verse 0 denote introduction placeholders. The address is a
/// plain value; whether it exists in a given scheme is checked on demand via
/// [`Versification::validate`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VerseRef {
    pub book: BookId,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    pub fn new(book: BookId, chapter: u32, verse: u32) -> Self {
        Self {
            book,
            chapter,
            verse,
        }
    }

    /// True when this address names an introduction (chapter or book front
    /// matter) rather than body text.
    pub fn is_intro(&self) -> bool {
        self.verse == 0
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.book, self.chapter, self.verse)
    }
}

/// An inclusive range of verses within one scheme.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VerseRange {
    pub start: VerseRef,
    pub end: VerseRef,
}

impl VerseRange {
    pub fn new(start: VerseRef, end: VerseRef) -> Self {
        Self { start, end }
    }

    /// A range covering a single verse.
    pub fn single(verse: VerseRef) -> Self {
        Self {
            start: verse,
            end: verse,
        }
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Number of verses covered, measured in `v11n`. Zero when the range is
    /// inverted under that scheme.
    pub fn cardinality(&self, v11n: &Versification) -> u32 {
        let start = v11n.ordinal(self.start);
        let end = v11n.ordinal(self.end);
        (end + 1).saturating_sub(start)
    }

    /// Iterate the verses covered, in `v11n` order.
    pub fn verses<'a>(&self, v11n: &'a Versification) -> impl Iterator<Item = VerseRef> + 'a {
        let start = v11n.ordinal(self.start);
        let end = v11n.ordinal(self.end);
        (start..=end).map(move |ordinal| v11n.decode_ordinal(ordinal))
    }
}

impl fmt::Display for VerseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
