//! Ordered verse sets within a single scheme.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::verse::{VerseRange, VerseRef};
use crate::versification::Versification;

/// A set of verses in one scheme, stored as dense ordinals.
///
/// Verse membership and iteration are interpreted against the scheme the
/// passage was built with; the caller supplies it on each call rather than
/// the passage owning a handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passage {
    ordinals: BTreeSet<u32>,
}

impl Passage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// Add a verse; addresses invalid in `v11n` are ignored.
    pub fn add_verse(&mut self, v11n: &Versification, verse: VerseRef) {
        if v11n.is_valid(verse.book, verse.chapter, verse.verse) {
            self.ordinals.insert(v11n.ordinal(verse));
        }
    }

    /// Add every verse of an inclusive range.
    pub fn add_range(&mut self, v11n: &Versification, range: &VerseRange) {
        for verse in range.verses(v11n) {
            self.add_verse(v11n, verse);
        }
    }

    pub fn contains(&self, v11n: &Versification, verse: VerseRef) -> bool {
        self.ordinals.contains(&v11n.ordinal(verse))
    }

    pub fn union_with(&mut self, other: &Passage) {
        self.ordinals.extend(&other.ordinals);
    }

    /// Iterate the verses in ordinal order.
    pub fn verses<'a>(&'a self, v11n: &'a Versification) -> impl Iterator<Item = VerseRef> + 'a {
        self.ordinals
            .iter()
            .map(|&ordinal| v11n.decode_ordinal(ordinal))
    }

    /// Coalesce the set into maximal contiguous ranges.
    pub fn ranges(&self, v11n: &Versification) -> Vec<VerseRange> {
        let mut out = Vec::new();
        let mut run: Option<(u32, u32)> = None;
        for &ordinal in &self.ordinals {
            run = match run {
                Some((start, end)) if ordinal == end + 1 => Some((start, ordinal)),
                Some((start, end)) => {
                    out.push(range_from(v11n, start, end));
                    Some((ordinal, ordinal))
                }
                None => Some((ordinal, ordinal)),
            };
        }
        if let Some((start, end)) = run {
            out.push(range_from(v11n, start, end));
        }
        out
    }

    /// Canonical space-separated range rendering, e.g. `"Gen.1.1-Gen.1.3 Gen.2.5"`.
    pub fn render(&self, v11n: &Versification) -> String {
        let mut out = String::new();
        for (index, range) in self.ranges(v11n).iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{range}");
        }
        out
    }
}

fn range_from(v11n: &Versification, start: u32, end: u32) -> VerseRange {
    VerseRange::new(v11n.decode_ordinal(start), v11n.decode_ordinal(end))
}
