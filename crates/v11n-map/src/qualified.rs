//! The tagged reference values that mapping tables are keyed by.

use std::fmt;

use v11n_model::{VerseRange, VerseRef};

/// A reference as it appears in a mapping table.
///
/// Besides a plain range of verses, a rule side can state that the verses
/// simply do not exist in the local scheme, or that they belong to a named
/// section the pivot scheme has no numbering for. The optional part tag
/// distinguishes two local references that collapse onto the same pivot
/// verse, and survives both mapping directions so a later hop through a
/// third scheme does not conflate them.
///
/// Equality, ordering and hashing combine every field: qualified references
/// are used as map keys in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualifiedRef {
    /// An ordinary reference, optionally carrying a sub-verse part tag.
    Normal {
        range: VerseRange,
        part: Option<String>,
    },
    /// The rule's verses are absent from the local scheme.
    AbsentOnLocal,
    /// A named section with no pivot numbering.
    AbsentOnPivot { section: String },
}

impl QualifiedRef {
    /// A single whole verse with no part tag.
    pub fn verse(verse: VerseRef) -> Self {
        QualifiedRef::Normal {
            range: VerseRange::single(verse),
            part: None,
        }
    }

    pub fn range(&self) -> Option<&VerseRange> {
        match self {
            QualifiedRef::Normal { range, .. } => Some(range),
            _ => None,
        }
    }

    /// The covered verse when this is a single-verse reference.
    pub fn single_verse(&self) -> Option<VerseRef> {
        match self {
            QualifiedRef::Normal { range, .. } if range.is_single() => Some(range.start),
            _ => None,
        }
    }

    pub fn part(&self) -> Option<&str> {
        match self {
            QualifiedRef::Normal { part, .. } => part.as_deref(),
            _ => None,
        }
    }

    /// True unless this reference carries a part tag.
    pub fn is_whole(&self) -> bool {
        self.part().is_none()
    }

    /// The same reference with any part tag removed.
    pub fn to_whole(&self) -> Self {
        match self {
            QualifiedRef::Normal { range, .. } => QualifiedRef::Normal {
                range: *range,
                part: None,
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for QualifiedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualifiedRef::Normal { range, part: None } => write!(f, "{range}"),
            QualifiedRef::Normal {
                range,
                part: Some(part),
            } => write!(f, "{range}@{part}"),
            QualifiedRef::AbsentOnLocal => write!(f, "?"),
            QualifiedRef::AbsentOnPivot { section } => write!(f, "?{section}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use v11n_model::BookId;

    #[test]
    fn renders_each_variant() {
        let verse = VerseRef::new(BookId::Gen, 1, 1);
        assert_eq!(QualifiedRef::verse(verse).to_string(), "Gen.1.1");
        assert_eq!(
            QualifiedRef::Normal {
                range: VerseRange::single(verse),
                part: Some("a".to_string()),
            }
            .to_string(),
            "Gen.1.1@a"
        );
        assert_eq!(QualifiedRef::AbsentOnLocal.to_string(), "?");
        assert_eq!(
            QualifiedRef::AbsentOnPivot {
                section: "StoryOfSusanna".to_string(),
            }
            .to_string(),
            "?StoryOfSusanna"
        );
    }

    #[test]
    fn part_tags_participate_in_equality() {
        let verse = VerseRef::new(BookId::Gen, 1, 1);
        let whole = QualifiedRef::verse(verse);
        let tagged = QualifiedRef::Normal {
            range: VerseRange::single(verse),
            part: Some("a".to_string()),
        };
        assert_ne!(whole, tagged);
        assert_eq!(tagged.to_whole(), whole);
        assert!(whole.is_whole());
        assert!(!tagged.is_whole());
    }
}
