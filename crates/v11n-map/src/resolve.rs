//! Resolution of one side of a mapping rule into a [`QualifiedRef`].
//!
//! A specification string is interpreted by its leading marker:
//!
//! - a bare `?` on the local side means the other side's verses are absent
//!   locally; `?Name` on the pivot side names a section the pivot cannot
//!   number
//! - `+N` / `-N` offsets the other side's already-resolved range by `N`
//!   ordinals, and is only legal when that basis exists
//! - a `@tag` suffix attaches a part tag to a single-verse reference
//! - anything else is a plain reference in the side's own scheme

use v11n_model::{VerseRange, Versification, parse_range};

use crate::error::{MapError, Result};
use crate::qualified::QualifiedRef;

/// Which side of a rule a specification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Local,
    Pivot,
}

/// Resolve a specification in `v11n`. `basis` is the other side's resolved
/// range together with the scheme it was resolved in.
pub(crate) fn resolve_spec(
    v11n: &Versification,
    side: Side,
    spec: &str,
    basis: Option<(&VerseRange, &Versification)>,
) -> Result<QualifiedRef> {
    let spec = spec.trim();
    let Some(first) = spec.chars().next() else {
        return Err(MapError::EmptySpec);
    };

    match first {
        '?' => match side {
            Side::Local if spec == "?" => Ok(QualifiedRef::AbsentOnLocal),
            Side::Local => Err(MapError::SectionOnLocal {
                spec: spec.to_string(),
            }),
            Side::Pivot => Ok(QualifiedRef::AbsentOnPivot {
                section: spec[1..].to_string(),
            }),
        },
        '+' | '-' => offset_spec(v11n, spec, basis),
        _ => normal_spec(v11n, spec),
    }
}

/// Offset the basis range into `v11n`, each contiguous run independently.
///
/// The basis start is re-read as the same-numbered verse in `v11n`, shifted
/// by the signed offset, and the run keeps the basis cardinality.
fn offset_spec(
    v11n: &Versification,
    spec: &str,
    basis: Option<(&VerseRange, &Versification)>,
) -> Result<QualifiedRef> {
    let Some((range, basis_v11n)) = basis else {
        return Err(MapError::OffsetWithoutBasis {
            spec: spec.to_string(),
        });
    };

    let offset: i64 = spec.parse().map_err(|_| MapError::MalformedOffset {
        spec: spec.to_string(),
    })?;

    let start = range.start;
    if !v11n.is_valid(start.book, start.chapter, start.verse) {
        return Err(MapError::OffsetWithoutBasis {
            spec: spec.to_string(),
        });
    }

    let shifted = i64::from(v11n.ordinal(start)) + offset;
    let shifted = shifted.clamp(0, i64::from(v11n.maximum_ordinal())) as u32;
    let start = v11n.decode_ordinal(shifted);

    let cardinality = range.cardinality(basis_v11n);
    let end = if cardinality > 1 {
        v11n.add(start, cardinality - 1)
    } else {
        start
    };

    Ok(QualifiedRef::Normal {
        range: VerseRange::new(start, end),
        part: None,
    })
}

fn normal_spec(v11n: &Versification, spec: &str) -> Result<QualifiedRef> {
    let (reference, part) = match spec.split_once('@') {
        Some((reference, part)) if !part.is_empty() => (reference, Some(part.to_string())),
        Some(_) => {
            return Err(MapError::NotAVerse {
                spec: spec.to_string(),
            });
        }
        None => (spec, None),
    };

    let range = parse_range(v11n, reference)?;
    if part.is_some() && !range.is_single() {
        return Err(MapError::PartOnRange {
            spec: spec.to_string(),
        });
    }
    Ok(QualifiedRef::Normal { range, part })
}

#[cfg(test)]
mod tests {
    use super::*;
    use v11n_model::{BookId, VerseRef, Versification};

    fn scheme(name: &str) -> Versification {
        Versification::with_testaments(
            name,
            &[BookId::Gen],
            &[],
            &[&[10u32, 10] as &[u32]],
            &[],
        )
        .expect("test scheme")
    }

    #[test]
    fn plain_references_resolve_in_their_own_scheme() {
        let v11n = scheme("A");
        let resolved = resolve_spec(&v11n, Side::Local, "Gen.1.2-4", None).unwrap();
        let range = resolved.range().expect("a range");
        assert_eq!(range.start, VerseRef::new(BookId::Gen, 1, 2));
        assert_eq!(range.end, VerseRef::new(BookId::Gen, 1, 4));
    }

    #[test]
    fn absent_markers_depend_on_the_side() {
        let v11n = scheme("A");
        assert_eq!(
            resolve_spec(&v11n, Side::Local, "?", None).unwrap(),
            QualifiedRef::AbsentOnLocal
        );
        assert_eq!(
            resolve_spec(&v11n, Side::Pivot, "?Section", None).unwrap(),
            QualifiedRef::AbsentOnPivot {
                section: "Section".to_string(),
            }
        );
        assert!(matches!(
            resolve_spec(&v11n, Side::Local, "?Section", None),
            Err(MapError::SectionOnLocal { .. })
        ));
    }

    #[test]
    fn offsets_shift_the_basis_range() {
        let local = scheme("A");
        let pivot = scheme("KJV");
        let basis = VerseRange::new(
            VerseRef::new(BookId::Gen, 1, 2),
            VerseRef::new(BookId::Gen, 1, 4),
        );

        let resolved =
            resolve_spec(&pivot, Side::Pivot, "+2", Some((&basis, &local))).unwrap();
        let range = resolved.range().expect("a range");
        assert_eq!(range.start, VerseRef::new(BookId::Gen, 1, 4));
        assert_eq!(range.end, VerseRef::new(BookId::Gen, 1, 6));

        let resolved =
            resolve_spec(&pivot, Side::Pivot, "-1", Some((&basis, &local))).unwrap();
        assert_eq!(
            resolved.range().expect("a range").start,
            VerseRef::new(BookId::Gen, 1, 1)
        );
    }

    #[test]
    fn offsets_without_a_basis_are_rejected() {
        let v11n = scheme("A");
        assert!(matches!(
            resolve_spec(&v11n, Side::Local, "+2", None),
            Err(MapError::OffsetWithoutBasis { .. })
        ));
        let basis = VerseRange::single(VerseRef::new(BookId::Gen, 1, 1));
        assert!(matches!(
            resolve_spec(&v11n, Side::Pivot, "+x", Some((&basis, &v11n))),
            Err(MapError::MalformedOffset { .. })
        ));
    }

    #[test]
    fn part_tags_attach_to_single_verses_only() {
        let v11n = scheme("A");
        let resolved = resolve_spec(&v11n, Side::Pivot, "Gen.1.3@a", None).unwrap();
        assert_eq!(resolved.part(), Some("a"));
        assert_eq!(
            resolved.single_verse(),
            Some(VerseRef::new(BookId::Gen, 1, 3))
        );

        assert!(matches!(
            resolve_spec(&v11n, Side::Pivot, "Gen.1.1-3@a", None),
            Err(MapError::PartOnRange { .. })
        ));
    }
}
