//! Reference-string parsing and passage rendering.

use v11n_model::{
    BookId, Passage, VerseRange, VerseRef, Versification, VersificationError, parse_range,
    parse_verse,
};

fn sample() -> Versification {
    Versification::with_testaments(
        "Sample",
        &[BookId::Gen, BookId::Exod],
        &[BookId::Matt],
        &[&[3, 2], &[2]],
        &[&[2, 1]],
    )
    .expect("well-formed sample tables")
}

#[test]
fn parses_single_references() {
    let v11n = sample();
    assert_eq!(
        parse_verse(&v11n, "Gen.1.2").unwrap(),
        VerseRef::new(BookId::Gen, 1, 2)
    );
    assert_eq!(
        parse_verse(&v11n, " gen.2.0 ").unwrap(),
        VerseRef::new(BookId::Gen, 2, 0)
    );
}

#[test]
fn parses_range_forms() {
    let v11n = sample();
    let full = parse_range(&v11n, "Gen.1.1-Gen.2.2").unwrap();
    assert_eq!(full.start, VerseRef::new(BookId::Gen, 1, 1));
    assert_eq!(full.end, VerseRef::new(BookId::Gen, 2, 2));
    assert_eq!(full.cardinality(&v11n), 6);

    let shorthand = parse_range(&v11n, "Gen.1.1-3").unwrap();
    assert_eq!(shorthand.end, VerseRef::new(BookId::Gen, 1, 3));
    assert_eq!(shorthand.cardinality(&v11n), 3);

    let single = parse_range(&v11n, "Matt.2.1").unwrap();
    assert!(single.is_single());
}

#[test]
fn rejects_malformed_and_out_of_range_references() {
    let v11n = sample();
    assert!(matches!(
        parse_verse(&v11n, "Gen.1").unwrap_err(),
        VersificationError::MalformedReference { .. }
    ));
    assert!(matches!(
        parse_verse(&v11n, "Gen.one.1").unwrap_err(),
        VersificationError::MalformedReference { .. }
    ));
    assert!(matches!(
        parse_verse(&v11n, "Nowhere.1.1").unwrap_err(),
        VersificationError::UnknownBook { .. }
    ));
    assert!(matches!(
        parse_verse(&v11n, "Gen.1.9").unwrap_err(),
        VersificationError::VerseOutOfRange { .. }
    ));
    assert!(matches!(
        parse_range(&v11n, "Gen.2.2-Gen.1.1").unwrap_err(),
        VersificationError::InvertedRange { .. }
    ));
}

#[test]
fn range_iteration_crosses_chapter_boundaries() {
    let v11n = sample();
    let range = parse_range(&v11n, "Gen.1.3-Gen.2.1").unwrap();
    let verses: Vec<VerseRef> = range.verses(&v11n).collect();
    assert_eq!(
        verses,
        vec![
            VerseRef::new(BookId::Gen, 1, 3),
            VerseRef::new(BookId::Gen, 2, 0),
            VerseRef::new(BookId::Gen, 2, 1),
        ]
    );
}

#[test]
fn passages_coalesce_contiguous_runs() {
    let v11n = sample();
    let mut passage = Passage::new();
    passage.add_verse(&v11n, VerseRef::new(BookId::Gen, 1, 1));
    passage.add_verse(&v11n, VerseRef::new(BookId::Gen, 1, 2));
    passage.add_verse(&v11n, VerseRef::new(BookId::Gen, 1, 3));
    passage.add_verse(&v11n, VerseRef::new(BookId::Exod, 1, 1));

    let ranges = passage.ranges(&v11n);
    assert_eq!(
        ranges,
        vec![
            VerseRange::new(
                VerseRef::new(BookId::Gen, 1, 1),
                VerseRef::new(BookId::Gen, 1, 3)
            ),
            VerseRange::single(VerseRef::new(BookId::Exod, 1, 1)),
        ]
    );
    assert_eq!(passage.render(&v11n), "Gen.1.1-Gen.1.3 Exod.1.1");
}

#[test]
fn passages_ignore_addresses_foreign_to_the_scheme() {
    let v11n = sample();
    let mut passage = Passage::new();
    passage.add_verse(&v11n, VerseRef::new(BookId::Rev, 1, 1));
    passage.add_verse(&v11n, VerseRef::new(BookId::Gen, 7, 7));
    assert!(passage.is_empty());

    passage.add_verse(&v11n, VerseRef::new(BookId::Matt, 1, 1));
    assert!(passage.contains(&v11n, VerseRef::new(BookId::Matt, 1, 1)));
    assert_eq!(passage.len(), 1);
}

#[test]
fn passage_union_merges_ordinal_sets() {
    let v11n = sample();
    let mut left = Passage::new();
    left.add_verse(&v11n, VerseRef::new(BookId::Gen, 1, 1));
    let mut right = Passage::new();
    right.add_verse(&v11n, VerseRef::new(BookId::Gen, 1, 2));

    left.union_with(&right);
    assert_eq!(left.len(), 2);
    assert_eq!(left.render(&v11n), "Gen.1.1-Gen.1.2");
}
