//! Transitive conversion through the mapping service.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use v11n_map::{MappingService, MemoryRules, NoRules, RulePair, RuleSource};
use v11n_model::{BookId, Passage, VerseRef, Versification};

fn scheme(name: &str) -> Arc<Versification> {
    Arc::new(
        Versification::with_testaments(
            name,
            &[BookId::Gen, BookId::Exod],
            &[BookId::Matt],
            &[&[10, 10], &[5]],
            &[&[5]],
        )
        .expect("well-formed test scheme"),
    )
}

fn verse(chapter: u32, verse: u32) -> VerseRef {
    VerseRef::new(BookId::Gen, chapter, verse)
}

#[test]
fn composes_both_hops_through_the_pivot() {
    let pivot = scheme("KJV");
    let alpha = scheme("Alpha");
    let beta = scheme("Beta");

    let mut rules = MemoryRules::new();
    // Alpha's Gen.1.1 is the pivot's Gen.1.2; Beta numbers it Gen.1.3.
    rules.insert("Alpha", [("Gen.1.1", "Gen.1.2")]);
    rules.insert("Beta", [("Gen.1.3", "Gen.1.2")]);
    let service = MappingService::new(Arc::clone(&pivot), Box::new(rules));

    let result = service.map_verse(verse(1, 1), &alpha, &beta);
    assert_eq!(result.render(&beta), "Gen.1.3");

    // And back again.
    let result = service.map_verse(verse(1, 3), &beta, &alpha);
    assert_eq!(result.render(&alpha), "Gen.1.1");
}

#[test]
fn pivot_endpoints_skip_a_hop() {
    let pivot = scheme("KJV");
    let alpha = scheme("Alpha");

    let mut rules = MemoryRules::new();
    rules.insert("Alpha", [("Gen.1.1", "Gen.1.2")]);
    let service = MappingService::new(Arc::clone(&pivot), Box::new(rules));

    let to_pivot = service.map_verse(verse(1, 1), &alpha, &pivot);
    assert_eq!(to_pivot.render(&pivot), "Gen.1.2");

    let from_pivot = service.map_verse(verse(1, 2), &pivot, &alpha);
    assert_eq!(from_pivot.render(&alpha), "Gen.1.1");
}

#[test]
fn same_scheme_conversion_is_the_identity() {
    let pivot = scheme("KJV");
    let alpha = scheme("Alpha");
    let service = MappingService::new(pivot, Box::new(NoRules));

    let result = service.map_verse(verse(2, 4), &alpha, &alpha);
    assert_eq!(result.render(&alpha), "Gen.2.4");
}

#[test]
fn part_tags_survive_the_round_trip() {
    let pivot = scheme("KJV");
    let alpha = scheme("Alpha");
    let beta = scheme("Beta");

    // Both schemes split the pivot's Gen.1.1 the same way; the part tags
    // stop Alpha's Gen.1.2 from smearing across both Beta verses.
    let split: &[(&str, &str)] = &[("Gen.1.1", "Gen.1.1@a"), ("Gen.1.2", "Gen.1.1@b")];
    let mut rules = MemoryRules::new();
    rules.insert("Alpha", split.iter().copied());
    rules.insert("Beta", split.iter().copied());
    let service = MappingService::new(Arc::clone(&pivot), Box::new(rules));

    let result = service.map_verse(verse(1, 2), &alpha, &beta);
    assert_eq!(result.render(&beta), "Gen.1.2");
}

/// Counts how often the service asks for rules.
struct CountingSource(AtomicUsize);

impl RuleSource for CountingSource {
    fn rules_for(&self, scheme: &str) -> v11n_map::Result<Vec<RulePair>> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Err(v11n_map::MapError::NoMappingData {
            scheme: scheme.to_string(),
        })
    }
}

#[test]
fn missing_mapping_data_falls_back_to_identity_and_loads_once() {
    let pivot = scheme("KJV");
    let alpha = scheme("Alpha");
    let beta = scheme("Beta");

    let source = Arc::new(CountingSource(AtomicUsize::new(0)));
    struct Shared(Arc<CountingSource>);
    impl RuleSource for Shared {
        fn rules_for(&self, scheme: &str) -> v11n_map::Result<Vec<RulePair>> {
            self.0.rules_for(scheme)
        }
    }
    let service = MappingService::new(Arc::clone(&pivot), Box::new(Shared(Arc::clone(&source))));

    for verse_number in 1..=5 {
        let result = service.map_verse(verse(1, verse_number), &alpha, &beta);
        assert_eq!(result.render(&beta), format!("Gen.1.{verse_number}"));
    }

    // One failed load per scheme, however many verses were converted.
    assert_eq!(source.0.load(Ordering::SeqCst), 2);
}

#[test]
fn identity_fallback_drops_addresses_the_target_cannot_hold() {
    let pivot = scheme("KJV");
    let alpha = scheme("Alpha");
    // Beta's Gen 1 is two verses shorter than Alpha's.
    let beta = Arc::new(
        Versification::with_testaments(
            "Beta",
            &[BookId::Gen],
            &[],
            &[&[8u32, 10] as &[u32]],
            &[],
        )
        .expect("well-formed test scheme"),
    );
    let service = MappingService::new(pivot, Box::new(NoRules));

    let kept = service.map_verse(verse(1, 8), &alpha, &beta);
    assert_eq!(kept.render(&beta), "Gen.1.8");

    let dropped = service.map_verse(verse(1, 10), &alpha, &beta);
    assert!(dropped.is_empty());
}

#[test]
fn converts_into_the_built_in_pivot() {
    let catalog = v11n_systems::SchemeCatalog::new();
    let pivot = catalog.pivot();
    let alpha = catalog.register(
        Versification::with_testaments(
            "Alpha",
            &[BookId::Gen],
            &[],
            &[&[31u32, 25] as &[u32]],
            &[],
        )
        .expect("well-formed test scheme"),
    );

    let mut rules = MemoryRules::new();
    rules.insert("Alpha", [("Gen.1.31", "Gen.2.1")]);
    let service = MappingService::new(Arc::clone(&pivot), Box::new(rules));

    let moved = service.map_verse(VerseRef::new(BookId::Gen, 1, 31), &alpha, &pivot);
    assert_eq!(moved.render(&pivot), "Gen.2.1");

    let unmoved = service.map_verse(VerseRef::new(BookId::Gen, 1, 1), &alpha, &pivot);
    assert_eq!(unmoved.render(&pivot), "Gen.1.1");
}

#[test]
fn passages_convert_verse_by_verse_and_union() {
    let pivot = scheme("KJV");
    let alpha = scheme("Alpha");
    let beta = scheme("Beta");

    let mut rules = MemoryRules::new();
    // A non-uniform range: only the middle verse moves.
    rules.insert("Alpha", [("Gen.1.2", "Gen.1.9")]);
    let service = MappingService::new(Arc::clone(&pivot), Box::new(rules));

    let mut passage = Passage::new();
    passage.add_range(
        &alpha,
        &v11n_model::VerseRange::new(verse(1, 1), verse(1, 3)),
    );

    let result = service.map_passage(&passage, &alpha, &beta);
    assert_eq!(result.render(&beta), "Gen.1.1 Gen.1.3 Gen.1.9");
}
