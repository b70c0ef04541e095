//! Built-in versification schemes and the scheme catalog.
//!
//! Cross-scheme conversion composes through a single canonical pivot scheme
//! (the traditional KJV numbering). This crate carries that scheme's data
//! and a [`SchemeCatalog`] through which callers obtain shared handles to
//! built-in and registered schemes by name.

#![deny(unsafe_code)]

mod kjv;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use v11n_model::Versification;

/// Name of the canonical pivot scheme.
pub const PIVOT_NAME: &str = "KJV";

/// Build the canonical pivot scheme.
pub fn kjv() -> Versification {
    Versification::with_testaments(
        PIVOT_NAME,
        kjv::OT_BOOKS,
        kjv::NT_BOOKS,
        kjv::OT_LAST_VERSE,
        kjv::NT_LAST_VERSE,
    )
    .expect("built-in KJV tables are internally consistent")
}

/// A registry of versification schemes keyed by name.
///
/// Seeded with the pivot scheme; additional schemes are registered at
/// runtime. Handles are shared `Arc`s, so a scheme name resolves to exactly
/// one instance for the life of the catalog.
#[derive(Debug)]
pub struct SchemeCatalog {
    schemes: RwLock<HashMap<String, Arc<Versification>>>,
}

impl SchemeCatalog {
    pub fn new() -> Self {
        let pivot = Arc::new(kjv());
        let mut schemes = HashMap::new();
        schemes.insert(pivot.name().to_string(), pivot);
        Self {
            schemes: RwLock::new(schemes),
        }
    }

    /// The pivot scheme handle.
    pub fn pivot(&self) -> Arc<Versification> {
        self.get(PIVOT_NAME)
            .expect("catalog is seeded with the pivot scheme")
    }

    pub fn get(&self, name: &str) -> Option<Arc<Versification>> {
        let schemes = self.schemes.read().unwrap_or_else(PoisonError::into_inner);
        schemes.get(name).cloned()
    }

    /// Register a scheme, replacing any previous entry under the same name.
    pub fn register(&self, v11n: Versification) -> Arc<Versification> {
        let handle = Arc::new(v11n);
        let mut schemes = self.schemes.write().unwrap_or_else(PoisonError::into_inner);
        schemes.insert(handle.name().to_string(), Arc::clone(&handle));
        handle
    }

    /// Registered scheme names, sorted.
    pub fn names(&self) -> Vec<String> {
        let schemes = self.schemes.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = schemes.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for SchemeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use v11n_model::{BookId, VerseRef};

    #[test]
    fn pivot_scheme_builds_and_addresses_densely() {
        let v11n = kjv();
        assert_eq!(v11n.name(), PIVOT_NAME);
        // 39 + 27 books plus the three introduction placeholders.
        assert_eq!(v11n.books().len(), 69);

        // The first body verse sits after the work, testament, book and
        // chapter introductions.
        assert_eq!(v11n.ordinal(VerseRef::new(BookId::Gen, 1, 1)), 4);
        assert_eq!(
            v11n.decode_ordinal(v11n.ot_max_ordinal() + 1),
            VerseRef::new(BookId::IntroNt, 0, 0)
        );

        // Spot checks against the carried tables.
        assert_eq!(v11n.last_chapter(BookId::Ps), 150);
        assert_eq!(v11n.last_verse(BookId::Ps, 119), 176);
        assert_eq!(v11n.last_verse(BookId::Gen, 1), 31);
        assert_eq!(v11n.last_chapter(BookId::Phlm), 1);

        // Round trip over a sample of the space.
        for ordinal in (0..=v11n.maximum_ordinal()).step_by(997) {
            assert_eq!(v11n.ordinal(v11n.decode_ordinal(ordinal)), ordinal);
        }
    }

    #[test]
    fn catalog_returns_shared_handles() {
        let catalog = SchemeCatalog::new();
        let a = catalog.get(PIVOT_NAME).expect("pivot is seeded");
        let b = catalog.pivot();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(catalog.names(), vec![PIVOT_NAME.to_string()]);
        assert!(catalog.get("Synodal").is_none());
    }

    #[test]
    fn registered_schemes_are_retrievable() {
        let catalog = SchemeCatalog::new();
        let custom = Versification::with_testaments(
            "Custom",
            &[BookId::Gen],
            &[],
            &[&[3u32, 2] as &[u32]],
            &[],
        )
        .expect("tiny scheme");
        let handle = catalog.register(custom);
        let fetched = catalog.get("Custom").expect("registered scheme");
        assert!(Arc::ptr_eq(&handle, &fetched));
    }
}
