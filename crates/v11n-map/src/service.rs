//! Cross-scheme conversion through the pivot scheme.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};
use v11n_model::{Passage, VerseRef, Versification};

use crate::error::Result;
use crate::mapper::{PivotMapper, RulePair};
use crate::qualified::QualifiedRef;

/// Supplies tokenized mapping rules for a scheme, by name.
///
/// Locating and reading the raw rule text is the collaborator's business;
/// the service only sees key/value pairs. Loading is one-shot per scheme
/// and may fail; failure makes the scheme fall back to identity guessing.
pub trait RuleSource: Send + Sync {
    fn rules_for(&self, scheme: &str) -> Result<Vec<RulePair>>;
}

/// A rule source with no data at all; every scheme converts by identity.
#[derive(Debug, Default)]
pub struct NoRules;

impl RuleSource for NoRules {
    fn rules_for(&self, scheme: &str) -> Result<Vec<RulePair>> {
        Err(crate::error::MapError::NoMappingData {
            scheme: scheme.to_string(),
        })
    }
}

/// An in-memory rule source keyed by scheme name.
#[derive(Debug, Default)]
pub struct MemoryRules {
    rules: HashMap<String, Vec<RulePair>>,
}

impl MemoryRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(
        &mut self,
        scheme: impl Into<String>,
        rules: impl IntoIterator<Item = (K, V)>,
    ) {
        self.rules.insert(
            scheme.into(),
            rules
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
    }
}

impl RuleSource for MemoryRules {
    fn rules_for(&self, scheme: &str) -> Result<Vec<RulePair>> {
        self.rules
            .get(scheme)
            .cloned()
            .ok_or_else(|| crate::error::MapError::NoMappingData {
                scheme: scheme.to_string(),
            })
    }
}

/// Converts references between arbitrary schemes by composing each scheme's
/// pivot mapper.
///
/// Mappers are built lazily, at most once per scheme, behind a lock around
/// the check-and-insert; later lookups only take the read side. A scheme
/// whose rules fail to load is pinned as having no mapper, with a single
/// logged warning, and converts by identity from then on.
pub struct MappingService {
    pivot: Arc<Versification>,
    source: Box<dyn RuleSource>,
    mappers: RwLock<HashMap<String, Option<Arc<PivotMapper>>>>,
}

impl MappingService {
    pub fn new(pivot: Arc<Versification>, source: Box<dyn RuleSource>) -> Self {
        // Everything maps through the pivot, so the pivot itself never
        // needs a mapper.
        let mut mappers = HashMap::new();
        mappers.insert(pivot.name().to_string(), None);
        Self {
            pivot,
            source,
            mappers: RwLock::new(mappers),
        }
    }

    pub fn pivot(&self) -> &Arc<Versification> {
        &self.pivot
    }

    /// Load mapping data for a scheme ahead of first use.
    pub fn ensure_loaded(&self, scheme: &Arc<Versification>) {
        self.mapper_for(scheme);
    }

    fn mapper_for(&self, scheme: &Arc<Versification>) -> Option<Arc<PivotMapper>> {
        {
            let mappers = self.mappers.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = mappers.get(scheme.name()) {
                return entry.clone();
            }
        }

        let mut mappers = self.mappers.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have built the entry while we waited.
        if let Some(entry) = mappers.get(scheme.name()) {
            return entry.clone();
        }

        let entry = match self.source.rules_for(scheme.name()) {
            Ok(rules) => Some(Arc::new(PivotMapper::new(
                Arc::clone(scheme),
                Arc::clone(&self.pivot),
                &rules,
            ))),
            Err(error) => {
                warn!(
                    scheme = scheme.name(),
                    %error,
                    "no mapping data; conversions for this scheme fall back to identity"
                );
                None
            }
        };
        mappers.insert(scheme.name().to_string(), entry.clone());
        entry
    }

    /// Convert one verse from scheme `from` to scheme `to`.
    pub fn map_verse(
        &self,
        verse: VerseRef,
        from: &Arc<Versification>,
        to: &Arc<Versification>,
    ) -> Passage {
        let mut result = Passage::new();
        if from.name() == to.name() {
            result.add_verse(to, verse);
            return result;
        }

        // First hop: into the pivot scheme.
        let pivot_refs: Vec<QualifiedRef> = if from.name() == self.pivot.name() {
            vec![QualifiedRef::verse(verse)]
        } else {
            match self.mapper_for(from) {
                Some(mapper) => mapper.map(&QualifiedRef::verse(verse)),
                None => self.identity_guess(verse, &self.pivot),
            }
        };

        // Second hop: out of the pivot scheme.
        if to.name() == self.pivot.name() {
            for pivot_ref in &pivot_refs {
                if let Some(range) = pivot_ref.range() {
                    result.add_range(to, range);
                }
            }
            return result;
        }

        match self.mapper_for(to) {
            Some(mapper) => {
                for pivot_ref in &pivot_refs {
                    for local_verse in mapper.unmap(pivot_ref) {
                        result.add_verse(to, local_verse);
                    }
                }
            }
            None => {
                for pivot_ref in &pivot_refs {
                    if let Some(range) = pivot_ref.range() {
                        for pivot_verse in range.verses(&self.pivot) {
                            result.add_verse(to, pivot_verse);
                        }
                    }
                }
            }
        }
        result
    }

    /// Convert a whole passage, verse by verse.
    ///
    /// Per-verse conversion is required for correctness: individual verses
    /// inside a range may map non-uniformly.
    pub fn map_passage(
        &self,
        passage: &Passage,
        from: &Arc<Versification>,
        to: &Arc<Versification>,
    ) -> Passage {
        if from.name() == to.name() {
            return passage.clone();
        }
        let mut result = Passage::new();
        for verse in passage.verses(from) {
            result.union_with(&self.map_verse(verse, from, to));
        }
        result
    }

    fn identity_guess(&self, verse: VerseRef, target: &Arc<Versification>) -> Vec<QualifiedRef> {
        if target.is_valid(verse.book, verse.chapter, verse.verse) {
            vec![QualifiedRef::verse(verse)]
        } else {
            debug!(
                verse = %verse,
                scheme = target.name(),
                "no identity equivalent in target scheme"
            );
            Vec::new()
        }
    }
}

impl std::fmt::Debug for MappingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingService")
            .field("pivot", &self.pivot.name())
            .finish_non_exhaustive()
    }
}
