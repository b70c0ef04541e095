//! Bidirectional mapping tables between one scheme and the pivot scheme.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, trace, warn};
use v11n_model::{VerseRange, VerseRef, Versification};

use crate::error::{MapError, Result};
use crate::qualified::QualifiedRef;
use crate::resolve::{Side, resolve_spec};

/// A raw mapping rule: local specification and pivot specification.
pub type RulePair = (String, String);

/// Global flag line in a rule stream: verse-0 introductions get no identity
/// fallback in either direction.
const ZEROS_UNMAPPED_FLAG: &str = "!zerosUnmapped";

/// Maps verses of one scheme to and from the canonical pivot scheme.
///
/// Built once from an ordered rule list; read-only afterwards. Rules that
/// cannot be interpreted are logged and skipped so one bad entry does not
/// poison the rest of the table.
///
/// Verses with no rule map onto the same-numbered verse by default, so the
/// tables only hold the differences between the two schemes. A
/// `!zerosUnmapped` flag line in the rule stream exempts verse-0
/// introductions from that default.
#[derive(Debug)]
pub struct PivotMapper {
    local: Arc<Versification>,
    pivot: Arc<Versification>,
    /// Local verse to its pivot references, in rule order.
    forward: BTreeMap<VerseRef, Vec<QualifiedRef>>,
    /// Pivot reference back to the local verses that collapse onto it.
    backward: BTreeMap<QualifiedRef, BTreeSet<VerseRef>>,
    /// Pivot verses with no local counterpart at all.
    absent: BTreeSet<VerseRef>,
    zeros_unmapped: bool,
    had_errors: bool,
}

impl PivotMapper {
    /// Build the tables from tokenized rule pairs.
    pub fn new(local: Arc<Versification>, pivot: Arc<Versification>, rules: &[RulePair]) -> Self {
        let mut mapper = Self {
            local,
            pivot,
            forward: BTreeMap::new(),
            backward: BTreeMap::new(),
            absent: BTreeSet::new(),
            zeros_unmapped: false,
            had_errors: false,
        };

        for (local_spec, pivot_spec) in rules {
            if local_spec.trim() == ZEROS_UNMAPPED_FLAG {
                mapper.zeros_unmapped = true;
                continue;
            }
            if let Err(error) = mapper.process_rule(local_spec, pivot_spec) {
                warn!(
                    scheme = mapper.local.name(),
                    key = %local_spec,
                    value = %pivot_spec,
                    %error,
                    "skipping unusable mapping rule"
                );
                mapper.had_errors = true;
            }
        }
        trace!(scheme = mapper.local.name(), "{}", mapper.dump());
        mapper
    }

    /// The scheme these tables are local to.
    pub fn scheme(&self) -> &Arc<Versification> {
        &self.local
    }

    /// True when at least one rule was skipped during construction.
    pub fn had_errors(&self) -> bool {
        self.had_errors
    }

    fn process_rule(&mut self, local_spec: &str, pivot_spec: &str) -> Result<()> {
        let left = resolve_spec(&self.local, Side::Local, local_spec, None)?;
        let right = resolve_spec(
            &self.pivot,
            Side::Pivot,
            pivot_spec,
            left.range().map(|range| (range, &*self.local)),
        )?;

        match &left {
            QualifiedRef::AbsentOnLocal => {
                let range = right.range().ok_or_else(|| MapError::NotAVerse {
                    spec: pivot_spec.to_string(),
                })?;
                self.absent.extend(range.verses(&self.pivot));
                Ok(())
            }
            QualifiedRef::AbsentOnPivot { .. } => Err(MapError::SectionOnLocal {
                spec: local_spec.to_string(),
            }),
            QualifiedRef::Normal { range, .. } => {
                // The local part tag, if any, is not a table key; only the
                // pivot side's tag needs to survive the round trip.
                let range = *range;
                if range.cardinality(&self.local) == 1 {
                    self.add_one_to_many(range.start, &right);
                    Ok(())
                } else {
                    self.add_many(&range, &right, local_spec, pivot_spec)
                }
            }
        }
    }

    /// A single local verse against one or many pivot verses.
    fn add_one_to_many(&mut self, local: VerseRef, right: &QualifiedRef) {
        self.add_forward(local, right.clone());

        match right.range() {
            Some(range) if range.cardinality(&self.pivot) != 1 => {
                // Expand the pivot range so each pivot verse points back to
                // the same local verse.
                let pivot_verses = range.verses(&self.pivot).collect::<Vec<_>>();
                for pivot_verse in pivot_verses {
                    self.add_backward(QualifiedRef::verse(pivot_verse), local);
                }
            }
            _ => self.add_backward(right.clone(), local),
        }
    }

    /// A multi-verse local range against the pivot side.
    fn add_many(
        &mut self,
        range: &VerseRange,
        right: &QualifiedRef,
        local_spec: &str,
        pivot_spec: &str,
    ) -> Result<()> {
        let is_pivot_many = right
            .range()
            .is_some_and(|r| r.cardinality(&self.pivot) != 1);

        if is_pivot_many {
            let pivot_range = right.range().ok_or_else(|| MapError::NotAVerse {
                spec: pivot_spec.to_string(),
            })?;

            // Verse-by-verse correspondence needs equal counts on both
            // sides; anything else is a malformed rule.
            let left_count = range.cardinality(&self.local);
            let right_count = pivot_range.cardinality(&self.pivot);
            if left_count != right_count {
                return Err(MapError::CardinalityMismatch {
                    left: local_spec.to_string(),
                    right: pivot_spec.to_string(),
                    left_count,
                    right_count,
                });
            }

            let pairs = range
                .verses(&self.local)
                .zip(pivot_range.verses(&self.pivot))
                .collect::<Vec<_>>();
            for (local_verse, pivot_verse) in pairs {
                // Identity is the default mapping; only differences are
                // worth a table entry.
                if local_verse.verse == pivot_verse.verse {
                    continue;
                }
                let pivot_ref = QualifiedRef::verse(pivot_verse);
                self.add_forward(local_verse, pivot_ref.clone());
                self.add_backward(pivot_ref, local_verse);
            }
            Ok(())
        } else {
            // Broadcast every local verse onto the single pivot reference.
            let local_verses = range.verses(&self.local).collect::<Vec<_>>();
            for local_verse in local_verses {
                self.add_forward(local_verse, right.clone());
                self.add_backward(right.clone(), local_verse);
            }
            Ok(())
        }
    }

    fn add_forward(&mut self, local: VerseRef, pivot_ref: QualifiedRef) {
        self.forward.entry(local).or_default().push(pivot_ref);
    }

    fn add_backward(&mut self, pivot_ref: QualifiedRef, local: VerseRef) {
        // A part-qualified entry also answers lookups for the whole verse.
        if !pivot_ref.is_whole() {
            self.backward
                .entry(pivot_ref.to_whole())
                .or_default()
                .insert(local);
        }
        self.backward.entry(pivot_ref).or_default().insert(local);
    }

    /// Map a single local verse to its pivot references.
    ///
    /// An unmapped verse falls back to the same-numbered verse in the pivot
    /// scheme when it exists there; multi-verse input yields nothing.
    pub fn map(&self, qualified: &QualifiedRef) -> Vec<QualifiedRef> {
        let Some(verse) = qualified.single_verse() else {
            return Vec::new();
        };
        match self.forward.get(&verse) {
            Some(refs) if !refs.is_empty() => refs.clone(),
            _ => self
                .reversify(verse, &self.pivot, qualified.part())
                .into_iter()
                .collect(),
        }
    }

    /// Map a pivot reference back to the local verses it stands for.
    ///
    /// A part-qualified miss retries against the whole verse. Verses known
    /// to be absent locally yield an empty set; anything else unmapped
    /// falls back to the same-numbered local verses.
    pub fn unmap(&self, qualified: &QualifiedRef) -> BTreeSet<VerseRef> {
        if let Some(verses) = self.backward.get(qualified) {
            return verses.clone();
        }
        if !qualified.is_whole()
            && let Some(verses) = self.backward.get(&qualified.to_whole())
        {
            return verses.clone();
        }

        let Some(range) = qualified.range() else {
            // An unknown pivot-less section resolves to nothing.
            return BTreeSet::new();
        };

        if range.verses(&self.pivot).all(|verse| self.absent.contains(&verse)) {
            return BTreeSet::new();
        }

        range
            .verses(&self.pivot)
            .filter_map(|verse| {
                self.reversify(verse, &self.local, None)
                    .and_then(|q| q.single_verse())
            })
            .collect()
    }

    /// Same-numbered verse in `target`, kept only when it exists there.
    fn reversify(
        &self,
        verse: VerseRef,
        target: &Versification,
        part: Option<&str>,
    ) -> Option<QualifiedRef> {
        if self.zeros_unmapped && verse.verse == 0 {
            return None;
        }
        if target.is_valid(verse.book, verse.chapter, verse.verse) {
            Some(QualifiedRef::Normal {
                range: VerseRange::single(verse),
                part: part.map(str::to_string),
            })
        } else {
            debug!(
                verse = %verse,
                scheme = target.name(),
                "no identity equivalent in target scheme"
            );
            None
        }
    }

    /// Deterministic debug rendering of all three tables.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let local = self.local.name();
        let pivot = self.pivot.name();
        let _ = writeln!(out, "mappings between {local} and {pivot}");

        let _ = writeln!(out, "forward:");
        for (verse, refs) in &self.forward {
            for pivot_ref in refs {
                let _ = writeln!(out, "  ({local}) {verse} => ({pivot}) {pivot_ref}");
            }
        }

        let _ = writeln!(out, "absent in {local}:");
        for verse in &self.absent {
            let _ = writeln!(out, "  ({pivot}) {verse}");
        }

        let _ = writeln!(out, "backward:");
        for (pivot_ref, verses) in &self.backward {
            for verse in verses {
                let _ = writeln!(out, "  ({pivot}) {pivot_ref} => ({local}) {verse}");
            }
        }
        out
    }
}
