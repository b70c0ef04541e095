//! Cross-versification mapping engine.
//!
//! Conversion between two arbitrary schemes composes through the canonical
//! pivot scheme: each non-pivot scheme carries one [`PivotMapper`] built
//! from its mapping rules, and the [`MappingService`] chains a forward hop
//! (local to pivot) with a backward hop (pivot to target). Rule sides are
//! interpreted into [`QualifiedRef`] values, which also express verses
//! absent on either side and sub-verse part tags.

#![deny(unsafe_code)]

pub mod error;
pub mod mapper;
pub mod qualified;
mod resolve;
pub mod service;

pub use error::{MapError, Result};
pub use mapper::{PivotMapper, RulePair};
pub use qualified::QualifiedRef;
pub use service::{MappingService, MemoryRules, NoRules, RuleSource};
