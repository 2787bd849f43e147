//! Field extraction for vales and payment orders.
//!
//! The pieces compose bottom-up: a [`PatternCascade`] finds a raw capture,
//! a [`FieldNormalizer`] cleans it, and the [`TextRepairer`] and
//! [`FolioResolver`] handle the two fields that need more than a pattern.
//! [`ExtractionOrchestrator`] runs a [`FieldCatalog`] over a document's
//! text variants and produces a [`Record`](crate::models::Record).

pub mod cascade;
pub mod catalog;
pub mod folio;
pub mod normalize;
pub mod orchestrator;
pub mod repair;
pub mod rules;

pub use cascade::{CascadeMatch, PatternCascade, PatternRule, collapse_whitespace};
pub use catalog::{FieldCatalog, FieldSpec, Resolution, TextSource, ValueKind};
pub use folio::{FolioResolver, FolioStep, VendorBranch};
pub use normalize::{FieldNormalizer, Normalization};
pub use orchestrator::{DocumentSources, ExtractionEngine, ExtractionOrchestrator, TableOverrides};
pub use repair::{Repair, RepairRule, RepairTier, TextRepairer};
