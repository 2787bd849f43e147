//! Per-document extraction: runs every declared field through its cascade,
//! normalizer and resolver, then merges table-derived overrides.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::{DocumentIdentity, DocumentKind, ExtractionConfig, FieldValue, Record};

use super::cascade::collapse_whitespace;
use super::catalog::{FieldCatalog, FieldSpec, Resolution, TextSource, ValueKind};
use super::folio::FolioResolver;
use super::repair::TextRepairer;
use super::rules::dates::parse_fecha;

/// Field values supplied by a table-detection pass, keyed by field name.
pub type TableOverrides = IndexMap<String, String>;

/// The two text variants of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSources {
    /// Layout-preserving text (backend A).
    pub high_fidelity: String,
    /// Robust text (backend B).
    pub robust: String,
}

impl DocumentSources {
    pub fn new(high_fidelity: impl Into<String>, robust: impl Into<String>) -> Self {
        Self {
            high_fidelity: high_fidelity.into(),
            robust: robust.into(),
        }
    }

    /// Same text for both variants, e.g. for plain-text input.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            high_fidelity: text.clone(),
            robust: text,
        }
    }

    /// High-fidelity text, a newline, then the robust text.
    pub fn merged(&self) -> String {
        format!("{}\n{}", self.high_fidelity, self.robust)
    }

    /// Whether neither variant has any non-whitespace text.
    pub fn is_empty(&self) -> bool {
        self.high_fidelity.trim().is_empty() && self.robust.trim().is_empty()
    }

    /// Character count of the longer variant.
    pub fn text_length(&self) -> usize {
        self.high_fidelity
            .chars()
            .count()
            .max(self.robust.chars().count())
    }
}

/// Builds a complete [`Record`] for one document kind.
#[derive(Debug, Clone)]
pub struct ExtractionOrchestrator {
    catalog: FieldCatalog,
    repairer: TextRepairer,
    folio: FolioResolver,
}

impl ExtractionOrchestrator {
    /// Orchestrator with the built-in repair and vendor tables.
    pub fn new(catalog: FieldCatalog) -> Self {
        Self {
            catalog,
            repairer: TextRepairer::spanish(),
            folio: FolioResolver::standard(),
        }
    }

    /// Substitute the amount-in-words repairer.
    pub fn with_repairer(mut self, repairer: TextRepairer) -> Self {
        self.repairer = repairer;
        self
    }

    /// Substitute the folio resolver.
    pub fn with_folio_resolver(mut self, folio: FolioResolver) -> Self {
        self.folio = folio;
        self
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn kind(&self) -> DocumentKind {
        self.catalog.kind()
    }

    /// Extract every declared field. Fields that cannot be found are `None`.
    pub fn extract(
        &self,
        sources: &DocumentSources,
        overrides: Option<&TableOverrides>,
        identity: &DocumentIdentity,
    ) -> Record {
        let merged = sources.merged();
        let mut record = Record::empty(self.kind(), identity, self.catalog.names());

        for spec in self.catalog.fields() {
            let raw = match &spec.resolution {
                Resolution::Folio { vendor_field } => {
                    let vendor = record.text(vendor_field).unwrap_or_default();
                    Some(self.folio.resolve(&merged, vendor)).filter(|v| !v.is_empty())
                }
                _ => self.extract_text(spec, sources),
            };
            let value = raw.and_then(|v| typed_value(spec, &v));
            record.fields.insert(spec.name.clone(), value);
        }

        if let Some(overrides) = overrides {
            self.merge_overrides(&mut record, overrides);
        }

        info!(
            "extracted {} {}/{} fields from {}",
            self.kind(),
            record.found_count(),
            record.fields.len(),
            identity.file_name
        );
        record
    }

    fn extract_text(&self, spec: &FieldSpec, sources: &DocumentSources) -> Option<String> {
        let found = match spec.source {
            TextSource::HighFidelity => spec
                .cascade
                .evaluate_traced(&sources.high_fidelity)
                .map(|m| (m, "high-fidelity"))
                .or_else(|| {
                    spec.cascade
                        .evaluate_traced(&sources.robust)
                        .map(|m| (m, "robust"))
                }),
            TextSource::Merged => spec
                .cascade
                .evaluate_across(&[sources.high_fidelity.as_str(), sources.robust.as_str()])
                .map(|(m, source)| (m, if source == 0 { "high-fidelity" } else { "robust" })),
        };

        let Some((hit, source)) = found else {
            debug!("{}: no match", spec.name);
            return None;
        };
        debug!("{}: rule {} on {} text", spec.name, hit.rule, source);

        let mut value = spec.normalizer.normalize(&hit.value);
        if spec.resolution == Resolution::AmountInWords {
            value = self.repairer.repair(&value);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    fn merge_overrides(&self, record: &mut Record, overrides: &TableOverrides) {
        for (name, raw) in overrides {
            let Some(spec) = self.catalog.field(name) else {
                debug!("ignoring override for undeclared field {}", name);
                continue;
            };
            let value = collapse_whitespace(raw);
            if value.is_empty() {
                continue;
            }
            match typed_value(spec, &value) {
                Some(value) => {
                    debug!("{}: table override {}", name, value);
                    record.fields.insert(name.clone(), Some(value));
                }
                None => debug!("{}: override {:?} is not a valid value", name, raw),
            }
        }
    }
}

fn typed_value(spec: &FieldSpec, value: &str) -> Option<FieldValue> {
    match spec.kind {
        ValueKind::Text => Some(FieldValue::Text(value.to_string())),
        ValueKind::Date => parse_fecha(value).map(FieldValue::Date),
    }
}

/// One orchestrator per document kind, built from configuration.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    vale: ExtractionOrchestrator,
    orden: ExtractionOrchestrator,
}

impl ExtractionEngine {
    /// Build both orchestrators from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        let repairer = TextRepairer::spanish().with_max_passes(config.repair_max_passes);
        let build = |catalog: FieldCatalog| {
            let catalog = if config.prefer_high_fidelity {
                catalog
            } else {
                catalog.merged_only()
            };
            ExtractionOrchestrator::new(catalog).with_repairer(repairer.clone())
        };

        Ok(Self {
            vale: build(FieldCatalog::vale()?),
            orden: build(FieldCatalog::orden()?),
        })
    }

    /// Engine with default settings.
    pub fn standard() -> Result<Self, ExtractionError> {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn orchestrator(&self, kind: DocumentKind) -> &ExtractionOrchestrator {
        match kind {
            DocumentKind::Vale => &self.vale,
            DocumentKind::Orden => &self.orden,
        }
    }

    /// Extract with an explicit document kind.
    pub fn extract(
        &self,
        kind: DocumentKind,
        sources: &DocumentSources,
        overrides: Option<&TableOverrides>,
        identity: &DocumentIdentity,
    ) -> Record {
        self.orchestrator(kind).extract(sources, overrides, identity)
    }

    /// Extract, detecting the document kind from the text.
    pub fn extract_auto(
        &self,
        sources: &DocumentSources,
        overrides: Option<&TableOverrides>,
        identity: &DocumentIdentity,
    ) -> Record {
        let kind = DocumentKind::detect(&sources.merged());
        self.extract(kind, sources, overrides, identity)
    }
}
