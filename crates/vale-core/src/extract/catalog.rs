//! Field catalogs: which fields a document kind declares and how each one
//! is located, cleaned and typed.

use crate::error::ExtractionError;
use crate::models::DocumentKind;

use super::cascade::PatternCascade;
use super::normalize::{FieldNormalizer, Normalization};
use super::rules::patterns::*;

/// Which text variant a field is queried against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Layout-preserving backend first, robust backend as fallback.
    HighFidelity,
    /// Both backends concatenated.
    Merged,
}

/// Output type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    /// `DD/MM/YYYY`, parsed into a date; anything else is `None`.
    Date,
}

/// How a field's value is produced after (or instead of) its cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Cascade then normalizer.
    Cascade,
    /// Cascade, normalizer, then the amount-in-words repairer.
    AmountInWords,
    /// Folio resolver, keyed by the value of another field.
    Folio { vendor_field: String },
}

/// Extraction recipe for one canonical field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub cascade: PatternCascade,
    pub normalizer: FieldNormalizer,
    pub source: TextSource,
    pub kind: ValueKind,
    pub resolution: Resolution,
}

impl FieldSpec {
    /// Plain text field over the merged text.
    pub fn text(name: &str, patterns: &[&str]) -> Result<Self, ExtractionError> {
        let cascade =
            PatternCascade::compile(patterns).map_err(|source| ExtractionError::InvalidPattern {
                field: name.to_string(),
                source,
            })?;
        Ok(Self {
            name: name.to_string(),
            cascade,
            normalizer: FieldNormalizer::new(),
            source: TextSource::Merged,
            kind: ValueKind::Text,
            resolution: Resolution::Cascade,
        })
    }

    /// Date field over the merged text.
    pub fn date(name: &str, patterns: &[&str]) -> Result<Self, ExtractionError> {
        let mut spec = Self::text(name, patterns)?;
        spec.kind = ValueKind::Date;
        Ok(spec)
    }

    /// Folio field resolved from the text and the value of `vendor_field`.
    pub fn folio(name: &str, vendor_field: &str) -> Self {
        Self {
            name: name.to_string(),
            cascade: PatternCascade::default(),
            normalizer: FieldNormalizer::new(),
            source: TextSource::Merged,
            kind: ValueKind::Text,
            resolution: Resolution::Folio {
                vendor_field: vendor_field.to_string(),
            },
        }
    }

    /// Query the high-fidelity text first.
    pub fn high_fidelity(mut self) -> Self {
        self.source = TextSource::HighFidelity;
        self
    }

    /// Append a normalization step.
    pub fn normalize(mut self, step: Normalization) -> Self {
        self.normalizer = self.normalizer.with(step);
        self
    }

    /// Run the amount-in-words repairer after normalization.
    pub fn amount_in_words(mut self) -> Self {
        self.resolution = Resolution::AmountInWords;
        self
    }
}

/// Ordered field declarations for one document kind.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    kind: DocumentKind,
    fields: Vec<FieldSpec>,
}

impl FieldCatalog {
    /// Build a catalog. Folio fields must name a vendor field declared
    /// before them.
    pub fn new(kind: DocumentKind, fields: Vec<FieldSpec>) -> Result<Self, ExtractionError> {
        for (i, spec) in fields.iter().enumerate() {
            if let Resolution::Folio { vendor_field } = &spec.resolution {
                if !fields[..i].iter().any(|f| &f.name == vendor_field) {
                    return Err(ExtractionError::UnknownField(vendor_field.clone()));
                }
            }
        }
        Ok(Self { kind, fields })
    }

    /// Catalog for a document kind.
    pub fn for_kind(kind: DocumentKind) -> Result<Self, ExtractionError> {
        match kind {
            DocumentKind::Vale => Self::vale(),
            DocumentKind::Orden => Self::orden(),
        }
    }

    /// Purchase voucher fields.
    pub fn vale() -> Result<Self, ExtractionError> {
        use Normalization::*;

        Self::new(
            DocumentKind::Vale,
            vec![
                FieldSpec::text("no_vale", VALE_NO_VALE)?,
                FieldSpec::date("fecha", VALE_FECHA)?,
                FieldSpec::text("proveedor", VALE_PROVEEDOR)?
                    .high_fidelity()
                    .normalize(StripAfter("Domicilio".into()))
                    .normalize(StripAfter("RFC".into())),
                FieldSpec::text("rfc", VALE_RFC)?.normalize(Uppercase),
                FieldSpec::text("departamento", VALE_DEPARTAMENTO)?.normalize(CodeLabel),
                FieldSpec::text("sucursal", VALE_SUCURSAL)?.normalize(CodeLabel),
                FieldSpec::text("marca", VALE_MARCA)?.normalize(CodeLabel),
                FieldSpec::text("tipo_vale", VALE_TIPO)?.normalize(ValeType),
                FieldSpec::text("descripcion", VALE_DESCRIPCION)?
                    .high_fidelity()
                    .normalize(StripAfter("Domicilio".into())),
                FieldSpec::text("no_documento", VALE_NO_DOCUMENTO)?.normalize(Uppercase),
                FieldSpec::text("cuenta_mayor", VALE_CUENTA_MAYOR)?.normalize(DigitsOnly),
                FieldSpec::text("total", VALE_TOTAL)?.normalize(Amount),
            ],
        )
    }

    /// Payment order fields.
    pub fn orden() -> Result<Self, ExtractionError> {
        use Normalization::*;

        Self::new(
            DocumentKind::Orden,
            vec![
                FieldSpec::text("no_orden", ORDEN_NO_ORDEN)?,
                FieldSpec::date("fecha", ORDEN_FECHA)?,
                FieldSpec::text("proveedor", ORDEN_PROVEEDOR)?
                    .high_fidelity()
                    .normalize(StripAfter("Domicilio".into()))
                    .normalize(StripAfter("RFC".into())),
                FieldSpec::text("rfc", ORDEN_RFC)?.normalize(Uppercase),
                FieldSpec::text("total", ORDEN_TOTAL)?.normalize(Amount),
                FieldSpec::text("importe_letra", ORDEN_IMPORTE_LETRA)?
                    .normalize(Uppercase)
                    .amount_in_words(),
                FieldSpec::folio("folio", "proveedor"),
                FieldSpec::text("banco", ORDEN_BANCO)?,
                FieldSpec::text("cuenta_banco", ORDEN_CUENTA_BANCO)?.normalize(DigitsOnly),
                FieldSpec::text("clabe", ORDEN_CLABE)?.normalize(DigitsOnly),
                FieldSpec::text("cuenta_mayor", ORDEN_CUENTA_MAYOR)?.normalize(DigitsOnly),
                FieldSpec::text("descripcion", ORDEN_DESCRIPCION)?
                    .high_fidelity()
                    .normalize(StripAfter("Domicilio".into())),
                FieldSpec::text("no_documento", ORDEN_NO_DOCUMENTO)?.normalize(Uppercase),
            ],
        )
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Field specs in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Declared field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Look up a field spec by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether a field name is declared.
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Force every field onto the merged text.
    pub fn merged_only(mut self) -> Self {
        for field in &mut self.fields {
            field.source = TextSource::Merged;
        }
        self
    }
}
