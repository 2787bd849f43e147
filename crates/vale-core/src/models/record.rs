//! Extracted record data model.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extract::rules::amounts::parse_amount;

/// Kind of accounting document being extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Purchase voucher (vale).
    Vale,
    /// Payment order (orden de pago).
    Orden,
}

impl DocumentKind {
    /// Guess the document kind from its text.
    ///
    /// Payment orders carry an "ORDEN DE PAGO" caption; everything else is
    /// treated as a vale.
    pub fn detect(text: &str) -> Self {
        let upper = text.to_uppercase();
        let compact: String = upper.split_whitespace().collect();
        if compact.contains("ORDENDEPAGO") {
            DocumentKind::Orden
        } else {
            DocumentKind::Vale
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Vale => "vale",
            DocumentKind::Orden => "orden",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Calendar date (only for date-kind fields).
    Date(NaiveDate),
    /// Plain text.
    Text(String),
}

impl FieldValue {
    /// Text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Date(_) => None,
        }
    }

    /// Date content, if this is a date value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.format("%d/%m/%Y")),
        }
    }
}

/// The structured result for one document.
///
/// Every field declared for the document kind is present in `fields`, in
/// declaration order. A field that could not be found maps to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Document kind the fields were extracted for.
    pub kind: DocumentKind,

    /// Original file name, passed through from the caller.
    pub file_name: String,

    /// Full path, passed through from the caller.
    pub path: PathBuf,

    /// Field values keyed by canonical field name.
    pub fields: IndexMap<String, Option<FieldValue>>,
}

impl Record {
    /// Create a record with every given field explicitly absent.
    pub fn empty<'a>(
        kind: DocumentKind,
        identity: &DocumentIdentity,
        field_names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            kind,
            file_name: identity.file_name.clone(),
            path: identity.path.clone(),
            fields: field_names
                .into_iter()
                .map(|name| (name.to_string(), None))
                .collect(),
        }
    }

    /// Value of a field, or `None` when absent or undeclared.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).and_then(|v| v.as_ref())
    }

    /// Text value of a field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Date value of a field.
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.get(field).and_then(FieldValue::as_date)
    }

    /// Parse a text field as a monetary amount ("1,234.56").
    pub fn amount(&self, field: &str) -> Option<Decimal> {
        self.text(field).and_then(parse_amount)
    }

    /// Whether the field name is declared in this record.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Names of declared fields that ended up absent.
    pub fn missing_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Number of fields with a value.
    pub fn found_count(&self) -> usize {
        self.fields.values().filter(|v| v.is_some()).count()
    }
}

/// Document identity echoed into the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentIdentity {
    /// File name (no directory).
    pub file_name: String,
    /// Full path as given by the caller.
    pub path: PathBuf,
}

impl DocumentIdentity {
    /// Build an identity from a path, deriving the file name.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            file_name: path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string(),
            path: path.to_path_buf(),
        }
    }
}
