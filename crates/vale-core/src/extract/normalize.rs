//! Per-field cleanup of raw captures.
//!
//! Every normalizer first collapses whitespace, then applies its field
//! specific steps in order. Each step is idempotent, so the whole
//! normalizer is too.

use lazy_static::lazy_static;
use regex::Regex;

use super::cascade::collapse_whitespace;

lazy_static! {
    static ref CODE_GLUED_LABEL: Regex = Regex::new(r"^(\d+)(\p{L})").unwrap();
    static ref CODE_DASH_LABEL: Regex = Regex::new(r"^(\d+)\s*-\s*(\S)").unwrap();
}

/// Known vale-type code prefixes and their abbreviations.
///
/// Checked in order against the upper-cased value with spaces removed.
const VALE_TYPE_PREFIXES: &[(&str, &str)] = &[
    ("ANT", "ANT"),
    ("CAJA", "CC"),
    ("CC", "CC"),
    ("VIAT", "GV"),
    ("GV", "GV"),
    ("REEMB", "R"),
    ("COMP", "C"),
];

/// One field-specific cleanup step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    /// Separate a leading numeric code from its label:
    /// `6ADMINISTRACION` → `6 ADMINISTRACION`, `2-NISSAN` → `2 - NISSAN`.
    CodeLabel,
    /// Reduce a glued code + description to a short abbreviation.
    ValeType,
    /// Drop a marker word (case-insensitive) and everything after it.
    StripAfter(String),
    /// Upper-case the value.
    Uppercase,
    /// Keep ASCII digits only.
    DigitsOnly,
    /// Drop currency signs and whitespace, keeping digits, `,` and `.`.
    Amount,
}

impl Normalization {
    fn apply(&self, value: &str) -> String {
        match self {
            Normalization::CodeLabel => code_label(value),
            Normalization::ValeType => vale_type(value),
            Normalization::StripAfter(marker) => strip_after(value, marker),
            Normalization::Uppercase => value.to_uppercase(),
            Normalization::DigitsOnly => value.chars().filter(|c| c.is_ascii_digit()).collect(),
            Normalization::Amount => value
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
                .collect(),
        }
    }
}

/// Cleanup pipeline for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNormalizer {
    steps: Vec<Normalization>,
}

impl FieldNormalizer {
    /// Normalizer that only collapses whitespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn with(mut self, step: Normalization) -> Self {
        self.steps.push(step);
        self
    }

    /// Steps applied after the whitespace collapse.
    pub fn steps(&self) -> &[Normalization] {
        &self.steps
    }

    /// Clean a raw capture. The result may be empty.
    pub fn normalize(&self, raw: &str) -> String {
        let mut value = collapse_whitespace(raw);
        for step in &self.steps {
            value = collapse_whitespace(&step.apply(&value));
        }
        value
    }
}

fn code_label(value: &str) -> String {
    let value = CODE_GLUED_LABEL.replace(value, "${1} ${2}");
    CODE_DASH_LABEL.replace(&value, "${1} - ${2}").into_owned()
}

fn vale_type(value: &str) -> String {
    let compact: String = value.to_uppercase().split_whitespace().collect();
    if let Some((_, abbrev)) = VALE_TYPE_PREFIXES
        .iter()
        .find(|(prefix, _)| compact.starts_with(prefix))
    {
        return abbrev.to_string();
    }

    let has_letters = value.chars().any(char::is_alphabetic);
    let is_upper = !value.chars().any(char::is_lowercase);
    if has_letters && is_upper && value.chars().count() > 2 {
        return value.chars().take(2).collect();
    }
    value.to_string()
}

fn strip_after(value: &str, marker: &str) -> String {
    let lower = value.to_lowercase();
    let marker = marker.to_lowercase();
    // Lowercasing can change byte lengths for some scripts; only cut when
    // the offsets line up with the original.
    match lower.find(&marker) {
        Some(pos) if lower.len() == value.len() && value.is_char_boundary(pos) => {
            value[..pos].trim_end().to_string()
        }
        _ => value.to_string(),
    }
}
