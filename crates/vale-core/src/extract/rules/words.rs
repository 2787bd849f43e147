//! Repair table for Spanish amount-in-words strings.
//!
//! Rules only insert (or, in the cleanup tier, move) spaces; letters and
//! digits are carried through capture groups so their case is preserved.
//! Every insertion needs two glued non-space characters, so correctly
//! spaced text matches nothing.

use lazy_static::lazy_static;

use crate::extract::repair::{RepairRule, RepairTier, TextRepairer};

/// Tens that take the `Y` conjunction before a unit.
const TENS_WITH_Y: &str = "treinta|cuarenta|cincuenta|sesenta|setenta|ochenta|noventa";

/// The built-in rule table as `(tier, pattern, replacement)`.
pub fn spanish_rule_table() -> Vec<(RepairTier, String, &'static str)> {
    use RepairTier::*;

    vec![
        // MIL glued to a hundreds word: MILQUINIENTOS, MILCIENTO.
        (Irregular, r"(?i)(mil)(quinientos|setecientos|novecientos|ciento|cien)".into(), "${1} ${2}"),
        // CIENTO glued to an S-initial word would otherwise read as CIENTOS + rest.
        (Irregular, r"(?i)(ciento)(seis|siete|sesenta|setenta)".into(), "${1} ${2}"),
        (Boundary, r"(?i)(\p{L})(mil)".into(), "${1} ${2}"),
        (Boundary, r"(?i)(mil)([a-km-zñ])".into(), "${1} ${2}"),
        (Boundary, r"(?i)(mill[oó]n)([a-df-zñ])".into(), "${1} ${2}"),
        (Boundary, r"(?i)(mill[oó]nes)(\p{L})".into(), "${1} ${2}"),
        (Boundary, r"(?i)(ientos)(\p{L})".into(), "${1} ${2}"),
        (Boundary, r"(?i)(ciento)([a-rt-zñ])".into(), "${1} ${2}"),
        (Conjunction, format!(r"(?i)({TENS_WITH_Y})(y)"), "${1} ${2}"),
        (Conjunction, r"(?i)(\s)(y)(\p{L})".into(), "${1}${2} ${3}"),
        (Currency, r"(?i)(\p{L})(pesos?)".into(), "${1} ${2}"),
        (Currency, r"(?i)(pesos?)(\d)".into(), "${1} ${2}"),
        (Currency, r"(?i)(pesos?)(m\.?\s?n\.?)".into(), "${1} ${2}"),
        (Currency, r"(?i)(\d{2}/100)(m\.?\s?n\.?)".into(), "${1} ${2}"),
        (Currency, r"(\p{L})(\d)".into(), "${1} ${2}"),
        (Currency, r"(\d)(\p{L})".into(), "${1} ${2}"),
        // CIENTOS EIS -> CIENTO SEIS
        (Cleanup, r"(?i)\b(ciento)(s)\s+(eis|iete|esenta|etenta)\b".into(), "${1} ${2}${3}"),
        // PESO S -> PESOS
        (Cleanup, r"(?i)\b(peso)\s+(s)\b".into(), "${1}${2}"),
    ]
}

lazy_static! {
    /// Compiled built-in rule table.
    pub static ref SPANISH_REPAIR_RULES: Vec<RepairRule> = spanish_rule_table()
        .into_iter()
        .map(|(tier, pattern, replacement)| RepairRule::new(tier, &pattern, replacement).unwrap())
        .collect();

    /// Repairer over the built-in table with the default pass cap.
    pub static ref SPANISH_REPAIRER: TextRepairer =
        TextRepairer::new(SPANISH_REPAIR_RULES.clone()).unwrap();
}
