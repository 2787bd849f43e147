//! Folio (external invoice reference) resolution for payment orders.
//!
//! Order text usually carries several plausible numbers: the folio, bank
//! references, dates, postal codes. Which one is the folio depends on who
//! issued the document, so resolution goes through a table of vendor
//! branches keyed by fragments of the vendor name. The generic branch is
//! the explicit default when no vendor fragment matches.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref DIGIT_RUN: Regex = Regex::new(r"\d+").unwrap();

    static ref PREFIX_DASH: Regex = Regex::new(r"(?i)\b[A-Z]{1,4}[ \t]?-[ \t]?(\d{4,})\b").unwrap();

    /// Shapes that contain digits but are never folios.
    static ref NON_FOLIO_SHAPES: Vec<Regex> = vec![
        // Full dates: 15/03/2024, 15-03-24, 15.03.2024
        Regex::new(r"\b\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}\b").unwrap(),
        // Postal codes: C.P. 64000, CP 64000
        Regex::new(r"(?i)\bc\.?[ \t]?p\.?[ \t]*:?[ \t]*\d{5}\b").unwrap(),
        // Amounts: $ 1,250.00, 1250.00
        Regex::new(r"(?:\$[ \t]*)?\b\d{1,3}(?:,\d{3})+(?:\.\d{2})?\b|\b\d+\.\d{2}\b").unwrap(),
        // Phone numbers after a label
        Regex::new(r"(?i)\btel(?:[eé]fono)?\.?[ \t]*:?[ \t]*[\d \t()-]{7,}").unwrap(),
    ];
}

/// Four-digit tokens in this range are read as calendar years.
const YEAR_RANGE: std::ops::RangeInclusive<u32> = 1990..=2039;

/// One extraction or filter step of a vendor branch.
#[derive(Debug, Clone)]
pub enum FolioStep {
    /// A previously seen folio value: returned when present anywhere in the text.
    Literal(String),
    /// A labelled pattern; the first capturing group is the folio.
    Marker(Regex),
    /// First standalone digit run whose length is within the window.
    DigitWindow { min: usize, max: usize },
    /// `PREFIX-digits` convention. Four and five digit bodies win; longer
    /// bodies ending in an embedded date are trimmed to their leading digits.
    PrefixDash,
    /// Shortest standalone digit run within the window (first on ties).
    Shortest { min: usize, max: usize },
}

impl FolioStep {
    /// Run the step against the order text.
    pub fn run(&self, text: &str) -> Option<String> {
        match self {
            FolioStep::Literal(value) => text.contains(value.as_str()).then(|| value.clone()),
            FolioStep::Marker(regex) => regex
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|v| !v.is_empty()),
            FolioStep::DigitWindow { min, max } => candidates(text, *min, *max).into_iter().next(),
            FolioStep::PrefixDash => prefix_dash(text),
            FolioStep::Shortest { min, max } => candidates(text, *min, *max)
                .into_iter()
                .min_by_key(|c| c.len()),
        }
    }
}

/// A named strategy selected by vendor-name fragments.
#[derive(Debug, Clone)]
pub struct VendorBranch {
    /// Branch name, used in logs.
    pub name: String,
    /// Vendor-name fragments that select this branch (case-insensitive,
    /// whitespace-insensitive substring match).
    pub fragments: Vec<String>,
    /// Steps tried in order; the first that yields a value wins.
    pub steps: Vec<FolioStep>,
}

impl VendorBranch {
    /// Create a branch.
    pub fn new(name: impl Into<String>, fragments: &[&str], steps: Vec<FolioStep>) -> Self {
        Self {
            name: name.into(),
            fragments: fragments.iter().map(|f| compact_upper(f)).collect(),
            steps,
        }
    }

    /// Whether the vendor name selects this branch.
    pub fn matches(&self, vendor: &str) -> bool {
        let vendor = compact_upper(vendor);
        !vendor.is_empty() && self.fragments.iter().any(|f| vendor.contains(f.as_str()))
    }

    /// Run the steps in order, returning the first value and its step index.
    fn run(&self, text: &str) -> Option<(usize, String)> {
        self.steps
            .iter()
            .enumerate()
            .find_map(|(i, step)| step.run(text).map(|v| (i, v)))
    }
}

/// Vendor-aware folio resolver.
#[derive(Debug, Clone)]
pub struct FolioResolver {
    branches: Vec<VendorBranch>,
    generic: VendorBranch,
}

impl FolioResolver {
    /// Build a resolver from vendor branches and the default branch.
    pub fn new(branches: Vec<VendorBranch>, generic: VendorBranch) -> Self {
        Self { branches, generic }
    }

    /// Resolver with the built-in vendor table.
    pub fn standard() -> Self {
        super::rules::vendors::STANDARD_FOLIO_RESOLVER.clone()
    }

    /// Vendor branches, in match order.
    pub fn branches(&self) -> &[VendorBranch] {
        &self.branches
    }

    /// Branch the vendor name selects (the generic branch when none match).
    pub fn select(&self, vendor: &str) -> &VendorBranch {
        self.branches
            .iter()
            .find(|b| b.matches(vendor))
            .unwrap_or(&self.generic)
    }

    /// Resolve the folio. Returns an empty string when nothing qualifies.
    pub fn resolve(&self, text: &str, vendor: &str) -> String {
        let branch = self.select(vendor);
        match branch.run(text) {
            Some((step, value)) => {
                debug!("folio {} from branch '{}' step {}", value, branch.name, step);
                value
            }
            None => {
                debug!("no folio from branch '{}'", branch.name);
                String::new()
            }
        }
    }
}

impl Default for FolioResolver {
    fn default() -> Self {
        Self::standard()
    }
}

fn compact_upper(s: &str) -> String {
    s.split_whitespace().collect::<String>().to_uppercase()
}

/// Blank out every span with a known non-folio shape.
fn mask_non_folio(text: &str) -> String {
    NON_FOLIO_SHAPES
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, " ").into_owned())
}

/// Standalone digit runs (not touching letters or other digits) within a
/// length window, in text order, with calendar years removed.
fn candidates(text: &str, min: usize, max: usize) -> Vec<String> {
    let masked = mask_non_folio(text);
    DIGIT_RUN
        .find_iter(&masked)
        .filter(|m| {
            let before = masked[..m.start()].chars().next_back();
            let after = masked[m.end()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .map(|m| m.as_str())
        .filter(|d| (min..=max).contains(&d.len()))
        .filter(|d| !is_year(d))
        .map(str::to_string)
        .collect()
}

fn is_year(digits: &str) -> bool {
    digits.len() == 4 && digits.parse::<u32>().is_ok_and(|y| YEAR_RANGE.contains(&y))
}

fn prefix_dash(text: &str) -> Option<String> {
    let mut trimmed = None;
    for caps in PREFIX_DASH.captures_iter(text) {
        let body = &caps[1];
        if (4..=5).contains(&body.len()) {
            return Some(body.to_string());
        }
        if trimmed.is_none() {
            trimmed = strip_date_suffix(body);
        }
    }
    trimmed
}

/// Trim a trailing `DDMMYYYY` or `DDMMYY` date, keeping a 4–5 digit head.
fn strip_date_suffix(body: &str) -> Option<String> {
    [(8, "%d%m%Y"), (6, "%d%m%y")]
        .iter()
        .find_map(|&(suffix_len, format)| {
            let head_len = body.len().checked_sub(suffix_len)?;
            if !(4..=5).contains(&head_len) {
                return None;
            }
            let (head, suffix) = body.split_at(head_len);
            NaiveDate::parse_from_str(suffix, format)
                .ok()
                .map(|_| head.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_oleksei_literal_takes_precedence() {
        let resolver = FolioResolver::standard();
        let text = "ORDEN DE PAGO 133\nReferencia 88123456\nFactura 1234 pago 5718 abril";
        assert_eq!(resolver.resolve(text, "COMERCIAL OLEKSEI SA DE CV"), "5718");
        assert_eq!(resolver.resolve("ref 57184", "oleksei"), "5718");
    }

    #[test]
    fn test_oleksei_falls_back_to_four_digit_window() {
        let resolver = FolioResolver::standard();
        let text = "Pago factura 20 de marzo 2024, folio 4410, referencia 99881234";
        assert_eq!(resolver.resolve(text, "OLEKSEI"), "4410");
    }

    #[test]
    fn test_generic_prefers_shortest() {
        let resolver = FolioResolver::standard();
        let text = "Pago de factura 4521 con referencia 73920184";
        assert_eq!(resolver.resolve(text, "PROVEEDORA DEL VALLE SA"), "4521");

        let text = "Referencia 73920184 factura 98231 y 4521";
        assert_eq!(resolver.resolve(text, "DESCONOCIDO"), "4521");
    }

    #[test]
    fn test_generic_excludes_non_folio_shapes() {
        let resolver = FolioResolver::standard();
        let text = "Fecha 15/03/2024 C.P. 64000 Importe $ 1,250.00 2024 Tel: 81 8345 6789 factura 77120";
        assert_eq!(resolver.resolve(text, ""), "77120");
    }

    #[test]
    fn test_generic_keeps_comma_separated_folios() {
        let resolver = FolioResolver::standard();
        let text = "Pago facturas 4521,4522 referencia 73920184";
        assert_eq!(resolver.resolve(text, "DESCONOCIDO"), "4521");
        assert_eq!(resolver.resolve("Facturas 12345,678 y 88123456", "DESCONOCIDO"), "12345");
        assert_eq!(resolver.resolve("Facturas 4410,4411", "OLEKSEI"), "4410");
    }

    #[test]
    fn test_generic_ignores_digits_glued_to_letters() {
        let resolver = FolioResolver::standard();
        let text = "RFC ABC010203XY1 cuenta A12345 folio 3321";
        assert_eq!(resolver.resolve(text, "X"), "3321");
    }

    #[test]
    fn test_generic_empty_when_no_candidate() {
        let resolver = FolioResolver::standard();
        assert_eq!(resolver.resolve("referencia 73920184 del 2024", "X"), "");
        assert_eq!(resolver.resolve("", "OLEKSEI"), "");
    }

    #[test]
    fn test_prefix_dash_prefers_short_body() {
        let resolver = FolioResolver::standard();
        let text = "Facturas A-1234150324 y A-5678";
        assert_eq!(resolver.resolve(text, "AUTOZONE DE MEXICO"), "5678");
    }

    #[test]
    fn test_prefix_dash_trims_date_suffix() {
        let resolver = FolioResolver::standard();
        assert_eq!(resolver.resolve("Factura FAC-123415032024", "REFACCIONARIA GARZA"), "1234");
        assert_eq!(resolver.resolve("Factura B - 45678150324", "LLANTERA DEL NORTE"), "45678");
        assert_eq!(resolver.resolve("Factura B-999999999999", "LLANTERA"), "");
    }

    #[test]
    fn test_marker_branch() {
        let resolver = FolioResolver::standard();
        let text = "HOME DEPOT MEXICO\nFOLIO FISCAL: 908812\nTotal 3,200.00 ticket 4412";
        assert_eq!(resolver.resolve(text, "HOMEDEPOT"), "908812");
        assert_eq!(resolver.resolve("sin marcador, ticket 4412", "Home Depot"), "4412");
    }

    #[test]
    fn test_branch_selection_is_case_and_space_insensitive() {
        let resolver = FolioResolver::standard();
        assert_eq!(resolver.select("home  depot").name, "home-depot");
        assert_eq!(resolver.select("Oleksei").name, "oleksei");
        assert_eq!(resolver.select("").name, "generic");
        assert_eq!(resolver.select("ACME").name, "generic");
    }

    #[test]
    fn test_injected_table() {
        let resolver = FolioResolver::new(
            vec![VendorBranch::new("acme", &["ACME"], vec![FolioStep::Literal("42".into())])],
            VendorBranch::new("generic", &[], vec![FolioStep::DigitWindow { min: 3, max: 3 }]),
        );
        assert_eq!(resolver.resolve("n 42 y 999", "Acme Corp"), "42");
        assert_eq!(resolver.resolve("n 42 y 999", "Otro"), "999");
    }

    #[test]
    fn test_strip_date_suffix() {
        assert_eq!(strip_date_suffix("123415032024"), Some("1234".to_string()));
        assert_eq!(strip_date_suffix("1234150324"), Some("1234".to_string()));
        assert_eq!(strip_date_suffix("1234999999"), None);
        assert_eq!(strip_date_suffix("12"), None);
    }
}
