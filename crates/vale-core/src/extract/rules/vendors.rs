//! Built-in vendor table for folio resolution.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extract::folio::{FolioResolver, FolioStep, VendorBranch};

/// Shortest digit run the generic branch accepts as a folio.
pub const FOLIO_MIN_DIGITS: usize = 4;
/// Longest digit run the generic branch accepts as a folio.
pub const FOLIO_MAX_DIGITS: usize = 5;

lazy_static! {
    static ref FOLIO_LABEL: Regex = Regex::new(
        r"(?i)\bfolio(?:[ \t]+fiscal)?[ \t]*(?:no\.?|#)?[ \t]*:?[ \t]*(\d{3,10})\b"
    ).unwrap();

    static ref FACTURA_COLUMN: Regex = Regex::new(
        r"(?im)^[ \t]*factura[ \t]*(?:no\.?|#)?[ \t]*:?[ \t]*(\d{4,6})\b"
    ).unwrap();

    pub static ref STANDARD_FOLIO_RESOLVER: FolioResolver = FolioResolver::new(
        standard_branches(),
        generic_branch(),
    );
}

fn shortest() -> FolioStep {
    FolioStep::Shortest {
        min: FOLIO_MIN_DIGITS,
        max: FOLIO_MAX_DIGITS,
    }
}

/// Default branch: shortest standalone 4–5 digit run.
pub fn generic_branch() -> VendorBranch {
    VendorBranch::new("generic", &[], vec![shortest()])
}

/// Vendor branches in match order.
pub fn standard_branches() -> Vec<VendorBranch> {
    vec![
        VendorBranch::new(
            "oleksei",
            &["OLEKSEI"],
            vec![
                FolioStep::Literal("5718".to_string()),
                FolioStep::DigitWindow { min: 4, max: 4 },
            ],
        ),
        VendorBranch::new(
            "home-depot",
            &["HOME DEPOT"],
            vec![FolioStep::Marker(FOLIO_LABEL.clone()), shortest()],
        ),
        VendorBranch::new(
            "ferretera",
            &["FERRETERA"],
            vec![
                FolioStep::Marker(FACTURA_COLUMN.clone()),
                FolioStep::Marker(FOLIO_LABEL.clone()),
                shortest(),
            ],
        ),
        VendorBranch::new(
            "prefix-dash",
            &["AUTOZONE", "REFACCIONARIA", "LLANTERA"],
            vec![FolioStep::PrefixDash],
        ),
    ]
}
