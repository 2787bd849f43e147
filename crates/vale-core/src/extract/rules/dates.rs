//! Date parsing for captured `DD/MM/YYYY` values.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DDMMYYYY: Regex = Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap();
}

/// Parse a strict `DD/MM/YYYY` date. Anything else yields `None`.
pub fn parse_fecha(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !DDMMYYYY.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fecha() {
        assert_eq!(parse_fecha("20/03/2024"), NaiveDate::from_ymd_opt(2024, 3, 20));
        assert_eq!(parse_fecha(" 5/1/2023 "), NaiveDate::from_ymd_opt(2023, 1, 5));
    }

    #[test]
    fn test_parse_fecha_rejects_other_shapes() {
        assert_eq!(parse_fecha("2024-03-20"), None);
        assert_eq!(parse_fecha("20/03/24"), None);
        assert_eq!(parse_fecha("31/02/2024"), None);
        assert_eq!(parse_fecha("20 de marzo de 2024"), None);
        assert_eq!(parse_fecha(""), None);
    }
}
