//! Amount parsing for captured totals.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a captured amount such as `$ 1,250.50` or `1250.5`.
///
/// Currency signs, thousands separators and whitespace are dropped.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() || !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.50"), Some(Decimal::new(125050, 2)));
        assert_eq!(parse_amount("$ 6,300.00"), Some(Decimal::new(630000, 2)));
        assert_eq!(parse_amount("100"), Some(Decimal::new(100, 0)));
        assert_eq!(parse_amount("1 234 567.89"), Some(Decimal::new(123456789, 2)));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }
}
