//! Numeric readings of free-text catalog fields.
//!
//! Editors type ratings and amounts by hand ("4.5 out of 5", "$25", "N/A").
//! Anything that does not yield a number reads as 0.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

static NOT_AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9.]").unwrap());

/// The longest numeric prefix of `raw`, after leading whitespace.
pub fn leading_number(raw: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(raw.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Expert rating: the first space-separated token, read as a number.
pub fn expert_rating(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.split(' ').next())
        .and_then(leading_number)
        .unwrap_or(0.0)
}

/// Money-like field: every character other than digits and dots is dropped
/// before reading, so "$1,000" is 1000.
pub fn amount(raw: Option<&str>) -> f64 {
    raw.map(|s| NOT_AMOUNT.replace_all(s, ""))
        .and_then(|s| leading_number(&s))
        .unwrap_or(0.0)
}

/// A user-entered threshold such as "4" or "10". Blank means no threshold.
pub fn threshold(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    leading_number(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expert_rating_formats() {
        assert_eq!(expert_rating(Some("4.5 out of 5")), 4.5);
        assert_eq!(expert_rating(Some("4.5/5")), 4.5);
        assert_eq!(expert_rating(Some("4.5")), 4.5);
        assert_eq!(expert_rating(Some("4")), 4.0);
    }

    #[test]
    fn test_expert_rating_unparsable_is_zero() {
        assert_eq!(expert_rating(None), 0.0);
        assert_eq!(expert_rating(Some("")), 0.0);
        assert_eq!(expert_rating(Some("N/A")), 0.0);
        assert_eq!(expert_rating(Some("great 4.5")), 0.0);
    }

    #[test]
    fn test_amount_strips_symbols() {
        assert_eq!(amount(Some("$25")), 25.0);
        assert_eq!(amount(Some("$1,000")), 1000.0);
        assert_eq!(amount(Some("€0.50")), 0.5);
        assert_eq!(amount(Some("N/A")), 0.0);
        assert_eq!(amount(None), 0.0);
    }

    #[test]
    fn test_amount_keeps_first_number_of_dotted_run() {
        // "1.2.3" reads up to the second dot
        assert_eq!(amount(Some("$1.2.3")), 1.2);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(threshold(""), None);
        assert_eq!(threshold("  "), None);
        assert_eq!(threshold("4"), Some(4.0));
        assert_eq!(threshold("3.5+"), Some(3.5));
        assert_eq!(threshold("abc"), None);
    }

    #[test]
    fn test_leading_number_rejects_bare_sign() {
        assert_eq!(leading_number("-"), None);
        assert_eq!(leading_number(".5"), Some(0.5));
        assert_eq!(leading_number("  7 days"), Some(7.0));
    }
}
