//! Regex pattern templates for salary field extraction.
//!
//! Each keyword gets four numeric-capture patterns, tried strictly in
//! this order. The ordering is load-bearing: on ambiguous text it
//! determines which match wins, so it must not be reordered.

use lazy_static::lazy_static;
use regex::Regex;

/// Numeric capture shared by all templates: digits with optional
/// grouping commas and an optional decimal part ("12,345.67").
pub const NUMBER: &str = r"(\d+[\d,]*\.?\d*)";

/// Currency marker preceding an amount ("Rs.", "Rs" or the rupee sign).
pub const CURRENCY: &str = r"(?:Rs\.?|₹)?\s*";

/// Build the four ordered patterns for one keyword:
/// 1. keyword, non-digit filler, number (tightest)
/// 2. keyword, anything (lazy), number (loose)
/// 3. keyword, anything, optional currency marker, number
/// 4. currency-marked number before the keyword (right-to-left labels)
pub fn keyword_patterns(keyword: &str) -> [Regex; 4] {
    let kw = regex::escape(keyword);
    [
        compile(&format!(r"(?i){kw}[^\d]*{NUMBER}")),
        compile(&format!(r"(?i){kw}.*?{NUMBER}")),
        compile(&format!(r"(?i){kw}.*?{CURRENCY}{NUMBER}")),
        compile(&format!(r"(?i){CURRENCY}{NUMBER}.*?{kw}")),
    ]
}

// Keyword text is escaped, so compilation cannot fail.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern {pattern:?}: {e}"))
}

lazy_static! {
    /// A standalone currency-marked amount. The resolver uses it to
    /// warn when a document carries amounts that matched no label.
    pub static ref ANY_AMOUNT: Regex =
        Regex::new(r"(?:Rs\.?|₹)\s*\d+[\d,]*\.?\d*").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tight_pattern_matches_label_value() {
        let [tight, ..] = keyword_patterns("Basic Salary");
        let caps = tight.captures("Basic Salary: Rs. 600000").unwrap();
        assert_eq!(&caps[1], "600000");
    }

    #[test]
    fn test_tight_pattern_is_case_insensitive() {
        let [tight, ..] = keyword_patterns("HRA");
        let caps = tight.captures("hra 50000").unwrap();
        assert_eq!(&caps[1], "50000");
    }

    #[test]
    fn test_reversed_pattern_matches_value_before_label() {
        let [_, _, _, reversed] = keyword_patterns("Basic Salary");
        let caps = reversed.captures("₹ 600000   Basic Salary").unwrap();
        assert_eq!(&caps[1], "600000");
    }

    #[test]
    fn test_keyword_with_regex_metacharacters_is_escaped() {
        let [tight, ..] = keyword_patterns("Basic (monthly)");
        assert!(tight.captures("Basic (monthly): 45000").is_some());
    }

    #[test]
    fn test_any_amount_requires_currency_marker() {
        assert!(ANY_AMOUNT.is_match("paid ₹55,000 in total"));
        assert!(ANY_AMOUNT.is_match("Rs. 600000"));
        assert!(!ANY_AMOUNT.is_match("account number 12345"));
    }

    #[test]
    fn test_number_capture_keeps_grouping_commas() {
        let [tight, ..] = keyword_patterns("Gross Salary");
        let caps = tight.captures("Gross Salary: ₹10,00,000").unwrap();
        assert_eq!(&caps[1], "10,00,000");
    }
}
