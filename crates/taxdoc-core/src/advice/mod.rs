//! Advice prompt construction and response caching.

mod cache;

pub use cache::{AdviceCache, AdviceCacheState, CacheEntry, Clock, SystemClock};

use rust_decimal::Decimal;

use crate::tax::TaxComparison;

/// System role sent with every advice request.
pub const SYSTEM_PROMPT: &str =
    "You are a tax advisor. Provide clear, concise advice about Indian tax regimes.";

/// Build the advice prompt from a computed tax comparison.
///
/// The cache is keyed by this exact text, so the formatting must stay
/// deterministic for a given comparison.
pub fn advice_prompt(comparison: &TaxComparison) -> String {
    let input = &comparison.input;

    format!(
        "Based on the following tax information, provide specific advice on tax optimization:\n\
         \n\
         Income Details:\n\
         - Basic Salary: ₹{}\n\
         - HRA: ₹{}\n\
         - Special Allowance: ₹{}\n\
         - Bonus: ₹{}\n\
         - Total Income: ₹{}\n\
         \n\
         Deductions:\n\
         - Section 80C: ₹{}\n\
         - Section 80D: ₹{}\n\
         - Home Loan Interest: ₹{}\n\
         - Rent Paid: ₹{}\n\
         - Total Deductions: ₹{}\n\
         \n\
         Tax Amounts:\n\
         - Old Regime Tax: ₹{}\n\
         - New Regime Tax: ₹{}\n\
         \n\
         Please provide:\n\
         1. Analysis of current tax situation\n\
         2. Specific recommendations for tax optimization\n\
         3. Potential savings opportunities\n\
         4. Any relevant tax planning strategies\n\
         \n\
         Format the response in a clear, structured manner.",
        format_inr(input.basic_salary),
        format_inr(input.hra),
        format_inr(input.special_allowance),
        format_inr(input.bonus),
        format_inr(input.total_income()),
        format_inr(input.section_80c),
        format_inr(input.section_80d),
        format_inr(input.home_loan_interest),
        format_inr(input.rent_paid),
        format_inr(input.total_deductions()),
        format_inr(comparison.old.tax),
        format_inr(comparison.new.tax),
    )
}

/// Format a rupee amount with thousands separators and two decimal
/// places ("1,234,567.89").
pub fn format_inr(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((i, d)) => (i, d),
        None => (s.as_str(), "00"),
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_digit() && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}.{}", formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::{compare, TaxInput};
    use std::str::FromStr;

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(Decimal::from(1_000_000)), "1,000,000.00");
        assert_eq!(
            format_inr(Decimal::from_str("12345.67").unwrap()),
            "12,345.67"
        );
        assert_eq!(format_inr(Decimal::from(999)), "999.00");
        assert_eq!(format_inr(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let input = TaxInput {
            basic_salary: Decimal::from(600_000),
            hra: Decimal::from(200_000),
            section_80c: Decimal::from(150_000),
            ..Default::default()
        };
        let comparison = compare(&input);

        let a = advice_prompt(&comparison);
        let b = advice_prompt(&comparison);
        assert_eq!(a, b);
        assert!(a.contains("Basic Salary: ₹600,000.00"));
        assert!(a.contains("Old Regime Tax"));
    }
}
