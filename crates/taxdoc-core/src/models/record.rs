//! Salary record extracted from a document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of fields in a [`SalaryRecord`].
pub const FIELD_COUNT: usize = 11;

/// Salary and deduction figures extracted from a single document.
///
/// Every field is an annual rupee amount, non-negative, defaulting to
/// zero when the document did not yield a value. The record is built
/// once per document by the resolver, adjusted in place by the
/// fallback rules, and then handed on read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRecord {
    /// Basic salary component.
    pub basic_salary: Decimal,

    /// House rent allowance.
    pub hra: Decimal,

    /// Special allowance.
    pub special_allowance: Decimal,

    /// Bonus (performance/annual).
    pub bonus: Decimal,

    /// Section 80C investments.
    pub section_80c: Decimal,

    /// Section 80D (health insurance) premium.
    pub section_80d: Decimal,

    /// Interest paid on a housing loan.
    pub home_loan_interest: Decimal,

    /// Annual rent paid.
    pub rent_paid: Decimal,

    /// Gross salary.
    pub gross_salary: Decimal,

    /// Net (take-home) salary.
    pub net_salary: Decimal,

    /// Tax already deducted at source.
    pub tax_deducted: Decimal,
}

impl SalaryRecord {
    /// All fields as `(name, value)` pairs, in canonical order.
    pub fn fields(&self) -> [(&'static str, Decimal); FIELD_COUNT] {
        [
            ("basic_salary", self.basic_salary),
            ("hra", self.hra),
            ("special_allowance", self.special_allowance),
            ("bonus", self.bonus),
            ("section_80c", self.section_80c),
            ("section_80d", self.section_80d),
            ("home_loan_interest", self.home_loan_interest),
            ("rent_paid", self.rent_paid),
            ("gross_salary", self.gross_salary),
            ("net_salary", self.net_salary),
            ("tax_deducted", self.tax_deducted),
        ]
    }

    /// Whether nothing at all was extracted.
    pub fn is_all_zero(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_zero())
    }
}
