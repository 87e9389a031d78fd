//! Indian income-tax calculation under the old and new regimes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::record::SalaryRecord;

/// One of the two named tax rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Old,
    New,
}

impl Regime {
    pub fn label(self) -> &'static str {
        match self {
            Regime::Old => "Old Regime",
            Regime::New => "New Regime",
        }
    }
}

/// Progressive slabs as (upper bound, marginal rate percent); `None`
/// is the open-ended top slab.
const OLD_SLABS: &[(Option<i64>, i64)] = &[
    (Some(250_000), 0),
    (Some(500_000), 5),
    (Some(1_000_000), 20),
    (None, 30),
];

const NEW_SLABS: &[(Option<i64>, i64)] = &[
    (Some(300_000), 0),
    (Some(600_000), 5),
    (Some(900_000), 10),
    (Some(1_200_000), 15),
    (Some(1_500_000), 20),
    (None, 30),
];

/// Flat cess multiplier applied to the computed tax (4%).
fn cess_multiplier() -> Decimal {
    Decimal::new(104, 2)
}

fn standard_deduction(regime: Regime) -> Decimal {
    match regime {
        Regime::Old => Decimal::from(50_000),
        Regime::New => Decimal::from(75_000),
    }
}

/// Income and deduction inputs to the tax calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxInput {
    pub basic_salary: Decimal,
    pub hra: Decimal,
    pub special_allowance: Decimal,
    pub bonus: Decimal,
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub home_loan_interest: Decimal,
    pub rent_paid: Decimal,
}

impl TaxInput {
    pub fn total_income(&self) -> Decimal {
        self.basic_salary + self.hra + self.special_allowance + self.bonus
    }

    pub fn total_deductions(&self) -> Decimal {
        self.section_80c + self.section_80d + self.home_loan_interest + self.rent_paid
    }
}

impl From<&SalaryRecord> for TaxInput {
    fn from(record: &SalaryRecord) -> Self {
        Self {
            basic_salary: record.basic_salary,
            hra: record.hra,
            special_allowance: record.special_allowance,
            bonus: record.bonus,
            section_80c: record.section_80c,
            section_80d: record.section_80d,
            home_loan_interest: record.home_loan_interest,
            rent_paid: record.rent_paid,
        }
    }
}

/// Tax computed under one regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub regime: Regime,
    pub total_income: Decimal,
    pub total_deductions: Decimal,
    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    /// Total tax including cess.
    pub tax: Decimal,
}

/// Side-by-side comparison of both regimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxComparison {
    pub input: TaxInput,
    pub old: TaxBreakdown,
    pub new: TaxBreakdown,
    pub recommended: Regime,
    pub savings: Decimal,
}

/// Calculate tax for one regime. The old regime allows itemized
/// deductions; the new regime ignores them entirely.
pub fn calculate_tax(input: &TaxInput, regime: Regime) -> TaxBreakdown {
    let total_income = input.total_income();
    let total_deductions = input.total_deductions();
    let std_deduction = standard_deduction(regime);

    let taxable_income = match regime {
        Regime::Old => (total_income - total_deductions - std_deduction).max(Decimal::ZERO),
        Regime::New => (total_income - std_deduction).max(Decimal::ZERO),
    };

    let slabs = match regime {
        Regime::Old => OLD_SLABS,
        Regime::New => NEW_SLABS,
    };

    let tax = slab_tax(taxable_income, slabs) * cess_multiplier();

    debug!(
        "{}: taxable {} -> tax {}",
        regime.label(),
        taxable_income,
        tax
    );

    TaxBreakdown {
        regime,
        total_income,
        total_deductions,
        standard_deduction: std_deduction,
        taxable_income,
        tax,
    }
}

/// Compare both regimes and recommend the cheaper one.
pub fn compare(input: &TaxInput) -> TaxComparison {
    let old = calculate_tax(input, Regime::Old);
    let new = calculate_tax(input, Regime::New);

    let recommended = if new.tax <= old.tax {
        Regime::New
    } else {
        Regime::Old
    };
    let savings = (old.tax - new.tax).abs();

    TaxComparison {
        input: input.clone(),
        old,
        new,
        recommended,
        savings,
    }
}

fn slab_tax(taxable: Decimal, slabs: &[(Option<i64>, i64)]) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for &(upper, rate_pct) in slabs {
        let upper = upper.map(Decimal::from).unwrap_or(taxable);
        let span = taxable.min(upper) - lower;
        if span <= Decimal::ZERO {
            break;
        }
        tax += span * Decimal::new(rate_pct, 2);
        lower = upper;
    }

    tax
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_old_regime_below_threshold_pays_nothing() {
        let input = TaxInput {
            basic_salary: dec("250000"),
            ..Default::default()
        };
        let breakdown = calculate_tax(&input, Regime::Old);
        assert_eq!(breakdown.tax, Decimal::ZERO);
    }

    #[test]
    fn test_old_regime_mid_slab() {
        // Income 800000, 80C 150000, std 50000 -> taxable 600000.
        // Tax = 12500 + 20% * 100000 = 32500; cess -> 33800.
        let input = TaxInput {
            basic_salary: dec("800000"),
            section_80c: dec("150000"),
            ..Default::default()
        };
        let breakdown = calculate_tax(&input, Regime::Old);
        assert_eq!(breakdown.taxable_income, dec("600000"));
        assert_eq!(breakdown.tax, dec("33800.00"));
    }

    #[test]
    fn test_new_regime_ignores_deductions() {
        let with_deductions = TaxInput {
            basic_salary: dec("1000000"),
            section_80c: dec("150000"),
            ..Default::default()
        };
        let without = TaxInput {
            basic_salary: dec("1000000"),
            ..Default::default()
        };
        assert_eq!(
            calculate_tax(&with_deductions, Regime::New).tax,
            calculate_tax(&without, Regime::New).tax
        );
    }

    #[test]
    fn test_new_regime_slab_math() {
        // Income 1075000, std 75000 -> taxable 1000000.
        // Tax = 15000 + 30000 + 15% * 100000 = 60000; cess -> 62400.
        let input = TaxInput {
            basic_salary: dec("1075000"),
            ..Default::default()
        };
        let breakdown = calculate_tax(&input, Regime::New);
        assert_eq!(breakdown.taxable_income, dec("1000000"));
        assert_eq!(breakdown.tax, dec("62400.0000"));
    }

    #[test]
    fn test_top_slab_old_regime() {
        // Taxable 1500000: 12500 + 100000 + 30% * 500000 = 262500;
        // cess -> 273000.
        let input = TaxInput {
            basic_salary: dec("1550000"),
            ..Default::default()
        };
        let breakdown = calculate_tax(&input, Regime::Old);
        assert_eq!(breakdown.taxable_income, dec("1500000"));
        assert_eq!(breakdown.tax, dec("273000.00"));
    }

    #[test]
    fn test_compare_recommends_cheaper_regime() {
        // Heavy deductions favor the old regime.
        let input = TaxInput {
            basic_salary: dec("1200000"),
            section_80c: dec("150000"),
            home_loan_interest: dec("200000"),
            rent_paid: dec("240000"),
            ..Default::default()
        };
        let comparison = compare(&input);
        assert_eq!(comparison.recommended, Regime::Old);
        assert_eq!(comparison.savings, (comparison.new.tax - comparison.old.tax).abs());
    }

    #[test]
    fn test_deductions_cannot_push_taxable_negative() {
        let input = TaxInput {
            basic_salary: dec("100000"),
            section_80c: dec("150000"),
            ..Default::default()
        };
        let breakdown = calculate_tax(&input, Regime::Old);
        assert_eq!(breakdown.taxable_income, Decimal::ZERO);
        assert_eq!(breakdown.tax, Decimal::ZERO);
    }

    #[test]
    fn test_input_from_record() {
        let record = SalaryRecord {
            basic_salary: dec("600000"),
            hra: dec("200000"),
            gross_salary: dec("900000"),
            ..Default::default()
        };
        let input = TaxInput::from(&record);
        // gross_salary is not an income component.
        assert_eq!(input.total_income(), dec("800000"));
    }
}
