//! Known salary document fields and their keyword synonyms.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::record::SalaryRecord;

/// A semantic field that can appear on a salary slip or Form 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryField {
    BasicSalary,
    Hra,
    SpecialAllowance,
    Bonus,
    Section80c,
    Section80d,
    HomeLoanInterest,
    RentPaid,
    GrossSalary,
    NetSalary,
    TaxDeducted,
}

impl SalaryField {
    /// All known fields in canonical order.
    pub const ALL: [SalaryField; 11] = [
        SalaryField::BasicSalary,
        SalaryField::Hra,
        SalaryField::SpecialAllowance,
        SalaryField::Bonus,
        SalaryField::Section80c,
        SalaryField::Section80d,
        SalaryField::HomeLoanInterest,
        SalaryField::RentPaid,
        SalaryField::GrossSalary,
        SalaryField::NetSalary,
        SalaryField::TaxDeducted,
    ];

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            SalaryField::BasicSalary => "basic_salary",
            SalaryField::Hra => "hra",
            SalaryField::SpecialAllowance => "special_allowance",
            SalaryField::Bonus => "bonus",
            SalaryField::Section80c => "section_80c",
            SalaryField::Section80d => "section_80d",
            SalaryField::HomeLoanInterest => "home_loan_interest",
            SalaryField::RentPaid => "rent_paid",
            SalaryField::GrossSalary => "gross_salary",
            SalaryField::NetSalary => "net_salary",
            SalaryField::TaxDeducted => "tax_deducted",
        }
    }

    /// Keyword synonyms for this field. Order matters: the extractor
    /// tries each keyword in sequence and the first match wins, so the
    /// more specific label must come before the generic one
    /// ("Rent Paid" before "Rent").
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SalaryField::BasicSalary => &["Basic Salary", "Basic Pay", "Basic"],
            SalaryField::Hra => &["HRA", "House Rent Allowance"],
            SalaryField::SpecialAllowance => &["Special Allowance", "Special"],
            SalaryField::Bonus => &["Bonus", "Performance Bonus", "Annual Bonus"],
            SalaryField::Section80c => &["Section 80C", "80C"],
            SalaryField::Section80d => &["Section 80D", "80D", "Health Insurance"],
            SalaryField::HomeLoanInterest => {
                &["Home Loan Interest", "Interest on Housing Loan"]
            }
            SalaryField::RentPaid => &["Rent Paid", "Rent"],
            SalaryField::GrossSalary => &["Gross Salary", "Gross"],
            SalaryField::NetSalary => &["Net Salary", "Take Home", "Net Pay"],
            SalaryField::TaxDeducted => &["TDS", "Tax Deducted", "Income Tax"],
        }
    }

    /// Read this field's value from a record.
    pub fn get(self, record: &SalaryRecord) -> Decimal {
        match self {
            SalaryField::BasicSalary => record.basic_salary,
            SalaryField::Hra => record.hra,
            SalaryField::SpecialAllowance => record.special_allowance,
            SalaryField::Bonus => record.bonus,
            SalaryField::Section80c => record.section_80c,
            SalaryField::Section80d => record.section_80d,
            SalaryField::HomeLoanInterest => record.home_loan_interest,
            SalaryField::RentPaid => record.rent_paid,
            SalaryField::GrossSalary => record.gross_salary,
            SalaryField::NetSalary => record.net_salary,
            SalaryField::TaxDeducted => record.tax_deducted,
        }
    }

    /// Write this field's value into a record.
    pub fn set(self, record: &mut SalaryRecord, value: Decimal) {
        match self {
            SalaryField::BasicSalary => record.basic_salary = value,
            SalaryField::Hra => record.hra = value,
            SalaryField::SpecialAllowance => record.special_allowance = value,
            SalaryField::Bonus => record.bonus = value,
            SalaryField::Section80c => record.section_80c = value,
            SalaryField::Section80d => record.section_80d = value,
            SalaryField::HomeLoanInterest => record.home_loan_interest = value,
            SalaryField::RentPaid => record.rent_paid = value,
            SalaryField::GrossSalary => record.gross_salary = value,
            SalaryField::NetSalary => record.net_salary = value,
            SalaryField::TaxDeducted => record.tax_deducted = value,
        }
    }
}
