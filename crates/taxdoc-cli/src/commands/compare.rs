//! Compare command - manual tax comparison between the two regimes.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use rust_decimal::Decimal;

use taxdoc_core::advice::format_inr;
use taxdoc_core::{compare, TaxComparison, TaxInput};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Basic salary
    #[arg(long, default_value = "0")]
    basic: Decimal,

    /// House rent allowance
    #[arg(long, default_value = "0")]
    hra: Decimal,

    /// Special allowance
    #[arg(long, default_value = "0")]
    special_allowance: Decimal,

    /// Bonus (always yearly)
    #[arg(long, default_value = "0")]
    bonus: Decimal,

    /// Section 80C investments
    #[arg(long = "80c", default_value = "0")]
    section_80c: Decimal,

    /// Section 80D (health insurance)
    #[arg(long = "80d", default_value = "0")]
    section_80d: Decimal,

    /// Home loan interest
    #[arg(long, default_value = "0")]
    home_loan_interest: Decimal,

    /// Annual rent paid
    #[arg(long, default_value = "0")]
    rent_paid: Decimal,

    /// Treat income figures as monthly and annualize them
    #[arg(long)]
    monthly: bool,

    /// Read the input from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["basic", "hra", "special_allowance", "bonus"])]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: CompareFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum CompareFormat {
    Json,
    Csv,
    Text,
}

pub async fn run(args: CompareArgs, _config_path: Option<&str>) -> anyhow::Result<()> {
    let input = build_input(&args)?;
    let comparison = compare(&input);

    let output = match args.format {
        CompareFormat::Json => serde_json::to_string_pretty(&comparison)?,
        CompareFormat::Csv => format_comparison_csv(&comparison)?,
        CompareFormat::Text => format_comparison_text(&comparison),
    };
    println!("{}", output);

    Ok(())
}

pub fn build_input(args: &CompareArgs) -> anyhow::Result<TaxInput> {
    if let Some(path) = &args.input {
        let content = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&content)?);
    }

    let twelve = Decimal::from(12);
    let annualize = |v: Decimal| if args.monthly { v * twelve } else { v };

    Ok(TaxInput {
        // Bonus and deductions are yearly figures either way.
        basic_salary: annualize(args.basic),
        hra: annualize(args.hra),
        special_allowance: annualize(args.special_allowance),
        bonus: args.bonus,
        section_80c: args.section_80c,
        section_80d: args.section_80d,
        home_loan_interest: args.home_loan_interest,
        rent_paid: args.rent_paid,
    })
}

pub fn format_comparison_text(comparison: &TaxComparison) -> String {
    let mut output = String::new();

    output.push_str("Tax Comparison\n");
    output.push_str(&format!(
        "  Total Income:     ₹{}\n",
        format_inr(comparison.input.total_income())
    ));
    output.push_str(&format!(
        "  Total Deductions: ₹{}\n\n",
        format_inr(comparison.input.total_deductions())
    ));

    for breakdown in [&comparison.old, &comparison.new] {
        output.push_str(&format!("{}\n", breakdown.regime.label()));
        output.push_str(&format!(
            "  Standard Deduction: ₹{}\n",
            format_inr(breakdown.standard_deduction)
        ));
        output.push_str(&format!(
            "  Taxable Income:     ₹{}\n",
            format_inr(breakdown.taxable_income)
        ));
        output.push_str(&format!(
            "  Total Tax:          ₹{}\n\n",
            format_inr(breakdown.tax)
        ));
    }

    output.push_str(&format!(
        "Recommended: {} (saves ₹{})\n",
        style(comparison.recommended.label()).green().bold(),
        format_inr(comparison.savings)
    ));

    output
}

fn format_comparison_csv(comparison: &TaxComparison) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "regime",
        "total_income",
        "total_deductions",
        "standard_deduction",
        "taxable_income",
        "tax",
        "recommended",
    ])?;

    for breakdown in [&comparison.old, &comparison.new] {
        wtr.write_record([
            breakdown.regime.label(),
            &breakdown.total_income.to_string(),
            &breakdown.total_deductions.to_string(),
            &breakdown.standard_deduction.to_string(),
            &breakdown.taxable_income.to_string(),
            &breakdown.tax.to_string(),
            &(breakdown.regime == comparison.recommended).to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn base_args() -> CompareArgs {
        CompareArgs {
            basic: Decimal::ZERO,
            hra: Decimal::ZERO,
            special_allowance: Decimal::ZERO,
            bonus: Decimal::ZERO,
            section_80c: Decimal::ZERO,
            section_80d: Decimal::ZERO,
            home_loan_interest: Decimal::ZERO,
            rent_paid: Decimal::ZERO,
            monthly: false,
            input: None,
            format: CompareFormat::Text,
        }
    }

    #[test]
    fn test_monthly_annualizes_income_only() {
        let args = CompareArgs {
            basic: Decimal::from(50_000),
            bonus: Decimal::from(100_000),
            section_80c: Decimal::from(150_000),
            monthly: true,
            ..base_args()
        };

        let input = build_input(&args).unwrap();
        assert_eq!(input.basic_salary, Decimal::from(600_000));
        assert_eq!(input.bonus, Decimal::from(100_000));
        assert_eq!(input.section_80c, Decimal::from(150_000));
    }

    #[test]
    fn test_text_output_names_recommended_regime() {
        let input = TaxInput {
            basic_salary: Decimal::from_str("1000000").unwrap(),
            ..Default::default()
        };
        let text = format_comparison_text(&compare(&input));
        assert!(text.contains("Old Regime"));
        assert!(text.contains("New Regime"));
        assert!(text.contains("Recommended:"));
    }
}
