//! Document field resolver: extraction plus fallback estimation.

use std::time::Instant;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::record::SalaryRecord;

use super::confidence::{extraction_confidence, ConfidenceLevel};
use super::extractor::extract_field;
use super::fields::SalaryField;
use super::patterns::ANY_AMOUNT;

/// Result of resolving one document's text.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// Resolved salary record.
    pub record: SalaryRecord,

    /// Raw document text the record was resolved from.
    pub raw_text: String,

    /// Confidence score (fraction of non-zero fields).
    pub confidence: f32,

    /// Confidence band under the configured thresholds.
    pub confidence_level: ConfidenceLevel,

    /// Fields filled by a fallback rule rather than a text match.
    pub estimated_fields: Vec<&'static str>,

    /// Extraction warnings.
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Resolves raw document text into a [`SalaryRecord`].
///
/// Runs the keyword extractor once per known field, then applies the
/// fallback estimation rules in a fixed order. Resolution is
/// deterministic: the same text always yields the same record.
pub struct SalaryResolver {
    config: ExtractionConfig,
}

impl SalaryResolver {
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve text into a salary record.
    pub fn resolve(&self, text: &str) -> SalaryRecord {
        let mut record = SalaryRecord::default();

        for field in SalaryField::ALL {
            let value = extract_field(text, field.keywords(), Decimal::ZERO);
            field.set(&mut record, value);
        }

        if self.config.apply_fallbacks {
            apply_fallbacks(&mut record);
        }

        record
    }

    /// Resolve text and wrap the record in a scored report.
    pub fn resolve_report(&self, text: &str) -> ExtractionReport {
        let start = Instant::now();

        info!("Resolving salary fields from {} characters of text", text.len());

        let mut record = SalaryRecord::default();
        for field in SalaryField::ALL {
            let value = extract_field(text, field.keywords(), Decimal::ZERO);
            field.set(&mut record, value);
        }

        let estimated_fields = if self.config.apply_fallbacks {
            apply_fallbacks(&mut record)
        } else {
            Vec::new()
        };

        let confidence = extraction_confidence(&record);
        let confidence_level = ConfidenceLevel::from_score(confidence, &self.config);
        let warnings = collect_warnings(&record, text);

        debug!(
            "Resolved record with confidence {:.2} ({:?}), {} estimated field(s), {} warning(s)",
            confidence,
            confidence_level,
            estimated_fields.len(),
            warnings.len()
        );

        ExtractionReport {
            record,
            raw_text: text.to_string(),
            confidence,
            confidence_level,
            estimated_fields,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

fn collect_warnings(record: &SalaryRecord, text: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    if record.basic_salary.is_zero() {
        warnings.push("Could not extract basic salary".to_string());
    }
    if record.gross_salary.is_zero() {
        warnings.push("Could not extract gross salary".to_string());
    }
    if record.is_all_zero() && ANY_AMOUNT.is_match(text) {
        warnings.push(
            "Document contains currency amounts but none matched a known label".to_string(),
        );
    }

    warnings
}

impl Default for SalaryResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill gaps from related fields. The rule order is fixed and each
/// rule reads the record as left by the previous one; reordering
/// changes which values get inferred.
fn apply_fallbacks(record: &mut SalaryRecord) -> Vec<&'static str> {
    let mut estimated = Vec::new();

    // Basic salary is typically 40-60% of gross.
    if record.gross_salary > Decimal::ZERO && record.basic_salary.is_zero() {
        record.basic_salary = record.gross_salary * Decimal::new(5, 1);
        estimated.push("basic_salary");
    }

    // HRA is typically 40-50% of basic.
    if record.hra.is_zero() && record.basic_salary > Decimal::ZERO {
        record.hra = record.basic_salary * Decimal::new(4, 1);
        estimated.push("hra");
    }

    // Special allowance as the remainder after basic and HRA.
    if record.special_allowance.is_zero()
        && record.gross_salary > Decimal::ZERO
        && record.basic_salary > Decimal::ZERO
        && record.hra > Decimal::ZERO
    {
        let remainder = record.gross_salary - record.basic_salary - record.hra;
        record.special_allowance = remainder.max(Decimal::ZERO);
        estimated.push("special_allowance");
    }

    estimated
}
