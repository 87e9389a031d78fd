//! Confidence scoring for resolved salary records.

use serde::{Deserialize, Serialize};

use crate::models::config::ExtractionConfig;
use crate::models::record::SalaryRecord;

/// Fraction of record fields with a non-zero value, in [0, 1].
///
/// Always recomputed from the record; callers must not cache it
/// separately from the record it describes.
pub fn extraction_confidence(record: &SalaryRecord) -> f32 {
    let fields = record.fields();
    if fields.is_empty() {
        return 0.0;
    }

    let non_zero = fields.iter().filter(|(_, v)| !v.is_zero()).count();
    non_zero as f32 / fields.len() as f32
}

/// Coarse confidence band used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Classify a score against the configured thresholds.
    pub fn from_score(score: f32, config: &ExtractionConfig) -> Self {
        if score < config.low_confidence {
            ConfidenceLevel::Low
        } else if score < config.high_confidence {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_all_zero_record_scores_zero() {
        assert_eq!(extraction_confidence(&SalaryRecord::default()), 0.0);
    }

    #[test]
    fn test_three_of_eleven_fields() {
        let record = SalaryRecord {
            basic_salary: Decimal::from(600_000),
            hra: Decimal::from(50_000),
            section_80c: Decimal::from(150_000),
            ..Default::default()
        };

        let score = extraction_confidence(&record);
        assert!((score - 3.0 / 11.0).abs() < 1e-6);
    }

    #[test]
    fn test_level_thresholds() {
        let config = ExtractionConfig::default();
        assert_eq!(ConfidenceLevel::from_score(0.2, &config), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.5, &config), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.8, &config), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(1.0, &config), ConfidenceLevel::High);
    }
}
