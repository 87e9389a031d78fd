//! Data models for salary records and pipeline configuration.

pub mod config;
pub mod record;

pub use config::{AdviceConfig, ExtractionConfig, PdfConfig, TaxdocConfig};
pub use record::{SalaryRecord, FIELD_COUNT};
