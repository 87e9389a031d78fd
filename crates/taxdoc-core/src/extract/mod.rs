//! Salary field extraction pipeline.
//!
//! Flow: raw document text goes through the per-field keyword
//! extractor, the resolver fills gaps with fallback rules, and the
//! confidence scorer summarizes how much of the record came from the
//! document itself.

pub mod confidence;
pub mod extractor;
pub mod fields;
pub mod patterns;
mod resolver;

pub use confidence::{extraction_confidence, ConfidenceLevel};
pub use extractor::extract_field;
pub use fields::SalaryField;
pub use resolver::{ExtractionReport, SalaryResolver};
