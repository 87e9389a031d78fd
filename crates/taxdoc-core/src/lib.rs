//! Core library for salary document processing and tax comparison.
//!
//! This crate provides:
//! - Document text sourcing (PDF text extraction, OCR for images)
//! - Keyword/regex salary field extraction with fallback estimation
//! - Extraction confidence scoring
//! - Indian income-tax calculation under the old and new regimes
//! - Advice prompt construction with an explicit response cache

pub mod advice;
pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod source;
pub mod tax;

pub use advice::{advice_prompt, AdviceCache, AdviceCacheState};
pub use error::{AdviceError, OcrError, PdfError, Result, TaxdocError};
pub use extract::{
    extract_field, extraction_confidence, ConfidenceLevel, ExtractionReport, SalaryField,
    SalaryResolver,
};
pub use models::config::TaxdocConfig;
pub use models::record::{SalaryRecord, FIELD_COUNT};
pub use ocr::OcrEngine;
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use source::{DocumentKind, DocumentSource};
pub use tax::{calculate_tax, compare, Regime, TaxComparison, TaxInput};
