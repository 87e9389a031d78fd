//! Error types for the taxdoc-core library.

use thiserror::Error;

/// Main error type for the taxdoc library.
#[derive(Error, Debug)]
pub enum TaxdocError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Advice generation error.
    #[error("advice error: {0}")]
    Advice(#[from] AdviceError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported input file format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// No OCR engine is available for an image input.
    #[error("no OCR engine available: {0}")]
    NoEngine(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to advice generation.
#[derive(Error, Debug)]
pub enum AdviceError {
    /// A call was attempted before the cooldown elapsed.
    #[error("rate limited: retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The API key environment variable is not set.
    #[error("advice API key not configured (set {0})")]
    MissingApiKey(String),

    /// The advice service returned an error.
    #[error("advice request failed: {0}")]
    Api(String),
}

/// Result type for the taxdoc library.
pub type Result<T> = std::result::Result<T, TaxdocError>;
