//! Document source adapter: classify an upload and produce raw text.
//!
//! Failure here is fatal to the single document-processing attempt;
//! the resolver never runs on a document that produced no text.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{OcrError, PdfError, Result, TaxdocError};
use crate::models::config::PdfConfig;
use crate::ocr::OcrEngine;
use crate::pdf::{PdfExtractor, PdfProcessor, PdfType};

/// Kind of uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
}

impl DocumentKind {
    /// Classify a file by its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "png" | "jpg" | "jpeg" | "tiff" | "bmp" => Ok(DocumentKind::Image),
            other => Err(TaxdocError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Produces raw document text from uploaded bytes.
pub struct DocumentSource<'a> {
    config: PdfConfig,
    ocr: Option<&'a dyn OcrEngine>,
}

impl<'a> DocumentSource<'a> {
    pub fn new(config: PdfConfig) -> Self {
        Self { config, ocr: None }
    }

    /// Attach an OCR engine for image inputs and scanned PDFs.
    pub fn with_ocr(mut self, ocr: &'a dyn OcrEngine) -> Self {
        self.ocr = Some(ocr);
        self
    }

    /// Extract the full text of a document.
    pub fn extract_text(&self, data: &[u8], kind: DocumentKind) -> Result<String> {
        let text = match kind {
            DocumentKind::Pdf => self.pdf_text(data)?,
            DocumentKind::Image => self.image_text(data)?,
        };

        if text.trim().is_empty() {
            return Err(PdfError::TextExtraction(
                "no text could be extracted from the document".to_string(),
            )
            .into());
        }

        Ok(text)
    }

    fn pdf_text(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;

        let pdf_type = extractor.analyze();
        debug!("PDF type: {:?}", pdf_type);

        match pdf_type {
            PdfType::Text => Ok(extractor.extract_text()?),
            PdfType::Hybrid if self.config.prefer_embedded_text => {
                let text = extractor.extract_text()?;
                if text.trim().len() >= self.config.min_text_length {
                    Ok(text)
                } else {
                    warn!("Hybrid PDF has too little embedded text, trying OCR");
                    self.ocr_pdf(&extractor).or(Ok(text))
                }
            }
            PdfType::Image | PdfType::Hybrid => self.ocr_pdf(&extractor),
            PdfType::Empty => Err(PdfError::TextExtraction(
                "PDF contains neither text nor images".to_string(),
            )
            .into()),
        }
    }

    /// OCR every embedded image of a scanned PDF, page by page,
    /// joining page texts with a newline.
    fn ocr_pdf(&self, extractor: &PdfExtractor) -> Result<String> {
        let ocr = self.ocr.ok_or_else(|| {
            OcrError::NoEngine("scanned PDF requires an OCR engine".to_string())
        })?;

        let mut page_count = extractor.page_count();
        if self.config.max_pages > 0 {
            page_count = page_count.min(self.config.max_pages as u32);
        }

        let mut page_texts = Vec::new();
        for page in 1..=page_count {
            let images = match extractor.extract_images(page) {
                Ok(images) => images,
                Err(e) => {
                    warn!("Failed to extract images from page {}: {}", page, e);
                    continue;
                }
            };

            for image in &images {
                match ocr.image_to_text(image) {
                    Ok(text) if !text.trim().is_empty() => page_texts.push(text),
                    Ok(_) => debug!("No text detected on page {}", page),
                    Err(e) => warn!("OCR failed on page {}: {}", page, e),
                }
            }
        }

        if page_texts.is_empty() {
            return Err(OcrError::Recognition(
                "no text detected in any PDF image".to_string(),
            )
            .into());
        }

        Ok(page_texts.join("\n"))
    }

    fn image_text(&self, data: &[u8]) -> Result<String> {
        let ocr = self.ocr.ok_or_else(|| {
            OcrError::NoEngine("image input requires an OCR engine".to_string())
        })?;

        let image = image::load_from_memory(data)?;
        Ok(ocr.image_to_text(&image)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    struct FixedOcr(&'static str);

    impl OcrEngine for FixedOcr {
        fn image_to_text(&self, _image: &DynamicImage) -> std::result::Result<String, OcrError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("form16.pdf")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("slip.JPG")).unwrap(),
            DocumentKind::Image
        );
        assert!(DocumentKind::from_path(Path::new("notes.txt")).is_err());
    }

    #[test]
    fn test_image_without_engine_fails() {
        let source = DocumentSource::new(PdfConfig::default());
        let err = source.extract_text(&[0u8; 4], DocumentKind::Image);
        assert!(matches!(err, Err(TaxdocError::Ocr(OcrError::NoEngine(_)))));
    }

    #[test]
    fn test_image_goes_through_ocr() {
        let ocr = FixedOcr("Basic Salary: 600000");
        let source = DocumentSource::new(PdfConfig::default()).with_ocr(&ocr);

        // 1x1 PNG.
        let mut png = Vec::new();
        DynamicImage::new_rgb8(1, 1)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let text = source.extract_text(&png, DocumentKind::Image).unwrap();
        assert_eq!(text, "Basic Salary: 600000");
    }

    #[test]
    fn test_corrupt_pdf_is_fatal() {
        let source = DocumentSource::new(PdfConfig::default());
        let err = source.extract_text(b"garbage", DocumentKind::Pdf);
        assert!(matches!(err, Err(TaxdocError::Pdf(_))));
    }

    #[test]
    fn test_blank_ocr_output_is_an_error() {
        let ocr = FixedOcr("   ");
        let source = DocumentSource::new(PdfConfig::default()).with_ocr(&ocr);

        let mut png = Vec::new();
        DynamicImage::new_rgb8(1, 1)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        assert!(source.extract_text(&png, DocumentKind::Image).is_err());
    }
}
