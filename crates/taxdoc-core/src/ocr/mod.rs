//! OCR adapter for image-based documents.
//!
//! The pipeline treats OCR as a collaborator: anything that can turn
//! an image into best-effort plain text can drive the field
//! extractor. The native implementation wraps `pure-onnx-ocr`.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;

use crate::error::OcrError;

/// Turns an image into best-effort plain text.
pub trait OcrEngine {
    /// Recognize all text in the image, in reading order.
    fn image_to_text(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// A recognized text region.
#[derive(Debug, Clone)]
pub struct TextBox {
    /// Quadrilateral corners (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Axis-aligned bounding rectangle (min_x, min_y, max_x, max_y).
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Sort boxes top-to-bottom, left-to-right, and join their text with
/// newlines. Rows are grouped within a 20 pixel band.
pub fn boxes_to_text(mut boxes: Vec<TextBox>) -> String {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / 20.0) as i32;
        let row_b = (by / 20.0) as i32;

        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
        }
    });

    boxes
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_box(x: f32, y: f32, text: &str) -> TextBox {
        TextBox {
            bbox: [x, y, x + 50.0, y, x + 50.0, y + 10.0, x, y + 10.0],
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_boxes_sorted_in_reading_order() {
        let boxes = vec![
            text_box(200.0, 5.0, "50000"),
            text_box(0.0, 100.0, "HRA"),
            text_box(0.0, 2.0, "Basic Salary"),
        ];

        assert_eq!(boxes_to_text(boxes), "Basic Salary\n50000\nHRA");
    }

    #[test]
    fn test_rect_from_quadrilateral() {
        let b = TextBox {
            bbox: [10.0, 20.0, 30.0, 18.0, 32.0, 40.0, 8.0, 42.0],
            text: String::new(),
            confidence: 1.0,
        };
        assert_eq!(b.rect(), (8.0, 18.0, 32.0, 42.0));
    }
}
