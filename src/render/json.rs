//! JSON rendering for reconstructed documents.

use crate::error::{Error, Result};
use crate::model::DocumentModel;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON. Image payloads are base64 strings.
pub fn to_json(doc: &DocumentModel, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentItem, HorizontalBias, ImageElement, Paragraph};

    fn sample_doc() -> DocumentModel {
        let mut doc = DocumentModel::new();
        doc.elements
            .push(DocumentItem::Paragraph(Paragraph::new("Hello", 12.0)));
        doc.elements.push(DocumentItem::PageBreak);
        doc.elements.push(DocumentItem::Image(ImageElement {
            data: vec![1, 2, 3],
            pixel_width: 1,
            pixel_height: 1,
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 40.0,
            y_normalized: 0.5,
            horizontal_bias: HorizontalBias::Left,
        }));
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample_doc(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"paragraph\""));
        assert!(json.contains("\"type\": \"page_break\""));
        assert!(json.contains("\"data\": \"AQID\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact_round_trip() {
        let doc = sample_doc();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert!(!json.contains("skipped_pages"));

        let back: DocumentModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
