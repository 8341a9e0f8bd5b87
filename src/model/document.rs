//! Document-level output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ImageElement, Paragraph};

/// A paragraph or image on one page, the unit the compositor orders.
#[derive(Debug, Clone, PartialEq)]
pub enum PageElement {
    /// A classified paragraph
    Paragraph(Paragraph),
    /// A placed image
    Image(ImageElement),
}

impl PageElement {
    /// Normalized vertical position used for ordering (0 = top of page).
    pub fn y_position(&self) -> f32 {
        match self {
            PageElement::Paragraph(p) => p.y_normalized,
            PageElement::Image(img) => img.y_normalized,
        }
    }
}

/// An entry of the final document sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentItem {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// A repositioned raster image
    Image(ImageElement),

    /// Break between two source pages
    PageBreak,
}

impl DocumentItem {
    /// Check if this item is a page break marker.
    pub fn is_page_break(&self) -> bool {
        matches!(self, DocumentItem::PageBreak)
    }
}

impl From<PageElement> for DocumentItem {
    fn from(element: PageElement) -> Self {
        match element {
            PageElement::Paragraph(p) => DocumentItem::Paragraph(p),
            PageElement::Image(img) => DocumentItem::Image(img),
        }
    }
}

/// A comment bound to a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Sequential id, referenced by [`Paragraph::comment_id`]
    pub id: u32,

    /// Comment author
    pub author: Option<String>,

    /// Comment text
    pub text: String,

    /// Last modification date
    pub date: Option<DateTime<Utc>>,

    /// Source page number
    pub page: u32,
}

/// The reconstructed document: the engine's sole output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Ordered paragraphs and images, with page breaks between pages
    pub elements: Vec<DocumentItem>,

    /// Comments bound to paragraphs
    pub comments: Vec<Comment>,

    /// Pages that could not be read and were skipped (lenient mode)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_pages: Vec<u32>,
}

impl DocumentModel {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of page break markers.
    pub fn page_break_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_page_break()).count()
    }

    /// Iterate over all paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.elements.iter().filter_map(|e| match e {
            DocumentItem::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Iterate over all images in document order.
    pub fn images(&self) -> impl Iterator<Item = &ImageElement> {
        self.elements.iter().filter_map(|e| match e {
            DocumentItem::Image(img) => Some(img),
            _ => None,
        })
    }

    /// Get a comment by id.
    pub fn comment(&self, id: u32) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Plain text of all paragraphs, separated by blank lines.
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
pub fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    // At minimum we need YYYY
    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_pdf_date() {
        let date = parse_pdf_date("D:20240115103045").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
        assert_eq!(date.hour(), 10);
    }

    #[test]
    fn test_parse_pdf_date_minimal() {
        let date = parse_pdf_date("D:2024").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
        assert!(parse_pdf_date("D:20").is_none());
        assert!(parse_pdf_date("D:abcd").is_none());
    }

    #[test]
    fn test_document_counts() {
        let mut doc = DocumentModel::new();
        doc.elements
            .push(DocumentItem::Paragraph(Paragraph::new("One", 12.0)));
        doc.elements.push(DocumentItem::PageBreak);
        doc.elements
            .push(DocumentItem::Paragraph(Paragraph::new("Two", 12.0)));

        assert_eq!(doc.page_break_count(), 1);
        assert_eq!(doc.paragraphs().count(), 2);
        assert_eq!(doc.images().count(), 0);
        assert_eq!(doc.plain_text(), "One\n\nTwo");
    }

    #[test]
    fn test_document_item_tagging() {
        let json = serde_json::to_string(&DocumentItem::PageBreak).unwrap();
        assert_eq!(json, r#"{"type":"page_break"}"#);

        let para = DocumentItem::Paragraph(Paragraph::new("x", 12.0));
        let json = serde_json::to_string(&para).unwrap();
        assert!(json.starts_with(r#"{"type":"paragraph""#));
    }
}
