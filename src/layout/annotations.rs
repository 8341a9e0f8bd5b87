//! Binding of sticky-note annotations to paragraphs.

use chrono::{DateTime, Utc};

use crate::model::{parse_pdf_date, Annotation, Paragraph};

/// Maximum normalized vertical distance between an annotation and its paragraph.
const MATCH_TOLERANCE: f32 = 0.05;

/// An annotation bound to a paragraph, awaiting its document-wide comment id.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingComment {
    /// Annotation author, if recorded
    pub author: Option<String>,
    /// Trimmed annotation contents
    pub text: String,
    /// Parsed modification date
    pub date: Option<DateTime<Utc>>,
}

impl From<&Annotation> for PendingComment {
    fn from(annotation: &Annotation) -> Self {
        Self {
            author: annotation.author.clone(),
            text: annotation.contents.trim().to_string(),
            date: annotation.modified.as_deref().and_then(parse_pdf_date),
        }
    }
}

/// Bind annotations to paragraphs, first fit in paragraph order.
///
/// Returns `(paragraph index, comment)` pairs. Each annotation is used at most
/// once and each paragraph receives at most one; the rest are dropped.
pub fn match_annotations(
    paragraphs: &[Paragraph],
    annotations: &[Annotation],
    page_height: f32,
) -> Vec<(usize, PendingComment)> {
    let candidates: Vec<(f32, &Annotation)> = annotations
        .iter()
        .filter(|a| a.is_comment())
        .map(|a| (a.y_normalized(page_height), a))
        .collect();
    let mut consumed = vec![false; candidates.len()];
    let mut bindings = Vec::new();

    for (index, paragraph) in paragraphs.iter().enumerate() {
        let hit = candidates.iter().enumerate().find(|(i, (y, _))| {
            !consumed[*i] && (y - paragraph.y_normalized).abs() < MATCH_TOLERANCE
        });
        if let Some((i, (_, annotation))) = hit {
            consumed[i] = true;
            bindings.push((index, PendingComment::from(*annotation)));
        }
    }

    for ((y, annotation), used) in candidates.iter().zip(&consumed) {
        if !used {
            log::debug!(
                "Annotation at y={:.3} has no paragraph nearby: {:?}",
                y,
                annotation.contents
            );
        }
    }

    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_HEIGHT: f32 = 1000.0;

    /// An annotation whose top edge sits at normalized position `y`.
    fn note_at(y: f32, text: &str) -> Annotation {
        let top = (1.0 - y) * PAGE_HEIGHT;
        Annotation::note(text, [500.0, top - 20.0, 520.0, top])
    }

    fn paragraph_at(y: f32) -> Paragraph {
        Paragraph::new("text", 12.0).with_y(y)
    }

    #[test]
    fn test_binds_nearest_in_tolerance() {
        let paragraphs = vec![paragraph_at(0.40), paragraph_at(0.60)];
        let annotations = vec![note_at(0.42, "Check this")];

        let bindings = match_annotations(&paragraphs, &annotations, PAGE_HEIGHT);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].0, 0);
        assert_eq!(bindings[0].1.text, "Check this");
    }

    #[test]
    fn test_annotation_consumed_once() {
        let paragraphs = vec![paragraph_at(0.40), paragraph_at(0.41)];
        let annotations = vec![note_at(0.42, "only one")];

        let bindings = match_annotations(&paragraphs, &annotations, PAGE_HEIGHT);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].0, 0);
    }

    #[test]
    fn test_one_annotation_per_paragraph() {
        let paragraphs = vec![paragraph_at(0.40)];
        let annotations = vec![note_at(0.41, "first"), note_at(0.42, "second")];

        let bindings = match_annotations(&paragraphs, &annotations, PAGE_HEIGHT);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].1.text, "first");
    }

    #[test]
    fn test_out_of_tolerance_and_non_comments_dropped() {
        let paragraphs = vec![paragraph_at(0.40)];
        let mut link = note_at(0.40, "http://example.com");
        link.subtype = "Link".to_string();
        let annotations = vec![note_at(0.50, "too far"), link, note_at(0.40, "  ")];

        assert!(match_annotations(&paragraphs, &annotations, PAGE_HEIGHT).is_empty());
    }

    #[test]
    fn test_pending_comment_fields() {
        let mut annotation = note_at(0.4, " Needs a source ").with_author("Reviewer");
        annotation.modified = Some("D:20240301120000Z".to_string());

        let comment = PendingComment::from(&annotation);
        assert_eq!(comment.text, "Needs a source");
        assert_eq!(comment.author.as_deref(), Some("Reviewer"));
        assert!(comment.date.is_some());
    }
}
