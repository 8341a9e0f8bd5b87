//! Page element composition and document assembly.

use std::cmp::Ordering;

use crate::model::{Comment, DocumentItem, DocumentModel, ImageElement, PageElement, Paragraph};

use super::annotations::PendingComment;

/// One element of a composed page, with the comment bound to it.
#[derive(Debug, Clone)]
pub struct ComposedElement {
    /// The paragraph or image
    pub element: PageElement,
    /// Comment bound to a paragraph (never set for images)
    pub comment: Option<PendingComment>,
}

/// The Y-ordered content of one processed page.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Source page number (1-indexed)
    pub number: u32,
    /// Elements sorted top to bottom
    pub elements: Vec<ComposedElement>,
}

impl PageLayout {
    /// Merge a page's paragraphs and images into one top-to-bottom sequence.
    ///
    /// The sort is stable: elements at the same position keep column order,
    /// paragraphs before images.
    pub fn compose(
        number: u32,
        paragraphs: Vec<Paragraph>,
        bindings: Vec<(usize, PendingComment)>,
        images: Vec<ImageElement>,
    ) -> Self {
        let mut comments: Vec<Option<PendingComment>> = vec![None; paragraphs.len()];
        for (index, comment) in bindings {
            if let Some(slot) = comments.get_mut(index) {
                *slot = Some(comment);
            }
        }

        let mut elements: Vec<ComposedElement> = paragraphs
            .into_iter()
            .zip(comments)
            .map(|(p, comment)| ComposedElement {
                element: PageElement::Paragraph(p),
                comment,
            })
            .chain(images.into_iter().map(|img| ComposedElement {
                element: PageElement::Image(img),
                comment: None,
            }))
            .collect();

        elements.sort_by(|a, b| {
            a.element
                .y_position()
                .partial_cmp(&b.element.y_position())
                .unwrap_or(Ordering::Equal)
        });

        Self { number, elements }
    }

    /// Check if the page produced nothing.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Concatenate page layouts in order, with a page break between pages.
///
/// Comment ids are assigned sequentially in final document order.
pub fn assemble_document(pages: Vec<PageLayout>, skipped_pages: Vec<u32>) -> DocumentModel {
    let mut doc = DocumentModel::new();
    doc.skipped_pages = skipped_pages;

    let page_count = pages.len();
    for (i, page) in pages.into_iter().enumerate() {
        for composed in page.elements {
            let mut item = DocumentItem::from(composed.element);
            if let (DocumentItem::Paragraph(p), Some(pending)) = (&mut item, composed.comment) {
                let id = doc.comments.len() as u32;
                p.comment_id = Some(id);
                doc.comments.push(Comment {
                    id,
                    author: pending.author,
                    text: pending.text,
                    date: pending.date,
                    page: page.number,
                });
            }
            doc.elements.push(item);
        }

        if i + 1 < page_count {
            doc.elements.push(DocumentItem::PageBreak);
        }
    }

    doc
}
