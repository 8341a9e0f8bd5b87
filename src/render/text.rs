//! Plain-text preview of a reconstructed document.

use crate::error::Result;
use crate::model::{DocumentItem, DocumentModel, ListKind, Paragraph};

/// Line written for a page break.
const PAGE_BREAK_MARK: &str = "\u{000C}";

/// Render a document as a readable plain-text preview.
///
/// Headings are prefixed with `#` marks, list items with `-` or their number,
/// images appear as `[image WxH]` and page breaks as a form-feed line.
pub fn to_text(doc: &DocumentModel) -> Result<String> {
    let mut blocks: Vec<String> = Vec::new();
    let mut list_number = 0usize;

    for item in &doc.elements {
        match item {
            DocumentItem::Paragraph(p) => {
                if p.list_kind == ListKind::Numbered {
                    list_number += 1;
                } else {
                    list_number = 0;
                }
                let mut block = render_paragraph(p, list_number);
                if let Some(comment) = p.comment_id.and_then(|id| doc.comment(id)) {
                    let author = comment.author.as_deref().unwrap_or("anonymous");
                    block.push_str(&format!("\n  [comment {} by {}: {}]", comment.id, author, comment.text));
                }
                blocks.push(block);
            }
            DocumentItem::Image(img) => {
                list_number = 0;
                blocks.push(format!("[image {}x{}]", img.pixel_width, img.pixel_height));
            }
            DocumentItem::PageBreak => {
                list_number = 0;
                blocks.push(PAGE_BREAK_MARK.to_string());
            }
        }
    }

    Ok(blocks.join("\n\n"))
}

fn render_paragraph(p: &Paragraph, list_number: usize) -> String {
    if let Some(level) = p.heading_level {
        return format!("{} {}", "#".repeat(level as usize), p.text);
    }
    match p.list_kind {
        ListKind::Bullet => format!("- {}", p.text),
        ListKind::Numbered => format!("{}. {}", list_number, p.text),
        ListKind::None => p.text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Comment;

    fn para(text: &str) -> Paragraph {
        Paragraph::new(text, 12.0)
    }

    #[test]
    fn test_to_text() {
        let mut heading = para("Title");
        heading.heading_level = Some(2);
        let mut first = para("First");
        first.list_kind = ListKind::Numbered;
        let mut second = para("Second");
        second.list_kind = ListKind::Numbered;
        let mut bullet = para("Point");
        bullet.list_kind = ListKind::Bullet;

        let mut doc = DocumentModel::new();
        for p in [heading, first, second, bullet] {
            doc.elements.push(DocumentItem::Paragraph(p));
        }
        doc.elements.push(DocumentItem::PageBreak);
        doc.elements
            .push(DocumentItem::Paragraph(para("Hello, world!")));

        let result = to_text(&doc).unwrap();
        assert_eq!(
            result,
            "## Title\n\n1. First\n\n2. Second\n\n- Point\n\n\u{000C}\n\nHello, world!"
        );
    }

    #[test]
    fn test_comment_shown_under_paragraph() {
        let mut p = para("Claim");
        p.comment_id = Some(0);
        let mut doc = DocumentModel::new();
        doc.elements.push(DocumentItem::Paragraph(p));
        doc.comments.push(Comment {
            id: 0,
            author: Some("Ann".to_string()),
            text: "Source?".to_string(),
            date: None,
            page: 1,
        });

        let result = to_text(&doc).unwrap();
        assert_eq!(result, "Claim\n  [comment 0 by Ann: Source?]");
    }
}
