//! The layout reconstruction pipeline.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{DocumentModel, Page, Paragraph};
use crate::source::PageSource;

use super::annotations::match_annotations;
use super::classify::Classifier;
use super::columns::{columns_from_boundaries, detect_boundaries, partition_runs};
use super::compose::{assemble_document, PageLayout};
use super::fonts::FontStatistics;
use super::images::extract_images;
use super::lines::{group_lines_into_blocks, group_runs_into_lines};
use super::options::{ErrorMode, LayoutOptions};

/// Reconstructs documents from interpreted pages.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    /// Create an engine with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// The engine's options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Load every page from a source and reconstruct the document.
    ///
    /// In strict mode the first unreadable page aborts; in lenient mode it is
    /// recorded in [`DocumentModel::skipped_pages`] and left out.
    pub fn reconstruct<S: PageSource + ?Sized>(&self, source: &S) -> Result<DocumentModel> {
        let total = source.page_count();
        let mut pages = Vec::with_capacity(total as usize);
        let mut skipped = Vec::new();

        for number in 1..=total {
            match source.load_page(number) {
                Ok(page) => pages.push(page),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(match e {
                            err @ Error::PageUnreadable { .. } => err,
                            other => Error::PageUnreadable {
                                page: number,
                                reason: other.to_string(),
                            },
                        });
                    }
                    log::warn!("Skipping page {}: {}", number, e);
                    skipped.push(number);
                }
            }
        }

        Ok(self.reconstruct_pages_with_skipped(&pages, skipped))
    }

    /// Reconstruct a document from pages already in memory.
    pub fn reconstruct_pages(&self, pages: &[Page]) -> DocumentModel {
        self.reconstruct_pages_with_skipped(pages, Vec::new())
    }

    fn reconstruct_pages_with_skipped(&self, pages: &[Page], skipped: Vec<u32>) -> DocumentModel {
        // Document-wide statistics are complete before any page is classified
        let stats = if self.options.needs_font_statistics() {
            let stats = FontStatistics::from_pages(pages);
            log::debug!(
                "Body size {:.1}, heading sizes {:?}",
                stats.body_size,
                stats.heading_sizes
            );
            Some(stats)
        } else {
            None
        };

        let layouts: Vec<PageLayout> = if self.options.parallel {
            pages
                .par_iter()
                .map(|page| self.process_page(page, stats.as_ref()))
                .collect()
        } else {
            pages
                .iter()
                .map(|page| self.process_page(page, stats.as_ref()))
                .collect()
        };

        assemble_document(layouts, skipped)
    }

    /// Run columns, lines, classification, images and annotations for one page.
    pub fn process_page(&self, page: &Page, stats: Option<&FontStatistics>) -> PageLayout {
        let paragraphs = if self.options.extracts_text() {
            self.page_paragraphs(page, stats)
        } else {
            Vec::new()
        };

        let bindings = if self.options.extracts_text() && self.options.extract_comments {
            match_annotations(&paragraphs, &page.annotations, page.height)
        } else {
            Vec::new()
        };

        let images = if self.options.extract_images {
            extract_images(page)
        } else {
            Vec::new()
        };

        log::debug!(
            "Page {}: {} paragraphs, {} images, {} comments",
            page.number,
            paragraphs.len(),
            images.len(),
            bindings.len()
        );

        PageLayout::compose(page.number, paragraphs, bindings, images)
    }

    /// Paragraphs of a page in column-first reading order, classified.
    fn page_paragraphs(&self, page: &Page, stats: Option<&FontStatistics>) -> Vec<Paragraph> {
        let runs: Vec<_> = page.text_runs().cloned().collect();
        let boundaries = detect_boundaries(&runs, page.width);
        let columns = columns_from_boundaries(&boundaries, page.width);
        if columns.len() > 1 {
            for column in &columns {
                log::debug!(
                    "Page {}: column {} spans {:.1}..{:.1}",
                    page.number,
                    column.index,
                    column.left,
                    column.right
                );
            }
        }

        let classifier = Classifier::new(stats, page.width);
        let mut paragraphs = Vec::new();

        for column in partition_runs(runs, &columns) {
            let lines = group_runs_into_lines(column);
            for block in group_lines_into_blocks(lines) {
                if block.is_empty() {
                    continue;
                }
                let mut paragraph = block.into_paragraph(page.height, self.options.normalize_text);
                classifier.classify(&mut paragraph);
                paragraphs.push(paragraph);
            }
        }

        paragraphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, Annotation, DocumentItem, GlyphRun, ListKind};

    fn body_page(number: u32) -> Page {
        let mut page = Page::new(number, 600.0, 800.0);
        page.add_run(GlyphRun::new("Title", 250.0, 750.0, 24.0).with_width(100.0));
        for i in 0..5 {
            page.add_run(
                GlyphRun::new("Body text line", 72.0, 700.0 - i as f32 * 14.0, 12.0)
                    .with_width(450.0),
            );
        }
        page.add_run(GlyphRun::new("1. First item", 72.0, 600.0, 12.0).with_width(100.0));
        page
    }

    #[test]
    fn test_page_pipeline() {
        let engine = LayoutEngine::new(LayoutOptions::default().sequential());
        let doc = engine.reconstruct_pages(&[body_page(1)]);

        let paragraphs: Vec<_> = doc.paragraphs().collect();
        assert_eq!(paragraphs.len(), 3);

        assert_eq!(paragraphs[0].text, "Title");
        assert_eq!(paragraphs[0].heading_level, Some(1));
        assert_eq!(paragraphs[0].alignment, Alignment::Center);

        assert_eq!(paragraphs[1].line_count, 5);
        assert_eq!(paragraphs[1].heading_level, None);

        assert_eq!(paragraphs[2].text, "First item");
        assert_eq!(paragraphs[2].list_kind, ListKind::Numbered);
    }

    #[test]
    fn test_smart_headings_disabled() {
        let options = LayoutOptions::default().with_smart_headings(false);
        let doc = LayoutEngine::new(options).reconstruct_pages(&[body_page(1)]);
        assert!(doc.paragraphs().all(|p| p.heading_level.is_none()));
    }

    #[test]
    fn test_images_only_mode_skips_text() {
        let mut page = body_page(1);
        page.add_annotation(Annotation::note("note", [0.0, 740.0, 10.0, 750.0]));
        let options = LayoutOptions::default().images_only().with_comments(true);
        let doc = LayoutEngine::new(options).reconstruct_pages(&[page]);
        assert!(doc.is_empty());
        assert!(doc.comments.is_empty());
    }

    #[test]
    fn test_comments_bound_when_enabled() {
        let mut page = body_page(1);
        page.add_annotation(Annotation::note("Fix title", [500.0, 740.0, 520.0, 752.0]));

        let doc = LayoutEngine::new(LayoutOptions::default())
            .reconstruct_pages(std::slice::from_ref(&page));
        assert!(doc.comments.is_empty());

        let doc = LayoutEngine::new(LayoutOptions::default().with_comments(true))
            .reconstruct_pages(&[page]);
        assert_eq!(doc.comments.len(), 1);
        let title = doc.paragraphs().next().map(|p| p.comment_id);
        assert_eq!(title, Some(Some(0)));
    }

    #[test]
    fn test_breaks_between_pages() {
        let pages = vec![body_page(1), body_page(2), body_page(3)];
        let doc = LayoutEngine::default().reconstruct_pages(&pages);
        assert_eq!(doc.page_break_count(), 2);
        assert!(matches!(doc.elements.last(), Some(DocumentItem::Paragraph(_))));
    }

    #[test]
    fn test_columns_read_left_to_right() {
        let mut page = Page::new(1, 600.0, 800.0);
        for i in 0..6 {
            let mut y = 700.0 - i as f32 * 14.0;
            if i >= 3 {
                y -= 40.0;
            }
            page.add_run(GlyphRun::new(format!("left {}", i), 50.0, y, 12.0).with_width(200.0));
            page.add_run(GlyphRun::new(format!("right {}", i), 330.0, y, 12.0).with_width(220.0));
        }

        let engine = LayoutEngine::default();
        let texts: Vec<String> = engine
            .page_paragraphs(&page, None)
            .into_iter()
            .map(|p| p.text)
            .collect();
        assert_eq!(
            texts,
            vec![
                "left 0 left 1 left 2",
                "left 3 left 4 left 5",
                "right 0 right 1 right 2",
                "right 3 right 4 right 5",
            ]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pages: Vec<Page> = (1..=6).map(body_page).collect();
        let parallel = LayoutEngine::new(LayoutOptions::default()).reconstruct_pages(&pages);
        let sequential =
            LayoutEngine::new(LayoutOptions::default().sequential()).reconstruct_pages(&pages);
        assert_eq!(parallel, sequential);
    }
}
