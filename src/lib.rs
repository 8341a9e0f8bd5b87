//! # pdf-reflow
//!
//! Page layout reconstruction for interpreted PDF pages.
//!
//! This library takes the positioned glyph runs, drawing instructions and
//! annotations a PDF content-stream interpreter produces and rebuilds a
//! reflowable document from them: headings, paragraphs, lists, alignment,
//! multi-column reading order, repositioned images and bound comments.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_reflow::{reconstruct_file, render};
//!
//! fn main() -> pdf_reflow::Result<()> {
//!     // Reconstruct from a JSON page dump
//!     let doc = reconstruct_file("pages.json")?;
//!
//!     // Preview as plain text
//!     println!("{}", render::to_text(&doc)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Heading detection**: document-wide font-size histogram
//! - **Reading order**: up to three columns per page
//! - **Lists and alignment**: bullet and numbered items, centered and right-aligned text
//! - **Images**: transform-aware placement, re-encoded as PNG
//! - **Comments**: sticky notes bound to the nearest paragraph
//! - **Parallel processing**: uses Rayon for multi-page documents

pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{ErrorMode, FontStatistics, LayoutEngine, LayoutMode, LayoutOptions};
pub use model::{
    Alignment, Annotation, Comment, DocumentItem, DocumentModel, DrawingInstruction, GlyphRun,
    HorizontalBias, ImageElement, ListKind, Matrix, Page, Paragraph, RasterSample,
};
pub use render::JsonFormat;
pub use source::{JsonPageSource, PageSource};

use std::io::Read;
use std::path::Path;

/// Reconstruct a document from pages in memory with default options.
///
/// # Example
///
/// ```
/// use pdf_reflow::{reconstruct, GlyphRun, Page};
///
/// let mut page = Page::letter(1);
/// page.add_run(GlyphRun::new("Hello", 72.0, 700.0, 12.0));
/// let doc = reconstruct(&[page]);
/// assert_eq!(doc.plain_text(), "Hello");
/// ```
pub fn reconstruct(pages: &[Page]) -> DocumentModel {
    LayoutEngine::default().reconstruct_pages(pages)
}

/// Reconstruct a document from pages in memory with custom options.
pub fn reconstruct_with_options(pages: &[Page], options: LayoutOptions) -> DocumentModel {
    LayoutEngine::new(options).reconstruct_pages(pages)
}

/// Reconstruct a document from any page source.
///
/// Fails on an unreadable page unless `options` is lenient.
pub fn reconstruct_source<S: PageSource + ?Sized>(
    source: &S,
    options: LayoutOptions,
) -> Result<DocumentModel> {
    LayoutEngine::new(options).reconstruct(source)
}

/// Reconstruct a document from a JSON page dump file.
///
/// # Example
///
/// ```no_run
/// use pdf_reflow::reconstruct_file;
///
/// let doc = reconstruct_file("pages.json").unwrap();
/// println!("Paragraphs: {}", doc.paragraphs().count());
/// ```
pub fn reconstruct_file<P: AsRef<Path>>(path: P) -> Result<DocumentModel> {
    let source = JsonPageSource::from_path(path)?;
    LayoutEngine::default().reconstruct(&source)
}

/// Reconstruct a document from a JSON page dump reader.
pub fn reconstruct_reader<R: Read>(reader: R) -> Result<DocumentModel> {
    let source = JsonPageSource::from_reader(reader)?;
    LayoutEngine::default().reconstruct(&source)
}

/// Reconstruct a JSON page dump file and render the result as JSON.
///
/// # Example
///
/// ```no_run
/// use pdf_reflow::{to_json, JsonFormat};
///
/// let json = to_json("pages.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("document.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = reconstruct_file(path)?;
    render::to_json(&doc, format)
}

/// Reconstruct a JSON page dump file and render a plain-text preview.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = reconstruct_file(path)?;
    render::to_text(&doc)
}

/// Builder for reconstructing documents.
///
/// # Example
///
/// ```no_run
/// use pdf_reflow::Reflow;
///
/// let text = Reflow::new()
///     .with_comments(true)
///     .lenient()
///     .open("pages.json")?
///     .to_text()?;
/// # Ok::<(), pdf_reflow::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reflow {
    options: LayoutOptions,
}

impl Reflow {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options at once.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.options = self.options.with_images(extract);
        self
    }

    /// Enable or disable heading detection.
    pub fn with_smart_headings(mut self, enabled: bool) -> Self {
        self.options = self.options.with_smart_headings(enabled);
        self
    }

    /// Enable or disable comment extraction.
    pub fn with_comments(mut self, extract: bool) -> Self {
        self.options = self.options.with_comments(extract);
        self
    }

    /// Enable or disable text normalization.
    pub fn with_text_normalization(mut self, enabled: bool) -> Self {
        self.options = self.options.with_text_normalization(enabled);
        self
    }

    /// Reconstruct images only.
    pub fn images_only(mut self) -> Self {
        self.options = self.options.images_only();
        self
    }

    /// The options this builder has accumulated.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Reconstruct a JSON page dump file.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<ReflowResult> {
        let source = JsonPageSource::from_path(path)?;
        self.read_source(&source)
    }

    /// Reconstruct from any page source.
    pub fn read_source<S: PageSource + ?Sized>(self, source: &S) -> Result<ReflowResult> {
        let document = LayoutEngine::new(self.options).reconstruct(source)?;
        Ok(ReflowResult { document })
    }

    /// Reconstruct pages already in memory.
    pub fn read_pages(self, pages: &[Page]) -> ReflowResult {
        let document = LayoutEngine::new(self.options).reconstruct_pages(pages);
        ReflowResult { document }
    }
}

/// Result of a reconstruction.
#[derive(Debug, Clone)]
pub struct ReflowResult {
    /// The reconstructed document
    pub document: DocumentModel,
}

impl ReflowResult {
    /// Convert to a plain-text preview.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get paragraph text only.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &DocumentModel {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pages() -> Vec<Page> {
        (1..=2)
            .map(|n| {
                let mut page = Page::letter(n);
                page.add_run(GlyphRun::new(format!("Page {} text", n), 72.0, 700.0, 12.0));
                page
            })
            .collect()
    }

    #[test]
    fn test_reconstruct() {
        let doc = reconstruct(&sample_pages());
        assert_eq!(doc.plain_text(), "Page 1 text\n\nPage 2 text");
        assert_eq!(doc.page_break_count(), 1);
    }

    // ==================== Builder Pattern Tests ====================

    #[test]
    fn test_reflow_builder_default() {
        let builder = Reflow::default();
        assert!(builder.options().extract_images);
        assert!(!builder.options().extract_comments);
    }

    #[test]
    fn test_reflow_builder_chained() {
        let builder = Reflow::new()
            .lenient()
            .with_comments(true)
            .with_smart_headings(false)
            .sequential();

        assert_eq!(builder.options().error_mode, ErrorMode::Lenient);
        assert!(builder.options().extract_comments);
        assert!(!builder.options().smart_headings);
        assert!(!builder.options().parallel);
    }

    #[test]
    fn test_reflow_builder_images_only() {
        let builder = Reflow::new().images_only();
        assert_eq!(builder.options().mode, LayoutMode::ImagesOnly);
    }

    #[test]
    fn test_reflow_read_pages() {
        let result = Reflow::new().sequential().read_pages(&sample_pages());
        assert_eq!(result.document().paragraphs().count(), 2);
        assert!(result.to_text().unwrap().contains('\u{000C}'));
        assert!(result.to_json(JsonFormat::Compact).unwrap().contains("page_break"));
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_reconstruct_no_pages() {
        let doc = reconstruct(&[]);
        assert!(doc.is_empty());
        assert_eq!(doc.page_break_count(), 0);
    }

    #[test]
    fn test_reconstruct_reader_invalid_json() {
        let result = reconstruct_reader("not json".as_bytes());
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_reconstruct_file_missing() {
        let result = reconstruct_file("/nonexistent/pages.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_reflow_lenient_source() {
        let source = JsonPageSource::from_json_str(
            r#"[{"number": 1, "width": 612, "height": 792}, {"number": 2}]"#,
        )
        .unwrap();

        assert!(matches!(
            Reflow::new().read_source(&source),
            Err(Error::PageUnreadable { page: 2, .. })
        ));

        let result = Reflow::new().lenient().read_source(&source).unwrap();
        assert_eq!(result.document.skipped_pages, vec![2]);
    }
}
