//! Data model for layout reconstruction.
//!
//! The input half ([`Page`], [`GlyphRun`], [`DrawingInstruction`],
//! [`Annotation`]) is what a content-stream interpreter hands over; the output
//! half ([`DocumentModel`] and its items) is what an output-document
//! serializer consumes.

mod document;
mod encoding;
mod image;
mod input;
mod paragraph;

pub use document::{parse_pdf_date, Comment, DocumentItem, DocumentModel, PageElement};
pub use image::{HorizontalBias, ImageElement};
pub use input::{
    normalize_y, ops, Annotation, DrawingInstruction, GlyphRun, Matrix, Operand, Page,
    RasterSample,
};
pub use paragraph::{Alignment, ListKind, Paragraph};
