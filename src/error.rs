//! Error types for pdf-reflow.

use std::io;
use thiserror::Error;

/// Result type alias for pdf-reflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout reconstruction.
///
/// Heuristic decisions (columns, alignment, headings, lists) never fail;
/// these variants cover page-level input failures and output plumbing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading page dumps or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON page dump or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The page source could not produce a page.
    #[error("Page {page} could not be read: {reason}")]
    PageUnreadable {
        /// 1-based page number
        page: u32,
        /// Why the page could not be produced
        reason: String,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Re-encoding a decoded raster failed.
    #[error("Image encoding error: {0}")]
    ImageEncode(String),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageEncode(err.to_string())
    }
}
