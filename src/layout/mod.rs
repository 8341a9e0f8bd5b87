//! Page layout reconstruction.
//!
//! Font statistics are gathered once per document; every page then goes
//! through column detection, line and paragraph assembly, classification,
//! image extraction and annotation matching before the compositor merges
//! the pages in order.

mod annotations;
mod classify;
mod columns;
mod compose;
mod engine;
mod fonts;
mod images;
mod lines;
mod options;
pub mod text;

pub use annotations::{match_annotations, PendingComment};
pub use classify::{detect_alignment, detect_heading, detect_list_item, Classifier};
pub use columns::{columns_from_boundaries, detect_boundaries, partition_runs, Column};
pub use compose::{assemble_document, ComposedElement, PageLayout};
pub use engine::LayoutEngine;
pub use fonts::{round_size, FontSizeHistogram, FontStatistics, SizeBucket, DEFAULT_BODY_SIZE};
pub use images::{
    decode_rgba, encode_png, extract_images, locate_images, ImagePlacement, MIN_ENCODED_SIZE,
    MIN_IMAGE_DIMENSION,
};
pub use lines::{group_lines_into_blocks, group_runs_into_lines, TextBlock, TextLine};
pub use options::{ErrorMode, LayoutMode, LayoutOptions};
