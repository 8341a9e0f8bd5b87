//! Paragraph-level output types.

use serde::{Deserialize, Serialize};

/// A reconstructed paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Joined text (list marker stripped for list items)
    pub text: String,

    /// Dominant (largest) font size among the paragraph's lines
    pub font_size: f32,

    /// Left edge of the union of the lines
    pub x_start: f32,

    /// Right edge of the union of the lines
    pub x_end: f32,

    /// Number of lines merged into this paragraph
    pub line_count: usize,

    /// Vertical position of the top line, 0 = top of page, 1 = bottom
    pub y_normalized: f32,

    /// Heading level (1-3) or None for body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,

    /// Text alignment
    #[serde(default)]
    pub alignment: Alignment,

    /// List kind
    #[serde(default)]
    pub list_kind: ListKind,

    /// Id of the bound comment in [`DocumentModel::comments`](super::DocumentModel)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<u32>,
}

impl Paragraph {
    /// Create an unclassified body paragraph.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            x_start: 0.0,
            x_end: 0.0,
            line_count: 1,
            y_normalized: 0.0,
            heading_level: None,
            alignment: Alignment::Left,
            list_kind: ListKind::None,
            comment_id: None,
        }
    }

    /// Set the horizontal extent.
    pub fn with_extent(mut self, x_start: f32, x_end: f32) -> Self {
        self.x_start = x_start;
        self.x_end = x_end;
        self
    }

    /// Set the normalized vertical position.
    pub fn with_y(mut self, y_normalized: f32) -> Self {
        self.y_normalized = y_normalized;
        self
    }

    /// Width of the paragraph's extent.
    pub fn width(&self) -> f32 {
        (self.x_end - self.x_start).max(0.0)
    }

    /// Number of characters in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.heading_level.is_some()
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.list_kind != ListKind::None
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

/// Kind of list item a paragraph was recognized as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Not a list item
    #[default]
    None,
    /// Bulleted item (•, -, *, ...)
    Bullet,
    /// Numbered item (1. 2) (3) ...)
    Numbered,
}
