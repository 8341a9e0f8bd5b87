//! Image output types.

use serde::{Deserialize, Serialize};

use super::encoding::base64_data;

/// A decoded raster placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// PNG-encoded RGBA pixels
    #[serde(with = "base64_data")]
    pub data: Vec<u8>,

    /// Width in pixels
    pub pixel_width: u32,

    /// Height in pixels
    pub pixel_height: u32,

    /// Left edge on the page (device units)
    pub x: f32,

    /// Bottom edge on the page (device units)
    pub y: f32,

    /// Painted width (device units)
    pub width: f32,

    /// Painted height (device units)
    pub height: f32,

    /// `1 - y / page_height`, clamped to [0, 1]
    pub y_normalized: f32,

    /// Which side of the page the image sits on
    pub horizontal_bias: HorizontalBias,
}

impl ImageElement {
    /// Size of the encoded payload in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Horizontal placement of an image relative to the page center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalBias {
    /// Center left of the middle band
    Left,
    /// Center within 10% of the page middle
    #[default]
    Center,
    /// Center right of the middle band
    Right,
}

impl HorizontalBias {
    /// Classify by the image center: within 10% of the page width from the
    /// page center is `Center`, otherwise the side it falls on.
    pub fn from_position(x: f32, width: f32, page_width: f32) -> Self {
        if page_width <= 0.0 {
            return HorizontalBias::Center;
        }
        let offset = (x + width / 2.0) - page_width / 2.0;
        if offset.abs() <= page_width * 0.1 {
            HorizontalBias::Center
        } else if offset < 0.0 {
            HorizontalBias::Left
        } else {
            HorizontalBias::Right
        }
    }
}
