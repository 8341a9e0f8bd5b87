//! Embedded image extraction.
//!
//! The drawing instructions are folded over with a `(ctm, stack)` accumulator;
//! every image-painting instruction records the raster together with the
//! transform in effect. Placements are then decoded to RGBA and re-encoded
//! as PNG.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::Result;
use crate::model::{
    normalize_y, ops, DrawingInstruction, HorizontalBias, ImageElement, Matrix, Operand, Page,
    RasterSample,
};

/// Images painted smaller than this (device units) in either dimension are dropped.
pub const MIN_IMAGE_DIMENSION: f32 = 20.0;

/// PNG encodings shorter than this are treated as spacers and dropped.
pub const MIN_ENCODED_SIZE: usize = 500;

/// Transform state threaded through the instruction fold.
#[derive(Debug, Clone, Default)]
struct GraphicsState {
    ctm: Matrix,
    stack: Vec<Matrix>,
}

impl GraphicsState {
    fn save(mut self) -> Self {
        self.stack.push(self.ctm);
        self
    }

    fn restore(mut self) -> Self {
        // An unbalanced Q keeps the current matrix
        if let Some(ctm) = self.stack.pop() {
            self.ctm = ctm;
        }
        self
    }

    fn concat(mut self, m: &Matrix) -> Self {
        self.ctm = self.ctm.pre_multiply(m);
        self
    }
}

/// A raster painted on the page under a given transform.
#[derive(Debug, Clone)]
pub struct ImagePlacement<'a> {
    /// The painted raster
    pub sample: &'a RasterSample,
    /// Current transform when the image was painted
    pub ctm: Matrix,
}

impl ImagePlacement<'_> {
    /// On-page size `(|a|, |d|)`.
    pub fn size(&self) -> (f32, f32) {
        (self.ctm.a.abs(), self.ctm.d.abs())
    }

    /// On-page position `(e, f)`.
    pub fn position(&self) -> (f32, f32) {
        (self.ctm.e, self.ctm.f)
    }
}

fn concat_operand(instruction: &DrawingInstruction) -> Option<Matrix> {
    if instruction.operands.len() < 6 {
        return None;
    }
    let mut values = [0.0f32; 6];
    for (slot, operand) in values.iter_mut().zip(&instruction.operands) {
        *slot = operand.as_number()?;
    }
    Some(Matrix::from(values))
}

fn resolve_sample<'a>(page: &'a Page, instruction: &'a DrawingInstruction) -> Option<&'a RasterSample> {
    match (instruction.opcode.as_str(), instruction.operands.first()) {
        (ops::PAINT_XOBJECT, Some(Operand::Name(name))) => {
            let sample = page.xobjects.get(name);
            if sample.is_none() {
                log::debug!("Page {}: xobject {} not found", page.number, name);
            }
            sample
        }
        (ops::INLINE_IMAGE, Some(Operand::Sample(sample))) => Some(sample),
        _ => {
            log::debug!(
                "Page {}: malformed {} instruction skipped",
                page.number,
                instruction.opcode
            );
            None
        }
    }
}

/// Walk the page's drawing instructions and collect every image placement.
pub fn locate_images(page: &Page) -> Vec<ImagePlacement<'_>> {
    let (_, placements) = page.instructions.iter().fold(
        (GraphicsState::default(), Vec::new()),
        |(state, mut placements), instruction| {
            let state = match instruction.opcode.as_str() {
                ops::SAVE => state.save(),
                ops::RESTORE => state.restore(),
                ops::CONCAT => match concat_operand(instruction) {
                    Some(m) => state.concat(&m),
                    None => {
                        log::debug!("Page {}: cm with bad operands ignored", page.number);
                        state
                    }
                },
                ops::PAINT_XOBJECT | ops::INLINE_IMAGE => {
                    if let Some(sample) = resolve_sample(page, instruction) {
                        placements.push(ImagePlacement {
                            sample,
                            ctm: state.ctm,
                        });
                    }
                    state
                }
                _ => state,
            };
            (state, placements)
        },
    );
    placements
}

/// Expand 8-bit samples to RGBA. Returns `None` for unsupported layouts.
pub fn decode_rgba(sample: &RasterSample) -> Option<RgbaImage> {
    if sample.bits_per_component != 8 || sample.width == 0 || sample.height == 0 {
        return None;
    }
    if sample.data.len() != sample.expected_len() {
        return None;
    }

    let pixels: Vec<u8> = match sample.components {
        1 => sample.data.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        3 => sample
            .data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        4 => sample.data.clone(),
        _ => return None,
    };

    RgbaImage::from_raw(sample.width, sample.height, pixels)
}

/// Encode an RGBA buffer as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}

/// Turn one placement into an image element, or `None` if it is filtered out.
fn build_element(placement: &ImagePlacement<'_>, page: &Page) -> Result<Option<ImageElement>> {
    let (width, height) = placement.size();
    if width < MIN_IMAGE_DIMENSION || height < MIN_IMAGE_DIMENSION {
        log::debug!(
            "Page {}: image {:.1}x{:.1} below minimum size",
            page.number,
            width,
            height
        );
        return Ok(None);
    }

    let sample = placement.sample;
    let Some(rgba) = decode_rgba(sample) else {
        log::debug!(
            "Page {}: unsupported raster ({} components, {} bpc, {} bytes)",
            page.number,
            sample.components,
            sample.bits_per_component,
            sample.data.len()
        );
        return Ok(None);
    };

    let data = encode_png(&rgba)?;
    if data.len() < MIN_ENCODED_SIZE {
        log::debug!("Page {}: {}-byte image dropped", page.number, data.len());
        return Ok(None);
    }

    let (x, y) = placement.position();
    Ok(Some(ImageElement {
        data,
        pixel_width: sample.width,
        pixel_height: sample.height,
        x,
        y,
        width,
        height,
        y_normalized: normalize_y(y, page.height),
        horizontal_bias: HorizontalBias::from_position(x, width, page.width),
    }))
}

/// Extract the page's images in painting order.
///
/// Failures are per image: a raster that cannot be encoded is logged and
/// skipped.
pub fn extract_images(page: &Page) -> Vec<ImageElement> {
    locate_images(page)
        .iter()
        .filter_map(|placement| match build_element(placement, page) {
            Ok(element) => element,
            Err(e) => {
                log::warn!("Page {}: image skipped: {}", page.number, e);
                None
            }
        })
        .collect()
}
