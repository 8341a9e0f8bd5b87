//! Input types handed over by the content-stream interpreter.
//!
//! Coordinates follow the PDF device convention: origin at the bottom-left
//! corner of the page, Y growing upwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::encoding::base64_data;

/// A 2-D affine transform `[a, b, c, d, e, f]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 6]", into = "[f32; 6]")]
pub struct Matrix {
    /// X scale
    pub a: f32,
    /// Y shear
    pub b: f32,
    /// X shear
    pub c: f32,
    /// Y scale
    pub d: f32,
    /// X translation
    pub e: f32,
    /// Y translation
    pub f: f32,
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Create a matrix from its six components.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// A pure translation.
    pub fn translate(x: f32, y: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Scale by `(sx, sy)` then translate to `(x, y)`, the usual image placement.
    pub fn scale_translate(sx: f32, sy: f32, x: f32, y: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, x, y)
    }

    /// Compose `m` in front of `self` (`m × self`), as the `cm` operator does.
    pub fn pre_multiply(&self, m: &Matrix) -> Matrix {
        Matrix {
            a: m.a * self.a + m.b * self.c,
            b: m.a * self.b + m.b * self.d,
            c: m.c * self.a + m.d * self.c,
            d: m.c * self.b + m.d * self.d,
            e: m.e * self.a + m.f * self.c + self.e,
            f: m.e * self.b + m.f * self.d + self.f,
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 6]> for Matrix {
    fn from(v: [f32; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

impl From<Matrix> for [f32; 6] {
    fn from(m: Matrix) -> Self {
        [m.a, m.b, m.c, m.d, m.e, m.f]
    }
}

/// A contiguous run of characters drawn by one text-showing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    /// The decoded text
    pub text: String,
    /// Text rendering matrix; `(e, f)` is the baseline origin
    pub transform: Matrix,
    /// Font size in device units
    pub font_size: f32,
    /// Measured advance width, when the interpreter knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl GlyphRun {
    /// Create a run at baseline origin `(x, y)`.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            transform: Matrix::translate(x, y),
            font_size,
            width: None,
        }
    }

    /// Set the measured width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// X position (left edge).
    pub fn x(&self) -> f32 {
        self.transform.e
    }

    /// Y position (baseline).
    pub fn y(&self) -> f32 {
        self.transform.f
    }

    /// Measured width, or an estimate of half the font size per character.
    pub fn effective_width(&self) -> f32 {
        match self.width {
            Some(w) if w > 0.0 => w,
            _ => self.text.chars().count() as f32 * self.font_size * 0.5,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x() + self.effective_width()
    }

    /// Whether the run carries any visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Decoded image samples, 8 bits per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterSample {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Color components per pixel (1 = gray, 3 = RGB, 4 = RGBA)
    pub components: u8,
    /// Bits per component
    #[serde(default = "default_bits_per_component")]
    pub bits_per_component: u8,
    /// Packed sample bytes, row-major
    #[serde(with = "base64_data")]
    pub data: Vec<u8>,
}

fn default_bits_per_component() -> u8 {
    8
}

impl RasterSample {
    /// Create an 8-bit sample buffer.
    pub fn new(width: u32, height: u32, components: u8, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            components,
            bits_per_component: 8,
            data,
        }
    }

    /// Expected byte count for the declared geometry.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.components as usize
    }
}

/// Opcodes of the drawing instructions the engine interprets.
pub mod ops {
    /// Push the graphics state
    pub const SAVE: &str = "q";
    /// Pop the graphics state
    pub const RESTORE: &str = "Q";
    /// Concatenate a matrix onto the current transform
    pub const CONCAT: &str = "cm";
    /// Paint a named external object
    pub const PAINT_XOBJECT: &str = "Do";
    /// Paint an inline image
    pub const INLINE_IMAGE: &str = "BI";
}

/// A single operand of a drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Numeric operand (`cm` components)
    Number(f32),
    /// Resource name (`Do` target)
    Name(String),
    /// Inline raster data (`BI`)
    Sample(RasterSample),
}

impl Operand {
    /// Numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// A raw drawing instruction from a page's content stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingInstruction {
    /// Operator name (`q`, `Q`, `cm`, `Do`, `BI`, ...)
    pub opcode: String,
    /// Operands in stream order
    #[serde(default)]
    pub operands: Vec<Operand>,
}

impl DrawingInstruction {
    /// Create an instruction.
    pub fn new(opcode: impl Into<String>, operands: Vec<Operand>) -> Self {
        Self {
            opcode: opcode.into(),
            operands,
        }
    }

    /// `q`: push the graphics state.
    pub fn save() -> Self {
        Self::new(ops::SAVE, vec![])
    }

    /// `Q`: pop the graphics state.
    pub fn restore() -> Self {
        Self::new(ops::RESTORE, vec![])
    }

    /// `cm`: concatenate `m` onto the current transform.
    pub fn concat(m: Matrix) -> Self {
        let values: [f32; 6] = m.into();
        Self::new(
            ops::CONCAT,
            values.iter().map(|v| Operand::Number(*v)).collect(),
        )
    }

    /// `Do`: paint the named raster from the page's xobjects.
    pub fn paint_xobject(name: impl Into<String>) -> Self {
        Self::new(ops::PAINT_XOBJECT, vec![Operand::Name(name.into())])
    }

    /// `BI`: paint an inline raster.
    pub fn inline_image(sample: RasterSample) -> Self {
        Self::new(ops::INLINE_IMAGE, vec![Operand::Sample(sample)])
    }
}

/// A page annotation as supplied by the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation subtype (`Text`, `FreeText`, `Link`, ...)
    pub subtype: String,
    /// Comment body
    #[serde(default)]
    pub contents: String,
    /// Bounding rectangle `[x0, y0, x1, y1]`
    pub rect: [f32; 4],
    /// Author (`/T` entry)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Modification date string (`D:YYYYMMDDHHmmSS...`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl Annotation {
    /// Create a sticky-note annotation.
    pub fn note(contents: impl Into<String>, rect: [f32; 4]) -> Self {
        Self {
            subtype: "Text".to_string(),
            contents: contents.into(),
            rect,
            author: None,
            modified: None,
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Whether this annotation is a comment the matcher considers:
    /// a sticky note or free-text box with non-empty contents.
    pub fn is_comment(&self) -> bool {
        matches!(self.subtype.as_str(), "Text" | "FreeText") && !self.contents.trim().is_empty()
    }

    /// Top edge of the rectangle.
    pub fn top(&self) -> f32 {
        self.rect[1].max(self.rect[3])
    }

    /// Normalized vertical position of the top edge (0 = top of page).
    pub fn y_normalized(&self, page_height: f32) -> f32 {
        normalize_y(self.top(), page_height)
    }
}

/// A source page: everything the engine reads for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in device units
    pub width: f32,
    /// Page height in device units
    pub height: f32,
    /// Glyph runs in interpreter order
    #[serde(default)]
    pub glyph_runs: Vec<GlyphRun>,
    /// Raw drawing instructions
    #[serde(default)]
    pub instructions: Vec<DrawingInstruction>,
    /// Page annotations
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Named raster samples referenced by `Do`
    #[serde(default)]
    pub xobjects: BTreeMap<String, RasterSample>,
}

impl Page {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            glyph_runs: Vec::new(),
            instructions: Vec::new(),
            annotations: Vec::new(),
            xobjects: BTreeMap::new(),
        }
    }

    /// Create an empty US Letter page (612 x 792).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Append a glyph run.
    pub fn add_run(&mut self, run: GlyphRun) {
        self.glyph_runs.push(run);
    }

    /// Append a drawing instruction.
    pub fn add_instruction(&mut self, instruction: DrawingInstruction) {
        self.instructions.push(instruction);
    }

    /// Attach an annotation.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Register a named raster for `Do` instructions.
    pub fn add_xobject(&mut self, name: impl Into<String>, sample: RasterSample) {
        self.xobjects.insert(name.into(), sample);
    }

    /// Glyph runs that carry visible text.
    pub fn text_runs(&self) -> impl Iterator<Item = &GlyphRun> {
        self.glyph_runs.iter().filter(|r| !r.is_blank())
    }
}

/// Convert a bottom-up Y coordinate into a 0..1 fraction from the top.
pub fn normalize_y(y: f32, page_height: f32) -> f32 {
    if page_height <= 0.0 {
        return 0.0;
    }
    (1.0 - y / page_height).clamp(0.0, 1.0)
}
