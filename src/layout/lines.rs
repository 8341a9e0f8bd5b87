//! Line and paragraph assembly within one column.

use std::cmp::Ordering;

use crate::model::{normalize_y, GlyphRun, Paragraph};

use super::text;

/// Runs whose baselines differ by no more than this share a line.
const LINE_Y_TOLERANCE: f32 = 2.0;

/// Horizontal gap, as a share of the taller run's height, that means a word break.
const WORD_GAP_RATIO: f32 = 0.3;

/// Vertical gap, as a multiple of the line's font size, that ends a paragraph.
const PARAGRAPH_GAP_RATIO: f32 = 2.0;

/// A text line composed of runs on the same baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The runs in this line, sorted by X position
    pub runs: Vec<GlyphRun>,
    /// Merged text with word spaces inserted
    pub text: String,
    /// Largest font size among the runs
    pub font_size: f32,
    /// Y position (baseline of the first run)
    pub y: f32,
    /// Leftmost X position
    pub x_start: f32,
    /// Rightmost X position
    pub x_end: f32,
}

impl TextLine {
    /// Create a line from runs already known to share a baseline.
    pub fn from_runs(mut runs: Vec<GlyphRun>) -> Self {
        if runs.is_empty() {
            return Self {
                runs,
                text: String::new(),
                font_size: 0.0,
                y: 0.0,
                x_start: 0.0,
                x_end: 0.0,
            };
        }

        let y = runs[0].y();
        runs.sort_by(|a, b| a.x().partial_cmp(&b.x()).unwrap_or(Ordering::Equal));

        let font_size = runs.iter().map(|r| r.font_size).fold(0.0f32, f32::max);
        let x_start = runs
            .iter()
            .map(|r| r.x())
            .fold(f32::INFINITY, f32::min);
        let x_end = runs
            .iter()
            .map(|r| r.right())
            .fold(f32::NEG_INFINITY, f32::max);
        let text = merge_run_text(&runs);

        Self {
            runs,
            text,
            font_size,
            y,
            x_start,
            x_end,
        }
    }

    /// Check if the line has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Concatenate X-sorted runs, inserting a single space at word gaps.
fn merge_run_text(runs: &[GlyphRun]) -> String {
    let mut result = String::new();

    for (i, run) in runs.iter().enumerate() {
        if i > 0 {
            let prev = &runs[i - 1];
            let gap = run.x() - prev.right();
            let height = prev.font_size.max(run.font_size);

            let prev_ends_with_space = prev.text.ends_with(char::is_whitespace);
            let curr_starts_with_space = run.text.starts_with(char::is_whitespace);

            if gap > height * WORD_GAP_RATIO && !prev_ends_with_space && !curr_starts_with_space {
                result.push(' ');
            }
        }
        result.push_str(&run.text);
    }

    result
}

/// Group runs into lines, top of page first.
///
/// Runs are sorted by Y descending then X ascending; a new line starts when
/// the baseline moves by more than the line tolerance.
pub fn group_runs_into_lines(runs: Vec<GlyphRun>) -> Vec<TextLine> {
    let mut runs: Vec<GlyphRun> = runs.into_iter().filter(|r| !r.is_blank()).collect();
    if runs.is_empty() {
        return vec![];
    }

    // Sort spans by Y (descending, since PDF Y is bottom-up) then X
    runs.sort_by(|a, b| {
        b.y()
            .partial_cmp(&a.y())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.x().partial_cmp(&b.x()).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current: Vec<GlyphRun> = Vec::new();
    let mut previous_y: Option<f32> = None;

    for run in runs {
        let y = run.y();
        if let Some(prev) = previous_y {
            if (y - prev).abs() > LINE_Y_TOLERANCE && !current.is_empty() {
                lines.push(TextLine::from_runs(std::mem::take(&mut current)));
            }
        }
        previous_y = Some(y);
        current.push(run);
    }

    if !current.is_empty() {
        lines.push(TextLine::from_runs(current));
    }

    lines
}

/// A block of consecutive lines forming one paragraph.
#[derive(Debug, Clone)]
pub struct TextBlock {
    /// The lines in this block, top first
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Create a block from lines.
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }

    /// Dominant (largest) font size.
    pub fn font_size(&self) -> f32 {
        self.lines.iter().map(|l| l.font_size).fold(0.0f32, f32::max)
    }

    /// Left edge of the union of the lines.
    pub fn x_start(&self) -> f32 {
        self.lines
            .iter()
            .map(|l| l.x_start)
            .fold(f32::INFINITY, f32::min)
    }

    /// Right edge of the union of the lines.
    pub fn x_end(&self) -> f32 {
        self.lines
            .iter()
            .map(|l| l.x_end)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Baseline of the top line.
    pub fn top_y(&self) -> f32 {
        self.lines.first().map(|l| l.y).unwrap_or(0.0)
    }

    /// Get the combined text of all lines.
    pub fn text(&self, normalize: bool) -> String {
        let lines: Vec<&str> = self.lines.iter().map(|l| l.text.as_str()).collect();
        let joined = text::join_lines(&lines, normalize);
        if normalize {
            text::normalize(&joined)
        } else {
            joined
        }
    }

    /// Check if the block is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    /// Convert into an unclassified paragraph positioned on the page.
    pub fn into_paragraph(self, page_height: f32, normalize: bool) -> Paragraph {
        let mut paragraph = Paragraph::new(self.text(normalize), self.font_size())
            .with_extent(self.x_start(), self.x_end())
            .with_y(normalize_y(self.top_y(), page_height));
        paragraph.line_count = self.lines.len();
        paragraph
    }
}

/// Group lines into paragraphs based on vertical spacing.
pub fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<TextBlock> {
    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            let gap = prev.y - line.y;
            if gap > prev.font_size * PARAGRAPH_GAP_RATIO {
                blocks.push(TextBlock::new(std::mem::take(&mut current)));
            }
        }
        current.push(line);
    }

    // Don't forget the last block
    if !current.is_empty() {
        blocks.push(TextBlock::new(current));
    }

    blocks
}
