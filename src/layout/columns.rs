//! Column detection from a horizontal coverage histogram.

use crate::model::GlyphRun;

/// Width of one coverage bucket in device units.
const BUCKET_WIDTH: f32 = 10.0;

/// Pages with fewer text runs than this are treated as single-column.
const MIN_RUNS_FOR_COLUMNS: usize = 10;

/// Maximum number of interior column boundaries.
const MAX_BOUNDARIES: usize = 2;

/// A detected column: the horizontal band `[left, right)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Left boundary X coordinate
    pub left: f32,
    /// Right boundary X coordinate (exclusive)
    pub right: f32,
    /// Column index (0 = leftmost)
    pub index: usize,
}

impl Column {
    /// Check if an X coordinate falls within this column.
    pub fn contains(&self, x: f32) -> bool {
        x >= self.left && x < self.right
    }
}

/// A run of sparsely covered buckets.
#[derive(Debug, Clone, Copy)]
struct Gap {
    start: usize,
    len: usize,
}

impl Gap {
    fn width(&self) -> f32 {
        self.len as f32 * BUCKET_WIDTH
    }

    fn center(&self) -> f32 {
        (self.start as f32 + self.len as f32 / 2.0) * BUCKET_WIDTH
    }
}

/// Find interior column boundaries for a page.
///
/// Returns 0-2 X coordinates in ascending order; an empty result means a
/// single column.
pub fn detect_boundaries(runs: &[GlyphRun], page_width: f32) -> Vec<f32> {
    let runs: Vec<&GlyphRun> = runs.iter().filter(|r| !r.is_blank()).collect();
    if runs.len() < MIN_RUNS_FOR_COLUMNS || page_width <= 0.0 {
        return vec![];
    }

    let bucket_count = (page_width / BUCKET_WIDTH).ceil() as usize;
    let mut coverage = vec![0usize; bucket_count];

    for run in &runs {
        let start = run.x();
        let end = run.right();
        for (i, slot) in coverage.iter_mut().enumerate() {
            let bucket_start = i as f32 * BUCKET_WIDTH;
            let bucket_end = bucket_start + BUCKET_WIDTH;
            if start < bucket_end && end > bucket_start {
                *slot += 1;
            }
        }
    }

    // Stray elements crossing a gutter (page numbers, rules) are tolerated
    let threshold = 2usize.max((runs.len() as f32 * 0.02) as usize);
    let min_gap_width = page_width * 0.05;

    // Only the interior 10%-90% of the page is searched, so margins never count
    let search_start = (bucket_count as f32 * 0.1).floor() as usize;
    let search_end = ((bucket_count as f32 * 0.9).ceil() as usize).min(bucket_count);

    let mut gaps: Vec<Gap> = Vec::new();
    let mut current: Option<Gap> = None;

    for (i, &count) in coverage
        .iter()
        .enumerate()
        .take(search_end)
        .skip(search_start)
    {
        if count <= threshold {
            match current.as_mut() {
                Some(gap) => gap.len += 1,
                None => current = Some(Gap { start: i, len: 1 }),
            }
        } else if let Some(gap) = current.take() {
            gaps.push(gap);
        }
    }
    if let Some(gap) = current {
        gaps.push(gap);
    }

    let qualifying: Vec<Gap> = gaps
        .into_iter()
        .filter(|g| g.width() >= min_gap_width)
        .collect();

    log::debug!(
        "Column gaps: {} qualifying (threshold={}, min_width={:.1})",
        qualifying.len(),
        threshold,
        min_gap_width
    );

    // Leftmost gaps win, whatever their width
    qualifying
        .iter()
        .take(MAX_BOUNDARIES)
        .map(Gap::center)
        .collect()
}

/// Build the columns covering the page from interior boundaries.
pub fn columns_from_boundaries(boundaries: &[f32], page_width: f32) -> Vec<Column> {
    let mut edges = Vec::with_capacity(boundaries.len() + 2);
    edges.push(0.0);
    edges.extend_from_slice(boundaries);
    edges.push(page_width.max(boundaries.last().copied().unwrap_or(0.0)));

    edges
        .windows(2)
        .enumerate()
        .map(|(index, w)| Column {
            left: w[0],
            right: w[1],
            index,
        })
        .collect()
}

/// Split runs into one bucket per column, indexed like `columns`.
///
/// A run belongs to the column its left edge falls in; runs outside the page
/// go to the nearest outer column. Runs keep their relative order.
pub fn partition_runs(runs: Vec<GlyphRun>, columns: &[Column]) -> Vec<Vec<GlyphRun>> {
    let Some(last) = columns.len().checked_sub(1) else {
        return vec![runs];
    };

    let mut parts: Vec<Vec<GlyphRun>> = vec![Vec::new(); columns.len()];
    for run in runs {
        let x = run.x();
        let idx = columns
            .iter()
            .find(|c| c.contains(x))
            .map(|c| c.index)
            .unwrap_or(if x < 0.0 { 0 } else { last });
        parts[idx].push(run);
    }
    parts
}
