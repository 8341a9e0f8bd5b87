//! Document-wide font-size statistics for heading detection.

use std::collections::HashMap;

use crate::model::{GlyphRun, Page};

/// Body size assumed when a document has no text at all.
pub const DEFAULT_BODY_SIZE: f32 = 12.0;

/// Share of all glyph runs below which a larger size may be a heading.
const HEADING_FREQUENCY_LIMIT: f32 = 0.10;

/// Maximum number of heading levels derived from the histogram.
const MAX_HEADING_LEVELS: usize = 3;

/// Round a font size to the nearest 0.5.
pub fn round_size(size: f32) -> f32 {
    (size * 2.0).round() / 2.0
}

fn size_key(size: f32) -> i32 {
    (size * 2.0).round() as i32
}

fn key_size(key: i32) -> f32 {
    key as f32 / 2.0
}

/// Counts accumulated for one rounded font size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeBucket {
    /// Number of glyph runs at this size
    pub occurrences: usize,
    /// Number of characters at this size
    pub characters: usize,
    first_seen: usize,
}

/// Histogram of rounded font sizes over a whole document.
#[derive(Debug, Clone, Default)]
pub struct FontSizeHistogram {
    buckets: HashMap<i32, SizeBucket>,
    total_runs: usize,
}

impl FontSizeHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram over every page's glyph runs.
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut histogram = Self::new();
        for page in pages {
            for run in &page.glyph_runs {
                histogram.add_run(run);
            }
        }
        histogram
    }

    /// Add a glyph run observation. Whitespace-only runs are ignored.
    pub fn add_run(&mut self, run: &GlyphRun) {
        let trimmed = run.text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.add_size(run.font_size, run.text.chars().count());
    }

    /// Add a font size observation covering `characters` characters.
    pub fn add_size(&mut self, size: f32, characters: usize) {
        let next_ordinal = self.buckets.len();
        let bucket = self
            .buckets
            .entry(size_key(size))
            .or_insert_with(|| SizeBucket {
                first_seen: next_ordinal,
                ..Default::default()
            });
        bucket.occurrences += 1;
        bucket.characters += characters;
        self.total_runs += 1;
    }

    /// Total number of counted glyph runs.
    pub fn total_runs(&self) -> usize {
        self.total_runs
    }

    /// Counts for a (rounded) size.
    pub fn bucket(&self, size: f32) -> Option<&SizeBucket> {
        self.buckets.get(&size_key(size))
    }

    /// Check if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The size carrying the most characters; ties go to the first-seen size.
    pub fn body_size(&self) -> Option<f32> {
        self.buckets
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.characters
                    .cmp(&b.characters)
                    .then_with(|| b.first_seen.cmp(&a.first_seen))
            })
            .map(|(key, _)| key_size(*key))
    }

    /// Derive body and heading sizes.
    pub fn analyze(&self) -> FontStatistics {
        let Some(body_size) = self.body_size() else {
            return FontStatistics::default();
        };

        // Candidate heading sizes, largest first
        let mut larger: Vec<(i32, &SizeBucket)> = self
            .buckets
            .iter()
            .filter(|(key, _)| key_size(**key) > body_size)
            .map(|(key, bucket)| (*key, bucket))
            .collect();
        larger.sort_by(|a, b| b.0.cmp(&a.0));

        let total = self.total_runs.max(1) as f32;
        let heading_sizes = larger
            .into_iter()
            .filter(|(_, bucket)| (bucket.occurrences as f32 / total) < HEADING_FREQUENCY_LIMIT)
            .take(MAX_HEADING_LEVELS)
            .enumerate()
            .map(|(i, (key, _))| (key_size(key), (i + 1) as u8))
            .collect();

        FontStatistics {
            body_size,
            heading_sizes,
        }
    }
}

/// Read-only font statistics shared by every page's classification.
#[derive(Debug, Clone, PartialEq)]
pub struct FontStatistics {
    /// Body text font size (most characters)
    pub body_size: f32,
    /// Heading sizes with their level, largest (level 1) first
    pub heading_sizes: Vec<(f32, u8)>,
}

impl FontStatistics {
    /// Compute statistics for a set of pages.
    pub fn from_pages(pages: &[Page]) -> Self {
        FontSizeHistogram::from_pages(pages).analyze()
    }

    /// Heading level for a font size found in the histogram's heading sizes.
    pub fn heading_level(&self, font_size: f32) -> Option<u8> {
        let rounded = round_size(font_size);
        self.heading_sizes
            .iter()
            .find(|(size, _)| (*size - rounded).abs() < f32::EPSILON)
            .map(|(_, level)| *level)
    }
}

impl Default for FontStatistics {
    fn default() -> Self {
        Self {
            body_size: DEFAULT_BODY_SIZE,
            heading_sizes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe(histogram: &mut FontSizeHistogram, size: f32, count: usize, chars: usize) {
        for _ in 0..count {
            histogram.add_size(size, chars);
        }
    }

    #[test]
    fn test_font_statistics() {
        let mut histogram = FontSizeHistogram::new();
        // Body text (most common)
        observe(&mut histogram, 12.0, 200, 40);
        // Rare large size
        observe(&mut histogram, 24.0, 3, 10);

        let stats = histogram.analyze();
        assert_eq!(stats.body_size, 12.0);
        assert_eq!(stats.heading_sizes, vec![(24.0, 1)]);
        assert_eq!(stats.heading_level(24.0), Some(1));
        assert_eq!(stats.heading_level(12.0), None);
    }

    #[test]
    fn test_frequent_large_size_is_not_heading() {
        let mut histogram = FontSizeHistogram::new();
        observe(&mut histogram, 11.0, 50, 60);
        // Large body text: 40% of runs, fewer characters than 11pt
        observe(&mut histogram, 14.0, 40, 30);
        observe(&mut histogram, 20.0, 2, 12);

        let stats = histogram.analyze();
        assert_eq!(stats.body_size, 11.0);
        assert_eq!(stats.heading_sizes, vec![(20.0, 1)]);
        assert_eq!(stats.heading_level(14.0), None);
    }

    #[test]
    fn test_at_most_three_heading_levels() {
        let mut histogram = FontSizeHistogram::new();
        observe(&mut histogram, 10.0, 500, 50);
        for size in [30.0, 24.0, 18.0, 14.0] {
            observe(&mut histogram, size, 2, 10);
        }

        let stats = histogram.analyze();
        assert_eq!(
            stats.heading_sizes,
            vec![(30.0, 1), (24.0, 2), (18.0, 3)]
        );
        assert_eq!(stats.heading_level(14.0), None);
    }

    #[test]
    fn test_sizes_rounded_to_half_points() {
        let mut histogram = FontSizeHistogram::new();
        histogram.add_size(11.8, 10);
        histogram.add_size(12.1, 10);
        histogram.add_size(12.3, 10);

        assert_eq!(histogram.bucket(12.0).map(|b| b.occurrences), Some(2));
        assert_eq!(histogram.bucket(12.5).map(|b| b.occurrences), Some(1));
        assert_eq!(round_size(17.74), 17.5);
        assert_eq!(round_size(17.76), 18.0);
    }

    #[test]
    fn test_body_size_tie_goes_to_first_seen() {
        let mut histogram = FontSizeHistogram::new();
        histogram.add_size(10.0, 100);
        histogram.add_size(9.0, 100);
        assert_eq!(histogram.body_size(), Some(10.0));
    }

    #[test]
    fn test_blank_runs_are_ignored() {
        let mut histogram = FontSizeHistogram::new();
        histogram.add_run(&GlyphRun::new("   ", 0.0, 0.0, 30.0));
        histogram.add_run(&GlyphRun::new("text", 0.0, 0.0, 12.0));
        assert_eq!(histogram.total_runs(), 1);
        assert!(histogram.bucket(30.0).is_none());
    }

    #[test]
    fn test_empty_histogram_defaults() {
        let stats = FontSizeHistogram::new().analyze();
        assert_eq!(stats.body_size, DEFAULT_BODY_SIZE);
        assert!(stats.heading_sizes.is_empty());
    }
}
