//! Alignment, heading and list classification of paragraphs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{Alignment, ListKind, Paragraph};

use super::fonts::{round_size, FontStatistics};

lazy_static! {
    static ref BULLET_PATTERN: Regex =
        Regex::new(r"^\s*[•\-*◦▪▸►●○]\s+(.+)$").expect("valid bullet pattern");
    static ref NUMBERED_PATTERN: Regex =
        Regex::new(r"^\s*(?:\d+[.):]|\(\d+\))\s+(.+)$").expect("valid numbered pattern");
}

/// Paragraphs wider than this share of the page are full-width body text.
const FULL_WIDTH_RATIO: f32 = 0.7;

/// Maximum margin difference (share of page width) for centered text.
const CENTER_TOLERANCE: f32 = 0.1;

/// Size ratios to body text for heading levels 1-3.
const H1_RATIO: f32 = 1.6;
const H2_RATIO: f32 = 1.3;
const H3_RATIO: f32 = 1.15;

/// Short centered text larger than body is promoted to H2.
const SHORT_HEADING_MAX_CHARS: usize = 100;
const SHORT_HEADING_MAX_LINES: usize = 2;

/// Classify alignment from the paragraph's horizontal extent.
pub fn detect_alignment(x_start: f32, x_end: f32, page_width: f32) -> Alignment {
    if page_width <= 0.0 {
        return Alignment::Left;
    }

    let left_margin = x_start;
    let right_margin = page_width - x_end;
    let width = x_end - x_start;

    if width > page_width * FULL_WIDTH_RATIO {
        return Alignment::Left;
    }
    if (left_margin - right_margin).abs() < page_width * CENTER_TOLERANCE {
        return Alignment::Center;
    }
    if right_margin < page_width * 0.15 && left_margin > page_width * 0.3 {
        return Alignment::Right;
    }
    Alignment::Left
}

/// Determine the heading level of a paragraph, if any.
///
/// Exact histogram heading sizes win, then the ratio to body size, then the
/// short-centered-text rule.
pub fn detect_heading(paragraph: &Paragraph, alignment: Alignment, stats: &FontStatistics) -> Option<u8> {
    let size = round_size(paragraph.font_size);

    if let Some(level) = stats.heading_level(size) {
        return Some(level);
    }

    let body = stats.body_size;
    if body > 0.0 {
        let ratio = size / body;
        if ratio >= H1_RATIO {
            return Some(1);
        } else if ratio >= H2_RATIO {
            return Some(2);
        } else if ratio >= H3_RATIO {
            return Some(3);
        }
    }

    let is_short = paragraph.char_count() < SHORT_HEADING_MAX_CHARS
        && paragraph.line_count <= SHORT_HEADING_MAX_LINES;
    if is_short && alignment == Alignment::Center && size > body {
        return Some(2);
    }

    None
}

/// Recognize a list marker, returning the kind and the text without it.
pub fn detect_list_item(text: &str) -> Option<(ListKind, String)> {
    if let Some(caps) = BULLET_PATTERN.captures(text) {
        return Some((ListKind::Bullet, caps[1].to_string()));
    }
    if let Some(caps) = NUMBERED_PATTERN.captures(text) {
        return Some((ListKind::Numbered, caps[1].to_string()));
    }
    None
}

/// Per-page paragraph classifier sharing the document's font statistics.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    stats: Option<&'a FontStatistics>,
    page_width: f32,
}

impl<'a> Classifier<'a> {
    /// Create a classifier. `stats` is `None` when heading detection is off.
    pub fn new(stats: Option<&'a FontStatistics>, page_width: f32) -> Self {
        Self { stats, page_width }
    }

    /// Assign alignment, heading level and list kind to a paragraph.
    pub fn classify(&self, paragraph: &mut Paragraph) {
        paragraph.alignment = detect_alignment(paragraph.x_start, paragraph.x_end, self.page_width);

        paragraph.heading_level = self
            .stats
            .and_then(|stats| detect_heading(paragraph, paragraph.alignment, stats));

        if paragraph.heading_level.is_none() {
            if let Some((kind, text)) = detect_list_item(&paragraph.text) {
                paragraph.list_kind = kind;
                paragraph.text = text;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> FontStatistics {
        FontStatistics {
            body_size: 12.0,
            heading_sizes: vec![(24.0, 1)],
        }
    }

    #[test]
    fn test_alignment_center() {
        assert_eq!(detect_alignment(250.0, 350.0, 600.0), Alignment::Center);
    }

    #[test]
    fn test_alignment_full_width_is_left() {
        assert_eq!(detect_alignment(50.0, 550.0, 600.0), Alignment::Left);
    }

    #[test]
    fn test_alignment_right() {
        assert_eq!(detect_alignment(400.0, 560.0, 600.0), Alignment::Right);
    }

    #[test]
    fn test_alignment_left_default() {
        assert_eq!(detect_alignment(72.0, 300.0, 600.0), Alignment::Left);
        assert_eq!(detect_alignment(0.0, 10.0, 0.0), Alignment::Left);
    }

    #[test]
    fn test_heading_from_histogram() {
        let p = Paragraph::new("Introduction", 24.2);
        assert_eq!(detect_heading(&p, Alignment::Left, &stats()), Some(1));
    }

    #[test]
    fn test_heading_from_ratio() {
        let s = stats();
        assert_eq!(detect_heading(&Paragraph::new("a", 20.0), Alignment::Left, &s), Some(1));
        assert_eq!(detect_heading(&Paragraph::new("a", 16.0), Alignment::Left, &s), Some(2));
        assert_eq!(detect_heading(&Paragraph::new("a", 14.0), Alignment::Left, &s), Some(3));
        assert_eq!(detect_heading(&Paragraph::new("a", 12.0), Alignment::Left, &s), None);
    }

    #[test]
    fn test_short_centered_text_promoted() {
        let p = Paragraph::new("Chapter title", 13.0);
        assert_eq!(detect_heading(&p, Alignment::Center, &stats()), Some(2));
        assert_eq!(detect_heading(&p, Alignment::Left, &stats()), None);

        let mut long = Paragraph::new("Chapter title", 13.0);
        long.line_count = 3;
        assert_eq!(detect_heading(&long, Alignment::Center, &stats()), None);
    }

    #[test]
    fn test_numbered_list_item() {
        assert_eq!(
            detect_list_item("1. First item"),
            Some((ListKind::Numbered, "First item".to_string()))
        );
        assert_eq!(
            detect_list_item("(12) Twelfth"),
            Some((ListKind::Numbered, "Twelfth".to_string()))
        );
        assert_eq!(
            detect_list_item("3) Third"),
            Some((ListKind::Numbered, "Third".to_string()))
        );
    }

    #[test]
    fn test_bullet_list_item() {
        assert_eq!(
            detect_list_item("• Apples"),
            Some((ListKind::Bullet, "Apples".to_string()))
        );
        assert_eq!(
            detect_list_item("  - Pears"),
            Some((ListKind::Bullet, "Pears".to_string()))
        );
        // Marker without a following space is not a list
        assert_eq!(detect_list_item("-5 degrees"), None);
        assert_eq!(detect_list_item("1.5 million"), None);
    }

    #[test]
    fn test_classifier_applies_all_rules() {
        let stats = stats();
        let classifier = Classifier::new(Some(&stats), 600.0);

        let mut p = Paragraph::new("1. First item", 12.0).with_extent(72.0, 300.0);
        classifier.classify(&mut p);
        assert_eq!(p.list_kind, ListKind::Numbered);
        assert_eq!(p.text, "First item");
        assert_eq!(p.heading_level, None);

        let mut h = Paragraph::new("1. Overview", 24.0).with_extent(72.0, 300.0);
        classifier.classify(&mut h);
        assert_eq!(h.heading_level, Some(1));
        assert_eq!(h.list_kind, ListKind::None);
        assert_eq!(h.text, "1. Overview");
    }

    #[test]
    fn test_classifier_without_headings() {
        let classifier = Classifier::new(None, 600.0);
        let mut p = Paragraph::new("Big title", 30.0).with_extent(250.0, 350.0);
        classifier.classify(&mut p);
        assert_eq!(p.heading_level, None);
        assert_eq!(p.alignment, Alignment::Center);
    }
}
