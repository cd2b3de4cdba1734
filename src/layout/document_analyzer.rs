//! Document-wide typographic baselines.
//!
//! Heading decisions are relative: a line is "large" compared to the body
//! text of its own document, and "aligned" compared to that document's usual
//! left margin. Both references are taken as the most frequent value over
//! the whole document, after rounding to one decimal.

use crate::document::LayoutSource;
use indexmap::IndexMap;
use serde::Serialize;

/// Body font size and common left margin of a document.
///
/// Both are `None` when the provider has no font metadata or the document
/// holds no text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Baselines {
    /// Most frequent span font size
    pub body_font_size: Option<f32>,
    /// Most frequent line start position
    pub common_x0: Option<f32>,
}

/// Frequency tally over values rounded to one decimal.
///
/// Keys are stored in tenths so they hash exactly; iteration follows first
/// insertion, which makes ties resolve to the value seen first.
#[derive(Debug, Default)]
struct Tally {
    counts: IndexMap<i64, usize>,
}

impl Tally {
    fn add(&mut self, value: f32) {
        if value.is_finite() {
            *self.counts.entry((value * 10.0).round() as i64).or_insert(0) += 1;
        }
    }

    fn mode(&self) -> Option<f32> {
        let mut best: Option<(i64, usize)> = None;
        for (&key, &count) in &self.counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((key, count));
            }
        }
        best.map(|(key, _)| key as f32 / 10.0)
    }
}

impl Baselines {
    /// Baselines for a document without usable font metadata.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Whether a body font size is known.
    pub fn is_available(&self) -> bool {
        self.body_font_size.is_some()
    }

    /// Collect baselines over every page of the document.
    pub fn analyze<S: LayoutSource + ?Sized>(doc: &S) -> Self {
        if !doc.has_font_metadata() {
            log::debug!("No font metadata available, skipping baseline analysis");
            return Self::unavailable();
        }

        let mut font_sizes = Tally::default();
        let mut line_starts = Tally::default();

        for page in (0..doc.page_count()).filter_map(|i| doc.page(i)) {
            for line in page.lines() {
                for span in &line.spans {
                    font_sizes.add(span.font_size());
                }
                if let Some(x0) = line.first_span_x0() {
                    line_starts.add(x0);
                }
            }
        }

        let baselines = Self {
            body_font_size: font_sizes.mode(),
            common_x0: line_starts.mode(),
        };
        log::debug!(
            "Baselines: body font size {:?}, common x0 {:?}",
            baselines.body_font_size,
            baselines.common_x0
        );
        baselines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LayoutDocument;
    use crate::geometry::Rect;
    use crate::layout::{Page, TextBlock, TextLine, TextSpan};

    fn line(x0: f32, size: f32) -> TextLine {
        let bbox = Rect::from_points(x0, 0.0, x0 + 100.0, size);
        TextLine::new(bbox, vec![TextSpan::new("text", size, false, bbox)])
    }

    fn doc(lines: Vec<TextLine>) -> LayoutDocument {
        let block = TextBlock::new(Rect::default(), lines);
        LayoutDocument::new(vec![Page::new(vec![block])])
    }

    #[test]
    fn test_mode_of_font_sizes_and_margins() {
        let baselines = Baselines::analyze(&doc(vec![
            line(72.0, 18.0),
            line(72.04, 11.02),
            line(90.0, 10.98),
            line(72.0, 11.0),
        ]));
        assert_eq!(baselines.body_font_size, Some(11.0));
        assert_eq!(baselines.common_x0, Some(72.0));
    }

    #[test]
    fn test_ties_resolve_to_first_seen() {
        let baselines =
            Baselines::analyze(&doc(vec![line(50.0, 14.0), line(72.0, 10.0)]));
        assert_eq!(baselines.body_font_size, Some(14.0));
        assert_eq!(baselines.common_x0, Some(50.0));
    }

    #[test]
    fn test_empty_document() {
        let baselines = Baselines::analyze(&LayoutDocument::new(vec![Page::default()]));
        assert!(!baselines.is_available());
        assert_eq!(baselines.common_x0, None);
    }

    #[test]
    fn test_text_only_document_has_no_baselines() {
        let doc = LayoutDocument::from_plain_text("Heading\nBody text line");
        assert_eq!(Baselines::analyze(&doc), Baselines::unavailable());
    }
}
