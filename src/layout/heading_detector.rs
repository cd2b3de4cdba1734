//! Heading classification for single lines.
//!
//! Two independent tracks are evaluated for every line:
//!
//! - **Font track**: the line's size is compared against per-level
//!   thresholds derived from the body font size. Space above the line,
//!   all-caps text and alignment with the common left margin lower the bar.
//! - **Pattern track**: numbering conventions and section keywords
//!   (see [`crate::layout::patterns`]).
//!
//! A keyword match is final. Any other pattern match keeps its cleaned text
//! but yields its level to the font track when the font suggests a more
//! senior level. Without a pattern match the font level stands alone.
//!
//! Documents without font metadata use [`TextOnlyClassifier`], which runs
//! the pattern track plus a short-capitalized-line guess.

use crate::config::OutlineConfig;
use crate::layout::document_analyzer::Baselines;
use crate::layout::patterns::PatternSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading tier, from most senior (H1) to least senior (H5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Section heading
    H2,
    /// Subsection heading
    H3,
    /// Fourth-level heading
    H4,
    /// Fifth-level heading
    H5,
}

impl HeadingLevel {
    /// All levels, most senior first.
    pub const ALL: [HeadingLevel; 5] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
    ];

    /// Level for a numbering depth, clamped to H1..H5.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_outliner::layout::HeadingLevel;
    ///
    /// assert_eq!(HeadingLevel::from_depth(2), HeadingLevel::H2);
    /// assert_eq!(HeadingLevel::from_depth(0), HeadingLevel::H1);
    /// assert_eq!(HeadingLevel::from_depth(9), HeadingLevel::H5);
    /// ```
    pub fn from_depth(depth: usize) -> Self {
        Self::ALL[depth.clamp(1, Self::ALL.len()) - 1]
    }

    /// Numeric rank: 1 for H1 through 5 for H5.
    pub fn rank(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
        }
    }

    /// Whether this level sits above `other` in the hierarchy.
    pub fn is_senior_to(&self, other: HeadingLevel) -> bool {
        self.rank() < other.rank()
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.rank())
    }
}

/// Per-line evidence handed to a classifier.
#[derive(Debug, Clone, Copy)]
pub struct LineFeatures<'a> {
    /// Concatenated line text
    pub text: &'a str,
    /// Largest font size in the line
    pub font_size: f32,
    /// Whether any span is bold
    pub is_bold: bool,
    /// Horizontal start of the first visible span
    pub x0: Option<f32>,
    /// Gap from the previous line's bottom on the same page (0 for the first)
    pub space_above: f32,
}

/// A positive heading decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Heading level
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
}

/// Decides whether a line is a heading, and at which level.
pub trait HeadingClassifier: Send + Sync {
    /// Classify one line; `None` means the line is not a heading.
    fn classify(&self, line: &LineFeatures<'_>) -> Option<Classification>;
}

/// Whether text is entirely uppercase and contains at least one letter.
pub fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
        && text.chars().any(char::is_uppercase)
        && !text.chars().any(char::is_lowercase)
}

/// Classifier for documents with font size and position metadata.
#[derive(Debug)]
pub struct FontAwareClassifier<'a> {
    config: &'a OutlineConfig,
    patterns: &'a PatternSet,
    baselines: Baselines,
}

impl<'a> FontAwareClassifier<'a> {
    /// Create a classifier bound to a document's baselines.
    pub fn new(config: &'a OutlineConfig, patterns: &'a PatternSet, baselines: Baselines) -> Self {
        Self {
            config,
            patterns,
            baselines,
        }
    }

    /// Most senior level whose adjusted threshold the font size reaches.
    pub fn font_level(&self, line: &LineFeatures<'_>) -> Option<HeadingLevel> {
        let body = self.baselines.body_font_size?;
        let text = line.text.trim();
        let cfg = self.config;

        let mut shared_adjustment = 0.0;
        if line.is_bold {
            shared_adjustment += cfg.bold_adjustment;
        }
        if line.space_above > body * cfg.very_large_space_multiplier {
            shared_adjustment += cfg.very_large_space_adjustment;
        } else if line.space_above > body * cfg.large_space_multiplier {
            shared_adjustment += cfg.large_space_adjustment;
        }
        if is_all_caps(text) {
            shared_adjustment += cfg.all_caps_adjustment;
        }

        let margin_aligned = match (line.x0, self.baselines.common_x0) {
            (Some(x0), Some(common)) => (x0 - common).abs() < cfg.margin_tolerance,
            _ => false,
        };

        HeadingLevel::ALL.into_iter().find(|&level| {
            let mut threshold = body + cfg.heading_deltas.for_level(level) + shared_adjustment;
            if margin_aligned && level.is_senior_to(HeadingLevel::H3) {
                threshold += cfg.margin_adjustment;
            }
            line.font_size >= threshold
        })
    }
}

impl HeadingClassifier for FontAwareClassifier<'_> {
    fn classify(&self, line: &LineFeatures<'_>) -> Option<Classification> {
        let text = line.text.trim();
        let font_level = self.font_level(line);

        match self.patterns.first_match(text) {
            Some(m) if m.kind.overrides_font() => Some(Classification {
                level: m.level,
                text: m.text,
            }),
            Some(m) => {
                let level = match font_level {
                    Some(font) if font.is_senior_to(m.level) => font,
                    _ => m.level,
                };
                Some(Classification {
                    level,
                    text: m.text,
                })
            },
            None => font_level.map(|level| Classification {
                level,
                text: text.to_string(),
            }),
        }
    }
}

/// Classifier for documents that only provide text.
#[derive(Debug)]
pub struct TextOnlyClassifier<'a> {
    config: &'a OutlineConfig,
    patterns: &'a PatternSet,
}

impl<'a> TextOnlyClassifier<'a> {
    /// Create a text-only classifier.
    pub fn new(config: &'a OutlineConfig, patterns: &'a PatternSet) -> Self {
        Self { config, patterns }
    }

    /// Short line starting with an uppercase letter and holding no period.
    fn looks_like_heading(&self, text: &str) -> bool {
        let len = text.chars().count();
        len > self.config.text_only_min_chars
            && len < self.config.text_only_max_chars
            && text.chars().next().is_some_and(char::is_uppercase)
            && !text.contains('.')
    }
}

impl HeadingClassifier for TextOnlyClassifier<'_> {
    fn classify(&self, line: &LineFeatures<'_>) -> Option<Classification> {
        let text = line.text.trim();
        if let Some(m) = self.patterns.first_match(text) {
            return Some(Classification {
                level: m.level,
                text: m.text,
            });
        }

        self.looks_like_heading(text).then(|| Classification {
            level: HeadingLevel::H1,
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: f32 = 10.0;

    fn baselines() -> Baselines {
        Baselines {
            body_font_size: Some(BODY),
            common_x0: Some(72.0),
        }
    }

    fn features(text: &str, font_size: f32) -> LineFeatures<'_> {
        LineFeatures {
            text,
            font_size,
            is_bold: false,
            x0: Some(200.0),
            space_above: 0.0,
        }
    }

    fn classify(line: &LineFeatures<'_>) -> Option<(HeadingLevel, String)> {
        let config = OutlineConfig::default();
        let patterns = PatternSet::standard();
        FontAwareClassifier::new(&config, &patterns, baselines())
            .classify(line)
            .map(|c| (c.level, c.text))
    }

    fn level(line: &LineFeatures<'_>) -> Option<HeadingLevel> {
        classify(line).map(|(level, _)| level)
    }

    #[test]
    fn test_font_thresholds() {
        assert_eq!(level(&features("Overview", BODY + 6.0)), Some(HeadingLevel::H1));
        assert_eq!(level(&features("Overview", BODY + 3.0)), Some(HeadingLevel::H2));
        assert_eq!(level(&features("Overview", BODY + 1.0)), Some(HeadingLevel::H3));
        assert_eq!(level(&features("Overview", BODY)), Some(HeadingLevel::H4));
        assert_eq!(level(&features("Overview", BODY - 2.0)), Some(HeadingLevel::H5));
        assert_eq!(level(&features("Overview", BODY - 3.0)), None);
    }

    #[test]
    fn test_space_above_lowers_thresholds() {
        let mut line = features("Overview", BODY + 2.0);
        assert_eq!(level(&line), Some(HeadingLevel::H3));
        line.space_above = BODY * 2.0;
        assert_eq!(level(&line), Some(HeadingLevel::H2));

        let mut line = features("Overview", BODY + 3.0);
        line.space_above = BODY * 2.0;
        assert_eq!(level(&line), Some(HeadingLevel::H2));
        line.space_above = BODY * 3.5;
        assert_eq!(level(&line), Some(HeadingLevel::H1));
    }

    #[test]
    fn test_all_caps_lowers_thresholds() {
        assert_eq!(level(&features("Overview", BODY + 4.0)), Some(HeadingLevel::H2));
        assert_eq!(level(&features("OVERVIEW", BODY + 4.0)), Some(HeadingLevel::H1));
    }

    #[test]
    fn test_margin_alignment_only_helps_senior_levels() {
        let mut line = features("Overview", BODY + 5.0);
        assert_eq!(level(&line), Some(HeadingLevel::H2));
        line.x0 = Some(74.0);
        assert_eq!(level(&line), Some(HeadingLevel::H1));

        let mut line = features("Overview", BODY + 0.5);
        line.x0 = Some(72.0);
        assert_eq!(level(&line), Some(HeadingLevel::H4));
    }

    #[test]
    fn test_keyword_overrides_font() {
        assert_eq!(
            classify(&features("Appendix A: Data", BODY)),
            Some((HeadingLevel::H2, "Appendix A: Data".to_string()))
        );
        assert_eq!(
            classify(&features("Appendix A: Data", BODY + 10.0)),
            Some((HeadingLevel::H2, "Appendix A: Data".to_string()))
        );
    }

    #[test]
    fn test_font_promotes_numbered_heading() {
        assert_eq!(
            classify(&features("2.1 Minor Note", BODY + 6.0)),
            Some((HeadingLevel::H1, "Minor Note".to_string()))
        );
    }

    #[test]
    fn test_font_never_demotes_numbered_heading() {
        assert_eq!(
            classify(&features("2 Background", BODY - 5.0)),
            Some((HeadingLevel::H1, "Background".to_string()))
        );
        assert_eq!(
            classify(&features("3.1.4 Details", BODY)),
            Some((HeadingLevel::H3, "Details".to_string()))
        );
    }

    #[test]
    fn test_body_text_is_not_heading() {
        assert_eq!(classify(&features("the quick brown fox jumps", BODY - 3.0)), None);
    }

    #[test]
    fn test_no_baselines_means_pattern_only() {
        let config = OutlineConfig::default();
        let patterns = PatternSet::standard();
        let classifier = FontAwareClassifier::new(&config, &patterns, Baselines::unavailable());
        assert_eq!(classifier.classify(&features("Overview", 40.0)), None);
        assert_eq!(
            classifier.classify(&features("1 Overview", 40.0)).map(|c| c.level),
            Some(HeadingLevel::H1)
        );
    }

    #[test]
    fn test_text_only_classifier() {
        let config = OutlineConfig::default();
        let patterns = PatternSet::standard();
        let classifier = TextOnlyClassifier::new(&config, &patterns);
        let classify = |text: &str| classifier.classify(&features(text, 0.0)).map(|c| (c.level, c.text));

        assert_eq!(classify("1.2.3 Scope"), Some((HeadingLevel::H3, "Scope".to_string())));
        assert_eq!(classify("1 Introduction"), Some((HeadingLevel::H1, "Introduction".to_string())));
        assert_eq!(classify("Project Goals"), Some((HeadingLevel::H1, "Project Goals".to_string())));
        assert_eq!(classify("Short"), None);
        assert_eq!(classify("This sentence ends with a period."), None);
        assert_eq!(classify("lowercase start line"), None);
    }

    #[test]
    fn test_is_all_caps() {
        assert!(is_all_caps("INTRODUCTION"));
        assert!(is_all_caps("PART 2: RESULTS"));
        assert!(!is_all_caps("Introduction"));
        assert!(!is_all_caps("2024"));
    }

    #[test]
    fn test_level_ordering_and_display() {
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
        assert!(HeadingLevel::H2.is_senior_to(HeadingLevel::H4));
        assert!(!HeadingLevel::H3.is_senior_to(HeadingLevel::H3));
        assert_eq!(HeadingLevel::H4.to_string(), "H4");
        assert_eq!(serde_json::to_string(&HeadingLevel::H2).unwrap(), "\"H2\"");
    }
}
