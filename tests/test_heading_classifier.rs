//! Integration tests for per-line heading classification.
//!
//! Exercises the font and pattern tracks through the public classifier API
//! with a fixed body font size of 10pt and a common left margin of 72pt.

use pdf_outliner::config::{HeadingDeltas, OutlineConfig};
use pdf_outliner::layout::{
    Baselines, FontAwareClassifier, HeadingClassifier, HeadingLevel, LineFeatures, PatternSet,
    TextOnlyClassifier,
};
use proptest::prelude::*;

const BODY: f32 = 10.0;

// ============================================================================
// Helper Functions
// ============================================================================

fn baselines(body: f32) -> Baselines {
    Baselines {
        body_font_size: Some(body),
        common_x0: Some(72.0),
    }
}

/// A line away from the common margin, with no space above.
fn mock_line(text: &str, font_size: f32) -> LineFeatures<'_> {
    LineFeatures {
        text,
        font_size,
        is_bold: false,
        x0: Some(150.0),
        space_above: 0.0,
    }
}

fn classify_with(
    config: &OutlineConfig,
    body: f32,
    line: &LineFeatures<'_>,
) -> Option<(HeadingLevel, String)> {
    let patterns = PatternSet::standard();
    FontAwareClassifier::new(config, &patterns, baselines(body))
        .classify(line)
        .map(|c| (c.level, c.text))
}

fn classify(line: &LineFeatures<'_>) -> Option<(HeadingLevel, String)> {
    classify_with(&OutlineConfig::default(), BODY, line)
}

fn heading(level: HeadingLevel, text: &str) -> Option<(HeadingLevel, String)> {
    Some((level, text.to_string()))
}

// ============================================================================
// Font track
// ============================================================================

#[test]
fn test_font_threshold_ladder() {
    let cases = [
        (BODY + 6.0, Some(HeadingLevel::H1)),
        (BODY + 3.0, Some(HeadingLevel::H2)),
        (BODY + 1.0, Some(HeadingLevel::H3)),
        (BODY, Some(HeadingLevel::H4)),
        (BODY - 2.0, Some(HeadingLevel::H5)),
        (BODY - 3.0, None),
    ];
    for (size, expected) in cases {
        let level = classify(&mock_line("Results overview", size)).map(|(level, _)| level);
        assert_eq!(level, expected, "font size {}", size);
    }
}

#[test]
fn test_custom_deltas() {
    let config = OutlineConfig::default().with_heading_deltas(HeadingDeltas {
        h1: 10.0,
        h2: 8.0,
        h3: 6.0,
        h4: 4.0,
        h5: 2.0,
    });
    let line = mock_line("Results overview", BODY + 6.0);
    assert_eq!(classify_with(&config, BODY, &line), heading(HeadingLevel::H3, "Results overview"));
    assert_eq!(classify_with(&config, BODY, &mock_line("Results overview", BODY)), None);
}

#[test]
fn test_bold_adjustment_is_inert_by_default() {
    let mut line = mock_line("Results overview", BODY + 2.0);
    let plain = classify(&line);
    line.is_bold = true;
    assert_eq!(classify(&line), plain);

    let config = OutlineConfig::default().with_bold_adjustment(-1.0);
    assert_eq!(
        classify_with(&config, BODY, &line),
        heading(HeadingLevel::H2, "Results overview")
    );
}

#[test]
fn test_large_space_above_promotes() {
    let mut line = mock_line("Results overview", BODY + 5.0);
    assert_eq!(classify(&line), heading(HeadingLevel::H2, "Results overview"));

    line.space_above = BODY * 1.5;
    assert_eq!(classify(&line), heading(HeadingLevel::H2, "Results overview"));

    line.space_above = BODY * 1.6;
    assert_eq!(classify(&line), heading(HeadingLevel::H1, "Results overview"));
}

#[test]
fn test_margin_aligned_senior_levels() {
    let mut line = mock_line("Results overview", BODY + 2.0);
    assert_eq!(classify(&line), heading(HeadingLevel::H3, "Results overview"));

    line.x0 = Some(76.9);
    assert_eq!(classify(&line), heading(HeadingLevel::H2, "Results overview"));
}

#[test]
fn test_no_body_size_disables_font_track() {
    let config = OutlineConfig::default();
    let patterns = PatternSet::standard();
    let classifier = FontAwareClassifier::new(&config, &patterns, Baselines::unavailable());
    assert!(classifier.classify(&mock_line("Results overview", 30.0)).is_none());
}

// ============================================================================
// Pattern track
// ============================================================================

#[test]
fn test_numbering_depth_sets_level() {
    let small = BODY - 4.0;
    assert_eq!(classify(&mock_line("3 Methods", small)), heading(HeadingLevel::H1, "Methods"));
    assert_eq!(classify(&mock_line("3.2 Sampling", small)), heading(HeadingLevel::H2, "Sampling"));
    assert_eq!(
        classify(&mock_line("3.2.1 Randomization", small)),
        heading(HeadingLevel::H3, "Randomization")
    );
    assert_eq!(
        classify(&mock_line("3.2.1.4 Seeds", small)),
        heading(HeadingLevel::H4, "Seeds")
    );
}

#[test]
fn test_parenthesized_marker_is_h3() {
    assert_eq!(
        classify(&mock_line("(b) Secondary outcomes", BODY - 4.0)),
        heading(HeadingLevel::H3, "Secondary outcomes")
    );
}

#[test]
fn test_japanese_markers_keep_full_line() {
    let small = BODY - 4.0;
    assert_eq!(classify(&mock_line("第1章 総則", small)), heading(HeadingLevel::H1, "第1章 総則"));
    assert_eq!(classify(&mock_line("第二節 定義", small)), heading(HeadingLevel::H2, "第二節 定義"));
    assert_eq!(classify(&mock_line("第3項 範囲", small)), heading(HeadingLevel::H3, "第3項 範囲"));
    assert_eq!(classify(&mock_line("第4目 細則", small)), heading(HeadingLevel::H4, "第4目 細則"));
}

#[test]
fn test_keyword_always_h2() {
    for size in [BODY - 4.0, BODY, BODY + 12.0] {
        assert_eq!(
            classify(&mock_line("Appendix A: Data", size)),
            heading(HeadingLevel::H2, "Appendix A: Data")
        );
    }
    assert_eq!(classify(&mock_line("Appendix", BODY - 4.0)), heading(HeadingLevel::H2, "Appendix"));
    assert_eq!(
        classify(&mock_line("5. Conclusions and outlook", BODY - 4.0)),
        heading(HeadingLevel::H2, "Conclusions")
    );
}

#[test]
fn test_font_overrides_numbering_when_larger() {
    assert_eq!(
        classify(&mock_line("2.1 Minor Note", BODY + 6.0)),
        heading(HeadingLevel::H1, "Minor Note")
    );
    // A font level junior to the numbering never demotes it.
    assert_eq!(
        classify(&mock_line("2.1 Minor Note", BODY)),
        heading(HeadingLevel::H2, "Minor Note")
    );
}

// ============================================================================
// Text-only mode
// ============================================================================

#[test]
fn test_text_only_mode() {
    let config = OutlineConfig::default();
    let patterns = PatternSet::standard();
    let classifier = TextOnlyClassifier::new(&config, &patterns);
    let classify = |text: &str| classifier.classify(&mock_line(text, 0.0)).map(|c| (c.level, c.text));

    assert_eq!(classify("2.4 Limitations"), heading(HeadingLevel::H2, "Limitations"));
    assert_eq!(classify("Appendix B: Forms"), heading(HeadingLevel::H2, "Appendix B: Forms"));
    assert_eq!(classify("Related Work"), heading(HeadingLevel::H1, "Related Work"));
    assert_eq!(classify("Tiny"), None);
    assert_eq!(classify("We report results in Section 4."), None);
    assert_eq!(
        classify("A very long capitalized line that keeps going well past fifty characters"),
        None
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_larger_font_never_less_senior(
        body in 6.0f32..20.0,
        a in 0.0f32..40.0,
        b in 0.0f32..40.0,
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let config = OutlineConfig::default();
        let level = |size| {
            classify_with(&config, body, &mock_line("Results overview", size)).map(|(level, _)| level)
        };

        match (level(small), level(large)) {
            (Some(s), Some(l)) => prop_assert!(l <= s),
            (Some(_), None) => prop_assert!(false, "larger font lost heading status"),
            _ => {},
        }
    }

    #[test]
    fn prop_keyword_level_independent_of_font(size in 0.0f32..60.0, space in 0.0f32..100.0) {
        let mut line = mock_line("Appendix C: Glossary", size);
        line.space_above = space;
        prop_assert_eq!(classify(&line), heading(HeadingLevel::H2, "Appendix C: Glossary"));
    }
}
