//! Configuration for outline extraction.
//!
//! All heuristics of the heading engine are driven by the constants below.
//! The defaults reproduce the reference tuning; a JSON file with any subset
//! of the fields can override them (missing fields keep their default).

use crate::layout::HeadingLevel;
use serde::{Deserialize, Serialize};

/// Font-size deltas relative to the body font size, one per heading level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingDeltas {
    /// H1 delta (points above body size)
    pub h1: f32,
    /// H2 delta
    pub h2: f32,
    /// H3 delta
    pub h3: f32,
    /// H4 delta
    pub h4: f32,
    /// H5 delta (negative: slightly smaller than body text)
    pub h5: f32,
}

impl Default for HeadingDeltas {
    fn default() -> Self {
        Self {
            h1: 6.0,
            h2: 3.0,
            h3: 1.0,
            h4: 0.0,
            h5: -2.0,
        }
    }
}

impl HeadingDeltas {
    /// Delta for the given level.
    pub fn for_level(&self, level: HeadingLevel) -> f32 {
        match level {
            HeadingLevel::H1 => self.h1,
            HeadingLevel::H2 => self.h2,
            HeadingLevel::H3 => self.h3,
            HeadingLevel::H4 => self.h4,
            HeadingLevel::H5 => self.h5,
        }
    }
}

/// Outline extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Per-level font-size deltas over the body font size.
    pub heading_deltas: HeadingDeltas,

    /// Threshold adjustment applied to bold lines.
    ///
    /// Zero keeps boldness out of the decision.
    pub bold_adjustment: f32,

    /// Space above (in body font sizes) that counts as a large gap.
    pub large_space_multiplier: f32,

    /// Threshold adjustment for a large gap above the line.
    pub large_space_adjustment: f32,

    /// Space above (in body font sizes) that counts as a very large gap.
    pub very_large_space_multiplier: f32,

    /// Threshold adjustment for a very large gap above the line.
    pub very_large_space_adjustment: f32,

    /// Threshold adjustment for all-caps lines.
    pub all_caps_adjustment: f32,

    /// Maximum distance from the common left margin to count as aligned.
    pub margin_tolerance: f32,

    /// Threshold adjustment for margin-aligned H1/H2 candidates.
    pub margin_adjustment: f32,

    /// Number of leading pages sampled for running headers/footers.
    pub boilerplate_sample_pages: usize,

    /// Number of blocks at the top and at the bottom of a page inspected.
    pub boilerplate_edge_blocks: usize,

    /// Lines must be strictly longer than this many chars to be tallied.
    pub boilerplate_min_chars: usize,

    /// Fraction of sampled pages a line must appear on to be excluded.
    pub boilerplate_ratio: f32,

    /// Minimum number of sampled pages a line must recur on.
    pub boilerplate_min_recurrence: usize,

    /// Title lines may be this many points smaller than the largest line.
    pub title_font_slack: f32,

    /// Maximum gap between title lines, in multiples of their font size.
    pub title_gap_factor: f32,

    /// Fallback titles must be strictly longer than this many chars.
    pub title_min_chars: usize,

    /// Fallback titles must be strictly shorter than this many chars.
    pub title_max_chars: usize,

    /// Text-only heading guess: minimum length (exclusive).
    pub text_only_min_chars: usize,

    /// Text-only heading guess: maximum length (exclusive).
    pub text_only_max_chars: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineConfig {
    /// Create a configuration with the reference tuning.
    pub fn new() -> Self {
        Self {
            heading_deltas: HeadingDeltas::default(),
            bold_adjustment: 0.0,
            large_space_multiplier: 1.5,
            large_space_adjustment: -1.0,
            very_large_space_multiplier: 3.0,
            very_large_space_adjustment: -3.0,
            all_caps_adjustment: -2.0,
            margin_tolerance: 5.0,
            margin_adjustment: -1.0,
            boilerplate_sample_pages: 10,
            boilerplate_edge_blocks: 2,
            boilerplate_min_chars: 5,
            boilerplate_ratio: 0.5,
            boilerplate_min_recurrence: 2,
            title_font_slack: 2.0,
            title_gap_factor: 2.0,
            title_min_chars: 10,
            title_max_chars: 200,
            text_only_min_chars: 5,
            text_only_max_chars: 50,
        }
    }

    /// Set the per-level font-size deltas.
    pub fn with_heading_deltas(mut self, deltas: HeadingDeltas) -> Self {
        self.heading_deltas = deltas;
        self
    }

    /// Set the bold threshold adjustment.
    pub fn with_bold_adjustment(mut self, adjustment: f32) -> Self {
        self.bold_adjustment = adjustment;
        self
    }

    /// Set how many leading pages are sampled for headers/footers.
    pub fn with_boilerplate_sample_pages(mut self, pages: usize) -> Self {
        self.boilerplate_sample_pages = pages;
        self
    }

    /// Set the fraction of sampled pages that marks a line as boilerplate.
    pub fn with_boilerplate_ratio(mut self, ratio: f32) -> Self {
        self.boilerplate_ratio = ratio;
        self
    }

    /// Set the title font slack in points.
    pub fn with_title_font_slack(mut self, slack: f32) -> Self {
        self.title_font_slack = slack;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
