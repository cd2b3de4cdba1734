//! Text layout model consumed by the outline engine.
//!
//! A page is an ordered list of blocks, a block an ordered list of lines, and
//! a line an ordered list of styled spans. The shapes mirror the "dict" text
//! layout emitted by common PDF extractors, so a layout dump deserializes
//! directly into these types.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Span flag bit marking a bold font.
pub const BOLD_FLAG: u32 = 1 << 4;

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Font size in points, `None` when the provider cannot report it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    /// Provider style flags (bit 4 = bold)
    #[serde(default)]
    pub flags: u32,
    /// Explicit bold flag; takes precedence over `flags`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Bounding box of the span
    #[serde(default)]
    pub bbox: Rect,
}

impl TextSpan {
    /// Create a span with known font metadata.
    pub fn new(text: impl Into<String>, size: f32, bold: bool, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            size: Some(size),
            flags: if bold { BOLD_FLAG } else { 0 },
            bold: Some(bold),
            bbox,
        }
    }

    /// Create a span carrying only text (no font metadata).
    pub fn plain(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            size: None,
            flags: 0,
            bold: None,
            bbox,
        }
    }

    /// Font size, 0.0 when unknown.
    pub fn font_size(&self) -> f32 {
        self.size.unwrap_or(0.0)
    }

    /// Whether the span is set in a bold face.
    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(self.flags & BOLD_FLAG != 0)
    }

    /// Whether the provider reported a font size for this span.
    pub fn has_font_metadata(&self) -> bool {
        self.size.is_some()
    }
}

/// One visual line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Bounding box of the line
    pub bbox: Rect,
    /// Spans in reading order
    #[serde(default)]
    pub spans: Vec<TextSpan>,
}

impl TextLine {
    /// Create a line from its spans and bounding box.
    pub fn new(bbox: Rect, spans: Vec<TextSpan>) -> Self {
        Self { bbox, spans }
    }

    /// Spans whose trimmed text is non-empty.
    fn visible_spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.spans.iter().filter(|s| !s.text.trim().is_empty())
    }

    /// Concatenated line text: trimmed span texts joined by single spaces.
    pub fn text(&self) -> String {
        self.visible_spans()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Largest font size among the visible spans (0.0 if none).
    pub fn max_font_size(&self) -> f32 {
        self.visible_spans().map(TextSpan::font_size).fold(0.0, f32::max)
    }

    /// Whether any visible span is bold.
    pub fn is_bold(&self) -> bool {
        self.visible_spans().any(TextSpan::is_bold)
    }

    /// Horizontal start of the first visible span.
    pub fn x0(&self) -> Option<f32> {
        self.visible_spans().next().map(|s| s.bbox.x0)
    }

    /// Horizontal start of the first span, visible or not.
    pub fn first_span_x0(&self) -> Option<f32> {
        self.spans.first().map(|s| s.bbox.x0)
    }
}

/// A block of lines. Blocks without lines carry non-text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Bounding box of the block
    pub bbox: Rect,
    /// Lines in reading order
    #[serde(default)]
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Create a block from its lines and bounding box.
    pub fn new(bbox: Rect, lines: Vec<TextLine>) -> Self {
        Self { bbox, lines }
    }

    /// Whether the block holds text lines.
    pub fn has_text(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Largest span font size in the block (0.0 if none).
    pub fn max_font_size(&self) -> f32 {
        self.lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(TextSpan::font_size)
            .fold(0.0, f32::max)
    }
}

/// A page: blocks in the order delivered by the provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    /// Blocks on the page
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}

impl Page {
    /// Create a page from its blocks.
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// All text lines on the page in block order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }
}
