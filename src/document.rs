//! Layout document model and providers.
//!
//! The outline engine never parses PDF content itself. It reads a
//! [`LayoutSource`]: an ordered list of pages with styled text lines. Two
//! providers ship with the crate:
//!
//! - a layout JSON dump (`{"pages": [{"blocks": [...]}]}`) as written by
//!   "dict"-style text extraction, with font size, flags and boxes per span
//! - plain text, where pages are separated by form feeds and no font
//!   metadata exists (the engine switches to pattern-only detection)

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::layout::{Page, TextBlock, TextLine, TextSpan};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

/// Nominal line height used when laying out plain text.
const PLAIN_LINE_HEIGHT: f32 = 12.0;

/// Nominal character width used when laying out plain text.
const PLAIN_CHAR_WIDTH: f32 = 6.0;

/// Read-only access to a paged text layout.
pub trait LayoutSource {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Page at a 0-based index.
    fn page(&self, index: usize) -> Option<&Page>;

    /// Whether spans carry font size, bold and position information.
    fn has_font_metadata(&self) -> bool;
}

/// An in-memory layout document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(skip)]
    text_only: bool,
}

impl LayoutDocument {
    /// Create a document from pages.
    ///
    /// Font metadata is considered available when every span reports a size.
    pub fn new(pages: Vec<Page>) -> Self {
        let mut doc = Self {
            pages,
            text_only: false,
        };
        doc.text_only = !doc.all_spans_sized();
        doc
    }

    /// Create a document whose font metadata must be ignored.
    pub fn text_only(pages: Vec<Page>) -> Self {
        Self {
            pages,
            text_only: true,
        }
    }

    fn all_spans_sized(&self) -> bool {
        self.pages
            .iter()
            .flat_map(Page::lines)
            .flat_map(|line| line.spans.iter())
            .all(TextSpan::has_font_metadata)
    }

    /// Parse a layout JSON dump.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_outliner::document::{LayoutDocument, LayoutSource};
    ///
    /// let json = r#"{"pages": [{"blocks": [{"bbox": [72, 70, 300, 90], "lines": [
    ///     {"bbox": [72, 70, 300, 90], "spans": [
    ///         {"text": "Annual Report", "size": 20.0, "flags": 16, "bbox": [72, 70, 300, 90]}
    ///     ]}
    /// ]}]}]}"#;
    /// let doc = LayoutDocument::from_json_str(json)?;
    /// assert_eq!(doc.page_count(), 1);
    /// assert!(doc.has_font_metadata());
    /// # Ok::<(), pdf_outliner::Error>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let parsed: LayoutDocument = serde_json::from_str(json)?;
        let doc = Self::new(parsed.pages);
        doc.validate()?;
        Ok(doc)
    }

    /// Reject font sizes no provider can produce.
    fn validate(&self) -> Result<()> {
        for (index, page) in self.pages.iter().enumerate() {
            let bad_size = page
                .lines()
                .flat_map(|line| line.spans.iter())
                .filter_map(|span| span.size)
                .find(|size| !size.is_finite() || *size < 0.0);
            if let Some(size) = bad_size {
                return Err(Error::InvalidLayout(format!(
                    "page {} has a span with font size {}",
                    index + 1,
                    size
                )));
            }
        }
        Ok(())
    }

    /// Lay out plain text without font metadata.
    ///
    /// Form feeds separate pages and blank lines separate blocks. A trailing
    /// form feed does not open an extra page.
    pub fn from_plain_text(text: &str) -> Self {
        let text = text.strip_suffix('\u{c}').unwrap_or(text);
        let pages = text.split('\u{c}').map(plain_text_page).collect();
        Self::text_only(pages)
    }

    /// Open a layout file, choosing the provider by extension.
    ///
    /// `.json` files are layout dumps, `.txt` files plain text.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let open_error = |reason: String| Error::DocumentOpen {
            path: path.to_path_buf(),
            reason,
        };

        match extension.as_str() {
            "json" => {
                let data = std::fs::read_to_string(path).map_err(|e| open_error(e.to_string()))?;
                Self::from_json_str(&data).map_err(|e| open_error(e.to_string()))
            },
            "txt" => {
                let data = std::fs::read_to_string(path).map_err(|e| open_error(e.to_string()))?;
                Ok(Self::from_plain_text(&data))
            },
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Pages in document order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Copy of the pages in `range` (0-based, end exclusive) as a new document.
    pub fn select(&self, range: Range<usize>) -> Result<Self> {
        if range.start > range.end || range.end > self.pages.len() {
            return Err(Error::InvalidPageRange {
                start: range.start,
                end: range.end,
                page_count: self.pages.len(),
            });
        }
        Ok(Self {
            pages: self.pages[range].to_vec(),
            text_only: self.text_only,
        })
    }
}

impl LayoutSource for LayoutDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    fn has_font_metadata(&self) -> bool {
        !self.text_only
    }
}

fn plain_text_page(text: &str) -> Page {
    let mut blocks = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for (row, raw) in text.lines().enumerate() {
        let content = raw.trim_end();
        if content.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(plain_text_block(std::mem::take(&mut current)));
            }
            continue;
        }

        let y0 = row as f32 * PLAIN_LINE_HEIGHT;
        let bbox = Rect::from_points(
            0.0,
            y0,
            content.chars().count() as f32 * PLAIN_CHAR_WIDTH,
            y0 + PLAIN_LINE_HEIGHT,
        );
        current.push(TextLine::new(bbox, vec![TextSpan::plain(content, bbox)]));
    }

    if !current.is_empty() {
        blocks.push(plain_text_block(current));
    }
    Page::new(blocks)
}

fn plain_text_block(lines: Vec<TextLine>) -> TextBlock {
    let bbox = lines
        .iter()
        .map(|l| l.bbox)
        .reduce(|a, b| a.union(&b))
        .unwrap_or_default();
    TextBlock::new(bbox, lines)
}
