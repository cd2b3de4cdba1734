//! Document title detection.
//!
//! The title is read from the first page: the largest lines, plus any lines
//! of nearly the same size stacked directly below them, form the title block.
//! When that yields nothing the first reasonably long line is used, and as a
//! last resort the title is derived from the source file name.

use crate::config::OutlineConfig;
use crate::document::LayoutSource;
use crate::extractors::boilerplate::ExcludedTextSet;
use crate::layout::TextBlock;
use crate::utils::safe_float_cmp;
use std::path::Path;

/// Where a detected title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// Stacked large-font lines on the first page
    FontBlock,
    /// First first-page line of acceptable length
    LengthFallback,
    /// Derived from the source file name
    FileName,
}

/// A detected document title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTitle {
    /// Title text
    pub text: String,
    /// Detection path that produced it
    pub source: TitleSource,
}

#[derive(Debug, Clone)]
struct TitleCandidate {
    text: String,
    font_size: f32,
    y0: f32,
    y1: f32,
}

/// Detect the title of `doc`.
///
/// `source_name` is the document's file name, used for the final fallback.
pub fn detect_title<S: LayoutSource + ?Sized>(
    doc: &S,
    excluded: &ExcludedTextSet,
    config: &OutlineConfig,
    source_name: &str,
) -> DetectedTitle {
    let with_fonts = doc.has_font_metadata();
    let candidates = first_page_candidates(doc, with_fonts);

    let detected = candidates
        .first()
        .filter(|top| with_fonts && top.font_size > 0.0)
        .and_then(|_| title_block(&candidates, excluded, config))
        .map(|text| DetectedTitle {
            text,
            source: TitleSource::FontBlock,
        })
        .or_else(|| {
            length_fallback(&candidates, excluded, config).map(|text| DetectedTitle {
                text,
                source: TitleSource::LengthFallback,
            })
        })
        .unwrap_or_else(|| DetectedTitle {
            text: fallback_title(source_name),
            source: TitleSource::FileName,
        });

    log::debug!("Title {:?} detected via {:?}", detected.text, detected.source);
    detected
}

/// First-page lines, largest font first, then top to bottom.
fn first_page_candidates<S: LayoutSource + ?Sized>(
    doc: &S,
    with_fonts: bool,
) -> Vec<TitleCandidate> {
    let Some(page) = doc.page(0) else {
        return Vec::new();
    };

    let block_size = |block: &TextBlock| {
        if with_fonts && block.has_text() {
            block.max_font_size()
        } else {
            0.0
        }
    };
    let mut blocks: Vec<&TextBlock> = page.blocks.iter().collect();
    blocks.sort_by(|a, b| {
        safe_float_cmp(block_size(b), block_size(a))
            .then_with(|| safe_float_cmp(a.bbox.top(), b.bbox.top()))
    });

    let mut candidates: Vec<TitleCandidate> = blocks
        .iter()
        .flat_map(|block| block.lines.iter())
        .filter_map(|line| {
            let text = line.text();
            if text.is_empty() {
                return None;
            }
            Some(TitleCandidate {
                text,
                font_size: if with_fonts { line.max_font_size() } else { 0.0 },
                y0: line.bbox.top(),
                y1: line.bbox.bottom(),
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        safe_float_cmp(b.font_size, a.font_size).then_with(|| safe_float_cmp(a.y0, b.y0))
    });
    candidates
}

/// Join the stacked lines of the largest-font block.
fn title_block(
    candidates: &[TitleCandidate],
    excluded: &ExcludedTextSet,
    config: &OutlineConfig,
) -> Option<String> {
    let threshold = candidates.first()?.font_size - config.title_font_slack;
    let mut parts: Vec<&str> = Vec::new();
    let mut prev_bottom: Option<f32> = None;

    for candidate in candidates {
        if excluded.contains(&candidate.text) {
            continue;
        }

        let max_gap = candidate.font_size * config.title_gap_factor;
        let adjacent = prev_bottom.map_or(true, |bottom| candidate.y0 - bottom < max_gap);
        if candidate.font_size >= threshold && adjacent {
            parts.push(&candidate.text);
            prev_bottom = Some(candidate.y1);
        } else if !parts.is_empty() {
            break;
        }
    }

    let title = parts.join(" ");
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// First non-excluded line whose length is within the configured bounds.
fn length_fallback(
    candidates: &[TitleCandidate],
    excluded: &ExcludedTextSet,
    config: &OutlineConfig,
) -> Option<String> {
    candidates
        .iter()
        .filter(|c| !excluded.contains(&c.text))
        .find(|c| {
            let len = c.text.chars().count();
            len > config.title_min_chars && len < config.title_max_chars
        })
        .map(|c| c.text.clone())
}

/// Title derived from a file name: stem, underscores to spaces, title case.
///
/// # Examples
///
/// ```
/// use pdf_outliner::extractors::title::fallback_title;
///
/// assert_eq!(fallback_title("reports/annual_REPORT_2023.json"), "Annual Report 2023");
/// ```
pub fn fallback_title(source_name: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    title_case(&stem.replace('_', " "))
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && !prev_cased {
            out.extend(c.to_uppercase());
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}
