//! Outline inference.
//!
//! [`OutlineExtractor`] runs the full pipeline over a layout document:
//!
//! 1. document baselines ([`Baselines::analyze`])
//! 2. recurring header/footer detection ([`ExcludedTextSet::detect`])
//! 3. title detection on the first page ([`detect_title`])
//! 4. one classification pass over every line ([`OutlineAggregator`])
//!
//! Each call owns its own mutable state, so a single extractor can serve
//! concurrent calls on different documents or page ranges.

use crate::config::OutlineConfig;
use crate::document::{LayoutDocument, LayoutSource};
use crate::error::Result;
use crate::extractors::boilerplate::ExcludedTextSet;
use crate::extractors::title::{detect_title, fallback_title};
use crate::geometry::Rect;
use crate::layout::{
    Baselines, FontAwareClassifier, HeadingClassifier, HeadingLevel, LineFeatures, Page,
    PatternSet, TextOnlyClassifier,
};
use crate::utils::safe_float_cmp;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;

/// One entry of the inferred outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Heading level ("H1".."H5")
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
    /// Page number (1-based)
    pub page: usize,
}

/// Title plus ordered headings of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title
    pub title: String,
    /// Headings, ordered by page, then level, then vertical position
    pub outline: Vec<OutlineItem>,
}

impl DocumentOutline {
    /// Result for a document that could not be read: a title derived from
    /// the file name and no headings.
    pub fn fallback(source_name: &str) -> Self {
        Self {
            title: fallback_title(source_name),
            outline: Vec::new(),
        }
    }

    /// Pretty-printed JSON, non-ASCII text kept verbatim.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A heading found during the scan, before final ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Heading level
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
    /// Page number (1-based)
    pub page: usize,
    /// Top of the line, for ordering within a page
    pub y0: f32,
}

/// Collects headings over one scan of a document.
///
/// Heading texts are deduplicated document-wide: a text is only recorded at
/// its first occurrence in scan order, whatever its level.
pub struct OutlineAggregator<'a> {
    classifier: &'a dyn HeadingClassifier,
    title: &'a str,
    excluded: &'a ExcludedTextSet,
    seen: HashSet<String>,
    candidates: Vec<HeadingCandidate>,
}

impl<'a> OutlineAggregator<'a> {
    /// Create an aggregator.
    pub fn new(
        classifier: &'a dyn HeadingClassifier,
        title: &'a str,
        excluded: &'a ExcludedTextSet,
    ) -> Self {
        Self {
            classifier,
            title,
            excluded,
            seen: HashSet::new(),
            candidates: Vec::new(),
        }
    }

    /// Classify every line of a page (0-based `page_index`).
    pub fn scan_page(&mut self, page_index: usize, page: &Page) {
        let before = self.candidates.len();
        let mut prev_bbox: Option<Rect> = None;

        for line in page.lines() {
            let text = line.text();
            let space_above = prev_bbox.map_or(0.0, |above| line.bbox.gap_below(&above));
            prev_bbox = Some(line.bbox);

            if text.is_empty() || text == self.title || self.excluded.contains(&text) {
                continue;
            }

            let features = LineFeatures {
                text: &text,
                font_size: line.max_font_size(),
                is_bold: line.is_bold(),
                x0: line.x0(),
                space_above,
            };
            let Some(heading) = self.classifier.classify(&features) else {
                continue;
            };
            if heading.text.is_empty() || !self.seen.insert(heading.text.clone()) {
                continue;
            }

            self.candidates.push(HeadingCandidate {
                level: heading.level,
                text: heading.text,
                page: page_index + 1,
                y0: line.bbox.top(),
            });
        }

        log::debug!(
            "Page {}: {} headings",
            page_index + 1,
            self.candidates.len() - before
        );
    }

    /// Candidates recorded so far, in scan order.
    pub fn candidates(&self) -> &[HeadingCandidate] {
        &self.candidates
    }

    /// Order candidates by page, then level, then vertical position.
    ///
    /// Within a page all H1 entries come before H2 entries and so on, even
    /// when the levels interleave on the page.
    pub fn finish(mut self) -> Vec<OutlineItem> {
        self.candidates.sort_by(|a, b| {
            a.page
                .cmp(&b.page)
                .then(a.level.cmp(&b.level))
                .then_with(|| safe_float_cmp(a.y0, b.y0))
        });
        self.candidates
            .into_iter()
            .map(|c| OutlineItem {
                level: c.level,
                text: c.text,
                page: c.page,
            })
            .collect()
    }
}

/// Outline extraction engine.
///
/// # Examples
///
/// ```
/// use pdf_outliner::document::LayoutDocument;
/// use pdf_outliner::OutlineExtractor;
///
/// let doc = LayoutDocument::from_plain_text(
///     "Project notes for the team\n1 Introduction\nSome text.\n\u{c}2 Method\n",
/// );
/// let outline = OutlineExtractor::new().extract(&doc, "notes.txt");
/// assert_eq!(outline.title, "Project notes for the team");
/// assert_eq!(outline.outline.len(), 2);
/// assert_eq!(outline.outline[0].text, "Introduction");
/// assert_eq!(outline.outline[1].page, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    config: OutlineConfig,
    patterns: PatternSet,
}

impl OutlineExtractor {
    /// Create an extractor with the default configuration and patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: OutlineConfig) -> Self {
        Self {
            config,
            patterns: PatternSet::standard(),
        }
    }

    /// Replace the heading pattern chain.
    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Infer the outline of an in-memory document.
    ///
    /// `source_name` is only used for the file-name title fallback.
    pub fn extract<S: LayoutSource + ?Sized>(&self, doc: &S, source_name: &str) -> DocumentOutline {
        let baselines = Baselines::analyze(doc);
        let excluded = ExcludedTextSet::detect(doc, &self.config);
        let title = detect_title(doc, &excluded, &self.config, source_name);

        let classifier = self.classifier_for(doc, baselines);
        let mut aggregator = OutlineAggregator::new(classifier.as_ref(), &title.text, &excluded);
        for index in 0..doc.page_count() {
            if let Some(page) = doc.page(index) {
                aggregator.scan_page(index, page);
            }
        }
        let outline = aggregator.finish();

        log::info!(
            "Extracted {} headings from {} pages of {}",
            outline.len(),
            doc.page_count(),
            source_name
        );
        DocumentOutline {
            title: title.text,
            outline,
        }
    }

    /// Pick the classifier once per document, by metadata availability.
    fn classifier_for<'s, S: LayoutSource + ?Sized>(
        &'s self,
        doc: &S,
        baselines: Baselines,
    ) -> Box<dyn HeadingClassifier + 's> {
        if doc.has_font_metadata() {
            Box::new(FontAwareClassifier::new(&self.config, &self.patterns, baselines))
        } else {
            log::debug!("Font metadata unavailable, using text-only heading detection");
            Box::new(TextOnlyClassifier::new(&self.config, &self.patterns))
        }
    }

    /// Open a layout file and infer its outline.
    ///
    /// A file that cannot be opened yields the file-name title and an empty
    /// outline instead of an error.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> DocumentOutline {
        let path = path.as_ref();
        let name = path.to_string_lossy();
        match LayoutDocument::open(path) {
            Ok(doc) => self.extract(&doc, &name),
            Err(e) => {
                log::warn!("{}", e);
                DocumentOutline::fallback(&name)
            },
        }
    }

    /// Infer the outline of pages `range` (0-based, end exclusive) only.
    ///
    /// Page numbers in the result are relative to the start of the range.
    pub fn extract_range(
        &self,
        doc: &LayoutDocument,
        range: Range<usize>,
        source_name: &str,
    ) -> Result<DocumentOutline> {
        let slice = doc.select(range)?;
        Ok(self.extract(&slice, source_name))
    }

    /// Split the document into `chunks` contiguous page ranges, extract them
    /// independently in parallel and merge the results.
    pub fn extract_chunked(
        &self,
        doc: &LayoutDocument,
        source_name: &str,
        chunks: usize,
    ) -> DocumentOutline {
        let ranges = chunk_ranges(doc.page_count(), chunks);
        log::debug!("Extracting {} page ranges in parallel", ranges.len());

        let parts: Vec<(usize, DocumentOutline)> = ranges
            .into_par_iter()
            .filter_map(|range| {
                let start = range.start;
                match self.extract_range(doc, range, source_name) {
                    Ok(part) => Some((start, part)),
                    Err(e) => {
                        log::warn!("Skipping pages from {}: {}", start, e);
                        None
                    },
                }
            })
            .collect();

        merge_chunks(parts, source_name)
    }
}

/// Contiguous page ranges of size `ceil(page_count / chunks)`.
pub fn chunk_ranges(page_count: usize, chunks: usize) -> Vec<Range<usize>> {
    let chunks = chunks.max(1);
    let size = page_count.div_ceil(chunks).max(1);
    (0..chunks)
        .map(|i| (i * size).min(page_count)..((i + 1) * size).min(page_count))
        .filter(|range| !range.is_empty())
        .collect()
}

/// Merge per-range results given as `(first page offset, outline)` pairs.
///
/// The title is the first non-empty range title in page order. Page numbers
/// are shifted back to document numbering and entries stay in range order
/// within a page.
pub fn merge_chunks(mut parts: Vec<(usize, DocumentOutline)>, source_name: &str) -> DocumentOutline {
    parts.sort_by_key(|(offset, _)| *offset);

    let title = parts
        .iter()
        .map(|(_, part)| part.title.as_str())
        .find(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback_title(source_name));

    let mut outline: Vec<OutlineItem> = parts
        .into_iter()
        .flat_map(|(offset, part)| {
            part.outline.into_iter().map(move |item| OutlineItem {
                page: item.page + offset,
                ..item
            })
        })
        .collect();
    outline.sort_by_key(|item| item.page);

    DocumentOutline { title, outline }
}
