//! Running header and footer detection.
//!
//! Boilerplate such as running titles, page footers and copyright notices
//! repeats near the top or bottom edge of most pages. The detector samples
//! the leading pages, collects the lines of the outermost blocks and keeps
//! every text that recurs on enough of the sampled pages.

use crate::config::OutlineConfig;
use crate::document::LayoutSource;
use crate::layout::{Page, TextBlock};
use crate::utils::safe_float_cmp;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

/// Line texts recognized as recurring headers or footers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExcludedTextSet {
    texts: HashSet<String>,
}

impl ExcludedTextSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from explicit texts.
    pub fn from_texts<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `text` is boilerplate.
    pub fn contains(&self, text: &str) -> bool {
        self.texts.contains(text)
    }

    /// Number of excluded texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Sample the leading pages of `doc` and collect recurring edge lines.
    ///
    /// A text is tallied at most once per sampled page. It is excluded when
    /// it appears on at least `boilerplate_ratio` of the sampled pages and on
    /// at least `boilerplate_min_recurrence` of them, so a single-page
    /// document never excludes anything.
    pub fn detect<S: LayoutSource + ?Sized>(doc: &S, config: &OutlineConfig) -> Self {
        let sample = doc.page_count().min(config.boilerplate_sample_pages);
        let mut tally: IndexMap<String, usize> = IndexMap::new();

        for page in (0..sample).filter_map(|i| doc.page(i)) {
            for text in edge_texts(page, config) {
                *tally.entry(text).or_insert(0) += 1;
            }
        }

        let required = sample as f32 * config.boilerplate_ratio;
        let texts: HashSet<String> = tally
            .into_iter()
            .filter(|(_, count)| {
                *count as f32 >= required && *count >= config.boilerplate_min_recurrence
            })
            .map(|(text, _)| text)
            .collect();

        log::debug!(
            "Sampled {} pages for headers/footers, excluding {} recurring lines",
            sample,
            texts.len()
        );
        Self { texts }
    }
}

/// Distinct line texts in the top and bottom edge blocks of a page.
fn edge_texts(page: &Page, config: &OutlineConfig) -> IndexSet<String> {
    let mut blocks: Vec<&TextBlock> = page.blocks.iter().collect();
    blocks.sort_by(|a, b| safe_float_cmp(a.bbox.top(), b.bbox.top()));

    let edge = config.boilerplate_edge_blocks;
    let top = &blocks[..edge.min(blocks.len())];
    let bottom = &blocks[blocks.len().saturating_sub(edge)..];

    top.iter()
        .chain(bottom.iter())
        .flat_map(|block| block.lines.iter())
        .map(|line| line.text())
        .filter(|text| text.chars().count() > config.boilerplate_min_chars)
        .collect()
}
