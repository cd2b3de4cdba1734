//! Layout model and heading analysis.
//!
//! - Text layout model (pages → blocks → lines → spans)
//! - Document-wide baselines (body font size, common left margin)
//! - Ordered heading patterns (numbering, script markers, keywords)
//! - Per-line heading classification

pub mod document_analyzer;
pub mod heading_detector;
pub mod patterns;
pub mod text_block;

// Re-export main types
pub use document_analyzer::Baselines;
pub use heading_detector::{
    Classification, FontAwareClassifier, HeadingClassifier, HeadingLevel, LineFeatures,
    TextOnlyClassifier,
};
pub use patterns::{PatternKind, PatternMatch, PatternRule, PatternSet};
pub use text_block::{Page, TextBlock, TextLine, TextSpan};
