// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # PDF Outliner
//!
//! Infers a structured outline from the text layout of a PDF: a document
//! title plus an ordered list of headings (H1 through H5) with page numbers.
//!
//! ## Core Features
//!
//! - **Title detection**: stacked large-font lines on the first page, with
//!   length and file-name fallbacks
//! - **Header/footer filtering**: recurring edge lines are excluded from both
//!   title and headings
//! - **Heading classification**: font size relative to the body size, space
//!   above, all-caps and margin alignment, combined with numbering
//!   (`2.1`, `(a)`), Japanese section markers and section keywords
//! - **Text-only mode**: pattern-based detection when the layout carries no
//!   font metadata
//! - **Parallel extraction**: independent page ranges processed with rayon
//!   and merged
//!
//! The crate does not parse PDF files. It reads a per-page layout (blocks,
//! lines, spans with size, flags and boxes) from a JSON dump or plain text,
//! see [`document`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outliner::OutlineExtractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let outline = OutlineExtractor::new().extract_file("report.json");
//! println!("{}", outline.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Layout input
pub mod document;
pub mod geometry;
pub mod layout;

// Document-level passes
pub mod extractors;
pub mod outline;

// Re-exports
pub use config::OutlineConfig;
pub use document::{LayoutDocument, LayoutSource};
pub use error::{Error, Result};
pub use layout::HeadingLevel;
pub use outline::{DocumentOutline, OutlineExtractor, OutlineItem};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// # use std::cmp::Ordering;
    /// # use pdf_outliner::utils::safe_float_cmp;
    /// assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
    /// assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
    /// assert_eq!(safe_float_cmp(1.0, 1.0), Ordering::Equal);
    ///
    /// // NaN handling
    /// assert_eq!(safe_float_cmp(f32::NAN, f32::NAN), Ordering::Equal);
    /// assert_eq!(safe_float_cmp(f32::NAN, 1.0), Ordering::Greater);
    /// assert_eq!(safe_float_cmp(1.0, f32::NAN), Ordering::Less);
    /// ```
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => {
                // Both are normal numbers, safe to unwrap
                a.partial_cmp(&b).unwrap()
            },
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
