//! Error types for outline extraction.
//!
//! Only the layout provider and the I/O surface can fail. The heading engine
//! itself degrades to a smaller result instead of erroring.

use std::path::PathBuf;

/// Result type alias for outline extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or slicing a layout document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The layout provider could not open or parse the source.
    #[error("Failed to open document {path}: {reason}")]
    DocumentOpen {
        /// Path of the source document
        path: PathBuf,
        /// Reason reported by the provider
        reason: String,
    },

    /// The source file extension is not handled by any provider.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// A page range does not fit inside the document.
    #[error("Invalid page range {start}..{end} for document with {page_count} pages")]
    InvalidPageRange {
        /// First page of the range (0-based, inclusive)
        start: usize,
        /// End of the range (0-based, exclusive)
        end: usize,
        /// Number of pages in the document
        page_count: usize,
    },

    /// The layout description is structurally unusable.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
