//! Document-level extractors that run before the heading pass.
//!
//! Provides recurring header/footer detection and title detection.

pub mod boilerplate;
pub mod title;

pub use boilerplate::ExcludedTextSet;
pub use title::{detect_title, fallback_title, DetectedTitle, TitleSource};
