//! Core data structures shared across the application layer.

pub mod document;
pub mod format;

pub use document::Document;
pub use format::{CharFormat, FormatCommand, Rgb};
