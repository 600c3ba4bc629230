//! CLI command implementations.

pub mod classify;
pub mod moz;
pub mod semrush;

pub use classify::ClassifyCommand;
pub use moz::{MozCommand, MozReport};
pub use semrush::{KeywordReport, SemrushCommand};
