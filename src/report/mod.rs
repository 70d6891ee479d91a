//! Reporting utilities: terminal summaries of selection paths.

pub mod format;

pub use format::*;
