//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated regression input (`Problem`)
//! - run options (`SelectOptions`, `RankPolicy`)
//! - selection outputs (`SelectionPath`, `StepQuality`, `PathFile`)

pub mod types;

pub use types::*;
