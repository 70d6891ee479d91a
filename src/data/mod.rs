//! Data sources other than user files.

pub mod sample;

pub use sample::{SampleConfig, SyntheticProblem, generate_problem};
