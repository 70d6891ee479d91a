//! `bestsubset` library crate.
//!
//! Greedy forward best-subset selection for linear least squares: for every
//! subset size k the crate finds one subset by adding, at each step, the
//! feature that most reduces the residual sum of squares. Subsets are grown
//! with a one-row Cholesky update, so each candidate costs O(k²) instead of a
//! fresh O(k³) factorization.
//!
//! The binary (`bestsubset`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the numeric engine is usable without the CLI/CSV layers

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod select;

pub use domain::{Problem, RankPolicy, SelectOptions, SelectionPath};
pub use error::{AppError, SelectError};
pub use select::{select, select_with};
