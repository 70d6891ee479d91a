//! Greedy forward selection.
//!
//! Responsibilities:
//!
//! - compute the problem moments once and own the scratch workspace
//! - evaluate each remaining candidate per step (optionally parallel)
//! - commit the winner and record the coefficient path
//! - score subset sizes (BIC) and cross-check a path against direct refits

pub mod criteria;
pub mod evaluator;
pub mod greedy;
pub mod verify;
pub mod workspace;

pub use criteria::*;
pub use evaluator::*;
pub use greedy::*;
pub use verify::*;
pub use workspace::*;
