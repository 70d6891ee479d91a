//! Numeric building blocks: flat-buffer kernels, triangular solves, the
//! one-row Cholesky update, and a direct least-squares reference.

pub mod cholesky;
pub mod ols;
pub mod primitives;
pub mod triangular;

pub use cholesky::*;
pub use ols::*;
pub use primitives::*;
pub use triangular::*;
