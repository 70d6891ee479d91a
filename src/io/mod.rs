//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - coefficient table export (CSV) (`export`)
//! - selection path JSON read/write (`path_file`)

pub mod export;
pub mod ingest;
pub mod path_file;

pub use export::*;
pub use ingest::*;
pub use path_file::*;
