//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{core,input,records,term,types}`
//! and holds the runtime configuration used by the terminal binary.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_records as records;
pub use blockfall_term as term;
pub use blockfall_types as types;
