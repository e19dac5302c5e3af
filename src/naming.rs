//! Deterministic target filenames and collision-safe renames.

mod rename;
mod sanitize;

pub use rename::*;
pub use sanitize::*;
