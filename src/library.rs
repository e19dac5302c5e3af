//! Audio file discovery.
//!
//! The batch only needs a flat, ordered list of candidate paths; the scanner
//! in `library::scan` produces it from a root directory.

mod scan;

pub use scan::*;
