//! The identify → rename → tag pipeline and the batch that drives it.
//!
//! Nothing in here writes to the terminal: progress is surfaced as
//! `FileEvent`s through a `BatchObserver`, and results are plain data that the
//! `report` module renders.

mod batch;
mod file;
mod model;

pub use batch::*;
pub use file::*;
pub use model::*;
