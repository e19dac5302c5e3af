//! Console rendering of batch progress and the final summary.
//!
//! This is the only place that writes to stdout; everything is rendered into
//! strings first so it can be tested without a terminal.

mod console;
mod paint;
mod progress;
mod summary;

pub use console::*;
pub use paint::*;
pub use progress::*;
pub use summary::*;
