//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive a tagging run
//! and helpers to load configuration from disk and the environment.

mod load;
mod schema;

pub use load::is_positive_secs;
pub use schema::*;
