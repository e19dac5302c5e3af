//! Embedded metadata: ID3 text frames and front cover art.

mod art;
mod write;

pub use art::*;
pub use write::*;

#[cfg(test)]
mod tests;
