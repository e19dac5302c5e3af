//! Track identification: the recognition collaborator and the extraction of
//! a trustworthy `TrackInfo` from its loosely structured response.

mod payload;
mod recognizer;

pub use payload::*;
pub use recognizer::*;

#[cfg(test)]
mod tests;
