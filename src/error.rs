//! Error types shared across the identify → rename → tag pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of the recognition collaborator. Always treated as "not identified".
#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("could not start recognizer `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("recognizer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("recognizer output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Failure to download cover art. Degrades to "no art", never a file error.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cover request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cover request returned HTTP {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to open {} as audio: {source}", .path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("{} is not an MPEG audio file (found {found})", .path.display())]
    NotMpeg { path: PathBuf, found: String },

    #[error("failed to read tags from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("failed to write tags to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },
}

#[derive(Debug, Error)]
#[error("failed to rename {} to {}: {source}", .from.display(), .to.display())]
pub struct RenameError {
    pub from: PathBuf,
    pub to: PathBuf,
    #[source]
    pub source: io::Error,
}

/// A mutation stage failed; recorded on the file's result.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Rename(#[from] RenameError),

    #[error(transparent)]
    Tags(#[from] TagError),
}

/// The batch had nothing to do.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("no matching audio files found under {}", .0.display())]
    NoFiles(PathBuf),
}

/// Fatal errors that stop the program before any file is touched.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("root not found or not a directory: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("required program `{0}` was not found on PATH")]
    MissingDependency(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("failed to start runtime: {0}")]
    Runtime(#[from] io::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
