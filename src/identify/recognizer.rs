use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde_json::Value;
use tokio::process::Command;

use crate::config::RecognizerSettings;
use crate::error::RecognizeError;

/// Fingerprints an audio file and returns the service's raw response.
///
/// Implementations are driven one file at a time and may be cancelled at any
/// await point when the caller's timeout expires.
pub trait Recognizer {
    async fn recognize(&self, path: &Path) -> Result<Value, RecognizeError>;
}

/// Runs an external recognition program and parses its stdout as JSON.
///
/// The child is killed when the future is dropped, so a timeout or an
/// interrupt does not leave it running.
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(settings: &RecognizerSettings) -> Self {
        Self {
            program: settings.program.clone(),
            args: settings.args.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the configured program can be found.
    pub fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }
}

impl Recognizer for CommandRecognizer {
    async fn recognize(&self, path: &Path) -> Result<Value, RecognizeError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| RecognizeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RecognizeError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

/// Resolve `program` the way a shell would: as a path when it contains a
/// separator, otherwise by searching `PATH`.
pub fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let full = dir.join(program);
        if full.is_file() {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = full.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}
