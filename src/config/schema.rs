use std::time::Duration;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tunetag/config.toml` or `~/.config/tunetag/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags (applied by the runtime after loading)
/// 2) Environment variables (prefix `TUNETAG__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub recognizer: RecognizerSettings,
    pub artwork: ArtworkSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecognizerSettings {
    /// Program that fingerprints a file and prints the raw recognition JSON.
    /// Looked up on `PATH` unless it contains a path separator.
    pub program: String,
    /// Arguments passed before the audio file path.
    pub args: Vec<String>,
    /// Per-file recognition timeout (seconds).
    pub timeout_secs: f64,
}

impl RecognizerSettings {
    /// Recognition timeout as a `Duration`. Only valid after `Settings::validate`.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(DEFAULT_RECOGNIZE_TIMEOUT)
    }
}

pub const DEFAULT_RECOGNIZE_TIMEOUT: Duration = Duration::from_secs(40);

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            program: "songrec".to_string(),
            args: vec!["audio-file-to-recognized-song".to_string()],
            timeout_secs: DEFAULT_RECOGNIZE_TIMEOUT.as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtworkSettings {
    /// Whether cover art is downloaded and embedded at all.
    pub enabled: bool,
    /// Timeout for a single cover download (seconds).
    pub fetch_timeout_secs: f64,
    /// User agent sent with cover downloads.
    pub user_agent: String,
}

impl ArtworkSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.fetch_timeout_secs).unwrap_or(Duration::from_secs(15))
    }
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fetch_timeout_secs: 15.0,
            user_agent: concat!("tunetag/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into()],
            follow_links: true,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Colorize progress, log lines and the summary table.
    pub color: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { color: true }
    }
}
