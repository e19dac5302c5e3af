use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

/// Source of the files a batch should process.
pub trait FileLister {
    /// List candidate audio files under `root`, in processing order.
    fn list(&self, root: &Path, recursive: bool) -> Vec<PathBuf>;
}

/// Walks a directory tree and keeps files with a supported audio extension.
pub struct AudioScanner {
    settings: LibrarySettings,
}

impl AudioScanner {
    pub fn new(settings: LibrarySettings) -> Self {
        Self { settings }
    }
}

impl FileLister for AudioScanner {
    fn list(&self, root: &Path, recursive: bool) -> Vec<PathBuf> {
        scan(root, recursive, &self.settings)
    }
}

pub(crate) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

pub fn scan(dir: &Path, recursive: bool, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() || entry.path().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_audio_file(path, settings))
        .collect();

    files.sort();
    files
}
