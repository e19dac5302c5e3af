use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenameError;

/// Insert ` (n)` between the stem and the extension of `name`.
fn suffixed_name(name: &str, n: u64) -> String {
    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str());
    let ext = path.extension().and_then(|s| s.to_str());
    match (stem, ext) {
        (Some(stem), Some(ext)) => format!("{stem} ({n}).{ext}"),
        _ => format!("{name} ({n})"),
    }
}

/// Pick the path `src` would be renamed to when asking for `desired_name`.
///
/// Returns `src` unchanged when it already has that name. Otherwise returns the
/// first of `desired_name`, `desired (1).ext`, `desired (2).ext`, ... that does
/// not exist yet in `src`'s directory.
///
/// This is a plain check-then-act probe: a file created by someone else between
/// this call and the rename can still be overwritten on platforms where
/// `rename` replaces existing files.
pub fn plan_target(src: &Path, desired_name: &str) -> PathBuf {
    let dest = src.with_file_name(desired_name);
    if dest == src {
        return dest;
    }
    if !dest.exists() {
        return dest;
    }

    let mut n: u64 = 1;
    loop {
        let candidate = src.with_file_name(suffixed_name(desired_name, n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Rename `src` to `desired_name` in the same directory, never overwriting an
/// existing file. Returns the path the file now lives at.
pub fn rename_collision_safe(src: &Path, desired_name: &str) -> Result<PathBuf, RenameError> {
    let dest = plan_target(src, desired_name);
    if dest == src {
        return Ok(dest);
    }

    fs::rename(src, &dest).map_err(|source| RenameError {
        from: src.to_path_buf(),
        to: dest.clone(),
        source,
    })?;
    Ok(dest)
}
