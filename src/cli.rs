//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::is_positive_secs;

#[derive(Parser, Debug)]
#[command(name = "tunetag")]
#[command(about = "Identify audio files, rename them to \"Artist - Title\" and rewrite their ID3 tags")]
#[command(version)]
pub struct Args {
    /// Folder containing the audio files
    pub root: PathBuf,

    /// Scan subdirectories too
    #[arg(long)]
    pub recurse: bool,

    /// Show what would change without renaming or tagging anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print one log line per stage instead of a progress bar
    #[arg(long)]
    pub verbose: bool,

    /// Per-file recognition timeout in seconds [default: 40]
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
    pub timeout: Option<f64>,
}

fn parse_timeout(raw: &str) -> Result<f64, String> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if is_positive_secs(secs) {
        Ok(secs)
    } else {
        Err("timeout must be a positive number of seconds".to_string())
    }
}
