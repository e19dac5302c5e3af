use std::time::Duration;

use crossterm::style::Color;

use super::paint::{Painter, truncate};
use crate::pipeline::{FileEvent, Progress};

const MIN_WIDTH: usize = 70;

/// Short status shown on the progress line, or `None` when the event does
/// not change what the line says.
pub fn status_text(event: &FileEvent) -> Option<&'static str> {
    match event {
        FileEvent::Identifying => Some("ID…"),
        FileEvent::Skipped => Some("SKIP (no ID)"),
        FileEvent::Renaming => Some("RENAME…"),
        FileEvent::Tagging => Some("TAGS/ART…"),
        FileEvent::Done => Some("DONE"),
        FileEvent::Failed(_) => Some("ERROR"),
        FileEvent::Identified(_) | FileEvent::Renamed { .. } => None,
    }
}

fn status_color(status: &str) -> (Color, bool) {
    let upper = status.to_uppercase();
    if upper.contains("ERROR") {
        (Color::Red, true)
    } else if upper.contains("SKIP") {
        (Color::Yellow, true)
    } else if upper.contains("DONE") {
        (Color::Green, true)
    } else if ["ID", "RENAME", "TAGS", "ART"].iter().any(|k| upper.contains(k)) {
        (Color::Cyan, false)
    } else {
        (Color::White, false)
    }
}

pub fn render_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64) as usize;
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Seconds left, extrapolated from the average time per file so far.
pub fn eta(elapsed: Duration, current: usize, total: usize) -> Duration {
    if current == 0 {
        return Duration::ZERO;
    }
    let per_file = elapsed.as_secs_f64() / current as f64;
    Duration::from_secs_f64(per_file * total.saturating_sub(current) as f64)
}

/// Render the single-line progress display (without the leading `\r`).
pub fn render_progress_line(
    progress: &Progress<'_>,
    status: &str,
    columns: usize,
    painter: &Painter,
) -> String {
    let cols = columns.max(MIN_WIDTH);
    let fraction = if progress.total == 0 {
        1.0
    } else {
        progress.current as f64 / progress.total as f64
    };
    let eta = eta(progress.elapsed, progress.current, progress.total);

    let bar_width = (cols / 3).clamp(20, 40);
    let left = format!(
        "[{}] {:>4}/{:<4} ({:5.1}%) ETA {:4}s",
        render_bar(fraction, bar_width),
        progress.current,
        progress.total,
        fraction * 100.0,
        eta.as_secs()
    );

    let remain = cols.saturating_sub(left.chars().count() + 5);
    let status_space = (remain / 3).clamp(12, 24);
    let label_space = remain.saturating_sub(status_space).max(10);

    let status_cell = format!("{:<status_space$}", truncate(status, status_space));
    let (color, bold) = status_color(status);
    let status_cell = if bold {
        painter.bold(&status_cell, color)
    } else {
        painter.paint(&status_cell, color)
    };
    let label_cell = format!("{:<label_space$}", truncate(progress.label, label_space));

    format!("{left} | {status_cell} | {label_cell}")
}
