use crossterm::style::Color;

use super::paint::Painter;
use crate::pipeline::{BatchSummary, FileResult, Flag};

const SYMBOL_OK: &str = "✓";
const SYMBOL_ERR: &str = "✗";
const SYMBOL_WARN: &str = "⚠";

const MIN_COLUMN: usize = 24;
const MAX_COLUMN: usize = 60;

pub fn paint_flag(flag: Flag, painter: &Painter) -> String {
    match flag {
        Flag::Skip => painter.paint(flag.label(), Color::Yellow),
        Flag::Ren => painter.paint(flag.label(), Color::Cyan),
        Flag::Tag => painter.paint(flag.label(), Color::Green),
        Flag::Art => painter.paint(flag.label(), Color::Magenta),
        Flag::Err => painter.bold(flag.label(), Color::Red),
    }
}

/// Comma-joined flags, or `empty` when the result carries none.
pub fn render_flags(result: &FileResult, painter: &Painter, empty: &str) -> String {
    let flags = result.flags();
    if flags.is_empty() {
        return empty.to_string();
    }
    flags
        .into_iter()
        .map(|flag| paint_flag(flag, painter))
        .collect::<Vec<_>>()
        .join(", ")
}

fn column_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(MIN_COLUMN, MAX_COLUMN)
}

/// Render the counters block followed by one table row per file.
pub fn render_summary(summary: &BatchSummary, painter: &Painter) -> String {
    let mut out = String::new();

    let ok = painter.bold(&format!("{SYMBOL_OK} OK"), Color::Green);
    let warn = painter.bold(&format!("{SYMBOL_WARN} Unidentified"), Color::Yellow);
    let err = painter.bold(&format!("{SYMBOL_ERR} Errors"), Color::Red);

    out.push_str(&format!("\n{}:\n", painter.bold("Summary", Color::White)));
    out.push_str(&format!(
        "  {ok}: {}   {warn}: {}   {err}: {}   Time: {:.1}s\n",
        summary.processed,
        summary.unidentified,
        summary.errors,
        summary.elapsed.as_secs_f64()
    ));

    out.push_str(&format!("\n{}:\n", painter.bold("Results", Color::White)));
    let name_w = column_width(summary.results.iter().map(|r| r.source_name.as_str()));
    let dest_w = column_width(summary.results.iter().map(|r| r.dest_name.as_str()));

    let header = format!("{:<name_w$}  →  {:<dest_w$}  |  Status", "Source", "Dest");
    out.push_str(&painter.bold(&header, Color::Cyan));
    out.push('\n');
    out.push_str(&painter.paint(&"-".repeat(header.chars().count()), Color::Cyan));
    out.push('\n');

    for result in &summary.results {
        let mut status = render_flags(result, painter, "-");
        if let Some(error) = &result.error {
            status.push(' ');
            status.push_str(&painter.paint(&format!("({error})"), Color::Red));
        }
        out.push_str(&format!(
            "{:<name_w$}  →  {:<dest_w$}  |  {status}\n",
            result.source_name, result.dest_name
        ));
    }

    out
}
