use std::io::{self, Write};

use crossterm::style::Color;

use super::paint::Painter;
use super::progress::{render_progress_line, status_text};
use super::summary::{render_flags, render_summary};
use crate::pipeline::{BatchObserver, BatchSummary, FileEvent, FileResult, Progress};

const FALLBACK_COLUMNS: usize = 100;

/// How the reporter lays out per-file output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One progress line redrawn in place.
    Progress,
    /// Structured log lines per file.
    Verbose,
}

/// `BatchObserver` that renders to a terminal (or any writer).
pub struct ConsoleReporter<W> {
    out: W,
    painter: Painter,
    mode: Mode,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(mode: Mode, painter: Painter) -> Self {
        Self::new(io::stdout(), mode, painter)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, mode: Mode, painter: Painter) -> Self {
        Self { out, painter, mode }
    }

    fn columns(&self) -> usize {
        crossterm::terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(FALLBACK_COLUMNS)
    }

    /// Print a warning line outside of any batch.
    pub fn warn(&mut self, message: &str) {
        let line = self.painter.bold(message, Color::Yellow);
        self.write(&format!("{line}\n"));
    }

    /// Print an error line outside of any batch.
    pub fn error(&mut self, message: &str) {
        let line = self.painter.bold(message, Color::Red);
        self.write(&format!("{line}\n"));
    }

    fn write(&mut self, text: &str) {
        // A closed stdout is not worth aborting a half-done batch for.
        if let Err(err) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::debug!(error = %err, "failed to write report output");
        }
    }

    fn verbose_event(&mut self, progress: &Progress<'_>, event: &FileEvent) {
        let p = self.painter;
        let line = match event {
            FileEvent::Skipped => p.bold(
                &format!("[SKIP] {}: Not identified.", progress.label),
                Color::Yellow,
            ),
            FileEvent::Identified(track) => {
                let album = match &track.album {
                    Some(album) => album.clone(),
                    None => p.paint("unknown", Color::Yellow),
                };
                let cover = if track.cover_url.is_some() {
                    p.paint("yes", Color::Magenta)
                } else {
                    p.paint("no", Color::Yellow)
                };
                format!(
                    "{}\n[META] album={album} cover={cover}",
                    p.paint(
                        &format!(
                            "[ID]   {} → {} — {}",
                            progress.label, track.artist, track.title
                        ),
                        Color::Cyan
                    )
                )
            }
            FileEvent::Renamed { from, to, applied } => {
                let suffix = if *applied { "" } else { " (dry run)" };
                p.paint(&format!("[NAME] {from} → {to}{suffix}"), Color::Cyan)
            }
            FileEvent::Failed(message) => {
                p.bold(&format!("[ERR]  {}: {message}", progress.label), Color::Red)
            }
            FileEvent::Identifying
            | FileEvent::Renaming
            | FileEvent::Tagging
            | FileEvent::Done => return,
        };
        self.write(&format!("{line}\n"));
    }
}

impl<W: Write> BatchObserver for ConsoleReporter<W> {
    fn batch_started(&mut self, total: usize) {
        let line = self
            .painter
            .bold(&format!("Processing {total} files…"), Color::White);
        self.write(&format!("{line}\n\n"));
    }

    fn stage(&mut self, progress: &Progress<'_>, event: &FileEvent) {
        match self.mode {
            Mode::Verbose => self.verbose_event(progress, event),
            Mode::Progress => {
                if let Some(status) = status_text(event) {
                    let line =
                        render_progress_line(progress, status, self.columns(), &self.painter);
                    self.write(&format!("\r{line}"));
                }
            }
        }
    }

    fn file_finished(&mut self, _progress: &Progress<'_>, result: &FileResult) {
        if self.mode == Mode::Verbose {
            let flags = render_flags(result, &self.painter, "no-op");
            self.write(&format!(
                "[OK]   {} → {}  ({flags})\n",
                result.source_name, result.dest_name
            ));
        }
    }

    fn batch_finished(&mut self, summary: &BatchSummary) {
        if self.mode == Mode::Progress {
            self.write("\n");
        }
        let rendered = render_summary(summary, &self.painter);
        self.write(&rendered);
    }
}
