use std::path::Path;
use std::time::Duration;

use crate::identify::TrackInfo;

/// Outcome record for one input file.
///
/// Fields only ever move from `false` to `true` while the file is processed.
/// A set `error` means the pipeline stopped at that stage; earlier side
/// effects (e.g. a completed rename) stay in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub source_name: String,
    pub dest_name: String,
    pub identified: bool,
    pub renamed: bool,
    pub tags_ok: bool,
    pub art_ok: bool,
    pub skipped: bool,
    pub error: Option<String>,
}

impl FileResult {
    pub fn new(source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        Self {
            dest_name: source_name.clone(),
            source_name,
            identified: false,
            renamed: false,
            tags_ok: false,
            art_ok: false,
            skipped: false,
            error: None,
        }
    }

    /// Status flags in display order.
    pub fn flags(&self) -> Vec<Flag> {
        let mut flags = Vec::new();
        if self.skipped {
            flags.push(Flag::Skip);
        }
        if self.renamed {
            flags.push(Flag::Ren);
        }
        if self.tags_ok {
            flags.push(Flag::Tag);
        }
        if self.art_ok {
            flags.push(Flag::Art);
        }
        if self.error.is_some() {
            flags.push(Flag::Err);
        }
        flags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Skip,
    Ren,
    Tag,
    Art,
    Err,
}

impl Flag {
    pub fn label(self) -> &'static str {
        match self {
            Flag::Skip => "SKIP",
            Flag::Ren => "REN",
            Flag::Tag => "TAG",
            Flag::Art => "ART",
            Flag::Err => "ERR",
        }
    }
}

/// Terminal classification of one file, used for the batch counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Processed,
    Unidentified,
    Failed,
}

/// Aggregate over one run. `results` keeps discovery order and always has
/// `total` entries.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub results: Vec<FileResult>,
    pub processed: usize,
    pub unidentified: usize,
    pub errors: usize,
    pub elapsed: Duration,
    pub total: usize,
}

/// A stage transition of the file currently being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Identifying,
    Skipped,
    Identified(TrackInfo),
    Renaming,
    /// `applied` is false in preview mode.
    Renamed {
        from: String,
        to: String,
        applied: bool,
    },
    Tagging,
    Done,
    Failed(String),
}

/// Where the batch is when an event fires.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based index of the current file.
    pub current: usize,
    pub total: usize,
    /// Time since the batch started.
    pub elapsed: Duration,
    /// Current name of the file being processed.
    pub label: &'a str,
}

/// Receives everything the batch has to say, in order.
pub trait BatchObserver {
    fn batch_started(&mut self, _total: usize) {}

    fn stage(&mut self, progress: &Progress<'_>, event: &FileEvent);

    fn file_finished(&mut self, _progress: &Progress<'_>, _result: &FileResult) {}

    fn batch_finished(&mut self, _summary: &BatchSummary) {}
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
