use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::cli::Args;
use crate::error::{BatchError, RunError};
use crate::identify::{CommandRecognizer, Recognizer};
use crate::library::{AudioScanner, FileLister};
use crate::pipeline::{Batch, BatchObserver, Pipeline, RunOptions};
use crate::report::{ConsoleReporter, Mode, Painter};
use crate::tags::{HttpArtFetcher, Id3TagWriter, TagWriter};

mod logging;
mod settings;

pub use logging::init_tracing;

/// How a run that did not hit a fatal error ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    NoFiles,
    Interrupted,
}

impl RunOutcome {
    pub fn code(self) -> u8 {
        match self {
            RunOutcome::Completed => 0,
            RunOutcome::NoFiles => 3,
            RunOutcome::Interrupted => 130,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Exit code for errors that stop the run before any file is touched.
pub const FATAL_EXIT: u8 = 1;

pub fn run(args: Args) -> Result<RunOutcome, RunError> {
    let mut settings = settings::load_settings();
    settings::apply_args(&mut settings, &args);
    settings.validate().map_err(RunError::InvalidSettings)?;

    let root = resolve_root(&args.root)?;

    let recognizer = CommandRecognizer::new(&settings.recognizer);
    if !recognizer.is_available() {
        return Err(RunError::MissingDependency(recognizer.program().to_string()));
    }

    let fetcher = HttpArtFetcher::new(&settings.artwork)?;
    let tagger = Id3TagWriter::new(fetcher, settings.artwork.enabled);
    let options = RunOptions {
        dry_run: args.dry_run,
        timeout: settings.recognizer.timeout(),
        embed_art: settings.artwork.enabled,
    };
    let batch = Batch::new(
        AudioScanner::new(settings.library.clone()),
        Pipeline::new(recognizer, tagger, options),
        args.recurse,
    );

    let mode = if args.verbose {
        Mode::Verbose
    } else {
        Mode::Progress
    };
    let mut reporter = ConsoleReporter::stdout(mode, Painter::new(settings.ui.color));

    tracing::debug!(
        root = %root.display(),
        recurse = args.recurse,
        dry_run = args.dry_run,
        "starting batch"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("cannot listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };
    let outcome = runtime.block_on(drive(&batch, &root, &mut reporter, shutdown));

    match outcome {
        RunOutcome::Completed => {}
        RunOutcome::NoFiles => reporter.warn("No matching audio files found."),
        RunOutcome::Interrupted => reporter.error("\nInterrupted by user."),
    }
    Ok(outcome)
}

/// Run the batch until it finishes or `shutdown` resolves, whichever comes
/// first. On shutdown the batch future is dropped mid-file: any running
/// recognizer child is killed, finished files keep their changes and the
/// observer never sees `batch_finished`.
pub async fn drive<L, R, T>(
    batch: &Batch<L, R, T>,
    root: &Path,
    observer: &mut impl BatchObserver,
    shutdown: impl Future<Output = ()>,
) -> RunOutcome
where
    L: FileLister,
    R: Recognizer,
    T: TagWriter,
{
    tokio::select! {
        result = batch.run(root, observer) => match result {
            Ok(summary) => {
                tracing::debug!(
                    total = summary.total,
                    processed = summary.processed,
                    unidentified = summary.unidentified,
                    errors = summary.errors,
                    "batch finished"
                );
                RunOutcome::Completed
            }
            Err(BatchError::NoFiles(_)) => RunOutcome::NoFiles,
        },
        () = shutdown => RunOutcome::Interrupted,
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf, RunError> {
    match fs::canonicalize(root) {
        Ok(path) if path.is_dir() => Ok(path),
        _ => Err(RunError::RootNotFound(root.to_path_buf())),
    }
}
