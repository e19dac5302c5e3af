use std::path::{Path, PathBuf};
use std::time::Instant;

use super::file::Pipeline;
use super::model::{BatchObserver, BatchSummary, FileEvent, Outcome, Progress, file_name_of};
use crate::error::BatchError;
use crate::identify::Recognizer;
use crate::library::FileLister;
use crate::tags::TagWriter;

/// Discovers files and drives them through a `Pipeline`, one at a time.
pub struct Batch<L, R, T> {
    lister: L,
    pipeline: Pipeline<R, T>,
    recursive: bool,
}

impl<L: FileLister, R: Recognizer, T: TagWriter> Batch<L, R, T> {
    pub fn new(lister: L, pipeline: Pipeline<R, T>, recursive: bool) -> Self {
        Self {
            lister,
            pipeline,
            recursive,
        }
    }

    /// List the files under `root` that the batch would process.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        self.lister.list(root, self.recursive)
    }

    /// Discover and process every file under `root`.
    pub async fn run(
        &self,
        root: &Path,
        observer: &mut impl BatchObserver,
    ) -> Result<BatchSummary, BatchError> {
        let files = self.discover(root);
        if files.is_empty() {
            return Err(BatchError::NoFiles(root.to_path_buf()));
        }
        Ok(self.run_files(&files, observer).await)
    }

    /// Process `files` strictly in order. A failure on one file never affects
    /// the others.
    pub async fn run_files(
        &self,
        files: &[PathBuf],
        observer: &mut impl BatchObserver,
    ) -> BatchSummary {
        let started = Instant::now();
        let total = files.len();
        observer.batch_started(total);

        let mut results = Vec::with_capacity(total);
        let (mut processed, mut unidentified, mut errors) = (0, 0, 0);

        for (index, path) in files.iter().enumerate() {
            let current = index + 1;
            let mut label = file_name_of(path);
            tracing::debug!(current, total, path = %path.display(), "processing file");

            let (result, outcome) = self
                .pipeline
                .process(path, &mut |event: FileEvent| {
                    if let FileEvent::Renamed {
                        to, applied: true, ..
                    } = &event
                    {
                        label = to.clone();
                    }
                    let progress = Progress {
                        current,
                        total,
                        elapsed: started.elapsed(),
                        label: &label,
                    };
                    observer.stage(&progress, &event);
                })
                .await;

            match outcome {
                Outcome::Processed => processed += 1,
                Outcome::Unidentified => unidentified += 1,
                Outcome::Failed => errors += 1,
            }

            let progress = Progress {
                current,
                total,
                elapsed: started.elapsed(),
                label: &label,
            };
            observer.file_finished(&progress, &result);
            results.push(result);
        }

        let summary = BatchSummary {
            results,
            processed,
            unidentified,
            errors,
            elapsed: started.elapsed(),
            total,
        };
        observer.batch_finished(&summary);
        summary
    }
}
