use std::path::Path;
use std::time::Duration;

use super::model::{FileEvent, FileResult, Outcome, file_name_of};
use crate::error::PipelineError;
use crate::identify::{Recognizer, TrackInfo, extract_track_info};
use crate::naming::{build_target_filename, plan_target, rename_collision_safe};
use crate::tags::TagWriter;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Compute and report actions without touching any file.
    pub dry_run: bool,
    /// Upper bound on one recognition call.
    pub timeout: Duration,
    /// Whether the tag writer embeds cover art; mirrored in preview mode.
    pub embed_art: bool,
}

/// Per-file identify → rename → tag sequence.
pub struct Pipeline<R, T> {
    recognizer: R,
    tagger: T,
    options: RunOptions,
}

impl<R: Recognizer, T: TagWriter> Pipeline<R, T> {
    pub fn new(recognizer: R, tagger: T, options: RunOptions) -> Self {
        Self {
            recognizer,
            tagger,
            options,
        }
    }

    /// Run one file through the pipeline.
    ///
    /// Never fails: recognition misses end as `Outcome::Unidentified`, rename
    /// and tag failures are recorded on the result as `Outcome::Failed`.
    pub async fn process(
        &self,
        path: &Path,
        emit: &mut impl FnMut(FileEvent),
    ) -> (FileResult, Outcome) {
        let mut result = FileResult::new(file_name_of(path));

        emit(FileEvent::Identifying);
        let Some(track) = self.identify(path).await else {
            result.skipped = true;
            emit(FileEvent::Skipped);
            return (result, Outcome::Unidentified);
        };
        result.identified = true;
        emit(FileEvent::Identified(track.clone()));

        match self.apply(path, &track, &mut result, emit).await {
            Ok(()) => {
                emit(FileEvent::Done);
                (result, Outcome::Processed)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::debug!(path = %path.display(), error = %message, "file failed");
                result.error = Some(message.clone());
                emit(FileEvent::Failed(message));
                (result, Outcome::Failed)
            }
        }
    }

    /// Recognize and extract, folding every kind of miss into `None`.
    async fn identify(&self, path: &Path) -> Option<TrackInfo> {
        let payload =
            match tokio::time::timeout(self.options.timeout, self.recognizer.recognize(path)).await
            {
                Ok(Ok(payload)) => payload,
                Ok(Err(err)) => {
                    tracing::debug!(path = %path.display(), error = %err, "recognition failed");
                    return None;
                }
                Err(_) => {
                    tracing::debug!(
                        path = %path.display(),
                        timeout = ?self.options.timeout,
                        "recognition timed out"
                    );
                    return None;
                }
            };

        let track = extract_track_info(&payload);
        if track.is_none() {
            tracing::debug!(path = %path.display(), "recognition returned no usable track");
        }
        track
    }

    async fn apply(
        &self,
        path: &Path,
        track: &TrackInfo,
        result: &mut FileResult,
        emit: &mut impl FnMut(FileEvent),
    ) -> Result<(), PipelineError> {
        emit(FileEvent::Renaming);
        let target = build_target_filename(&track.artist, &track.title, track.album.as_deref());

        let mut current = path.to_path_buf();
        if target != result.source_name {
            let dest = if self.options.dry_run {
                plan_target(path, &target)
            } else {
                rename_collision_safe(path, &target)?
            };

            if dest.as_path() != path {
                result.renamed = true;
                result.dest_name = file_name_of(&dest);
                emit(FileEvent::Renamed {
                    from: result.source_name.clone(),
                    to: result.dest_name.clone(),
                    applied: !self.options.dry_run,
                });
            }
            if !self.options.dry_run {
                current = dest;
            }
        }

        emit(FileEvent::Tagging);
        if self.options.dry_run {
            result.tags_ok = true;
            result.art_ok = self.options.embed_art && track.cover_url.is_some();
        } else {
            let outcome = self.tagger.write_tags(&current, track).await?;
            result.tags_ok = outcome.tags_ok;
            result.art_ok = outcome.art_ok;
        }

        Ok(())
    }
}
