//! Replace the identifying ID3 frames of a file with a resolved `TrackInfo`.

use std::path::Path;

use id3::frame::{Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike, Version};
use lofty::file::FileType;
use lofty::prelude::TaggedFileExt;

use super::art::{ArtFetcher, sniff_image_mime};
use crate::error::TagError;
use crate::identify::TrackInfo;

/// Tag revision written back to disk. v2.3 is the one every player reads.
pub const WRITE_VERSION: Version = Version::Id3v23;

const COVER_DESCRIPTION: &str = "Cover";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagOutcome {
    pub tags_ok: bool,
    pub art_ok: bool,
}

/// Writes a track's identity into the file's embedded tags.
pub trait TagWriter {
    async fn write_tags(&self, path: &Path, track: &TrackInfo) -> Result<TagOutcome, TagError>;
}

/// ID3v2 writer that optionally downloads and embeds the front cover.
pub struct Id3TagWriter<F> {
    fetcher: F,
    embed_art: bool,
}

impl<F: ArtFetcher> Id3TagWriter<F> {
    pub fn new(fetcher: F, embed_art: bool) -> Self {
        Self { fetcher, embed_art }
    }

    /// Download the cover and wrap it in a front-cover picture frame.
    /// Any download failure is reported as `None`.
    async fn cover_picture(&self, url: &str, path: &Path) -> Option<Picture> {
        match self.fetcher.fetch(url).await {
            Ok(data) => Some(Picture {
                mime_type: sniff_image_mime(&data).to_string(),
                picture_type: PictureType::CoverFront,
                description: COVER_DESCRIPTION.to_string(),
                data,
            }),
            Err(err) => {
                tracing::debug!(path = %path.display(), url, error = %err, "cover download failed");
                None
            }
        }
    }
}

/// Tags are only written into files that parse as an MPEG audio stream.
/// Empty, truncated or foreign files fail here before anything is written.
fn ensure_mpeg(path: &Path) -> Result<(), TagError> {
    let tagged = lofty::read_from_path(path).map_err(|source| TagError::Probe {
        path: path.to_path_buf(),
        source,
    })?;
    match tagged.file_type() {
        FileType::Mpeg => Ok(()),
        other => Err(TagError::NotMpeg {
            path: path.to_path_buf(),
            found: format!("{other:?}"),
        }),
    }
}

/// Load the file's tag, starting from an empty one when the file has none.
fn open_tag(path: &Path) -> Result<Tag, TagError> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(err) if matches!(err.kind, ErrorKind::NoTag) => Ok(Tag::new()),
        Err(source) => Err(TagError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl<F: ArtFetcher> TagWriter for Id3TagWriter<F> {
    async fn write_tags(&self, path: &Path, track: &TrackInfo) -> Result<TagOutcome, TagError> {
        ensure_mpeg(path)?;
        let mut tag = open_tag(path)?;

        // Full replace: stale identity frames never survive a rewrite.
        tag.remove_title();
        tag.remove_artist();
        tag.remove_album();
        tag.remove_all_pictures();

        tag.set_title(track.title.as_str());
        tag.set_artist(track.artist.as_str());
        if let Some(album) = &track.album {
            tag.set_album(album.as_str());
        }

        let mut art_ok = false;
        if let Some(url) = track.cover_url.as_deref().filter(|_| self.embed_art) {
            if let Some(picture) = self.cover_picture(url, path).await {
                tag.add_frame(picture);
                art_ok = true;
            }
        }

        tag.write_to_path(path, WRITE_VERSION)
            .map_err(|source| TagError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(TagOutcome {
            tags_ok: true,
            art_ok,
        })
    }
}
