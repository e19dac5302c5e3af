use super::*;
use crate::error::{FetchError, TagError};
use crate::identify::TrackInfo;
use id3::frame::{Picture, PictureType};
use id3::{Tag, TagLike, Version};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];

struct FixedArt {
    bytes: Vec<u8>,
    calls: Cell<usize>,
}

impl FixedArt {
    fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            calls: Cell::new(0),
        }
    }
}

impl ArtFetcher for FixedArt {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.bytes.clone())
    }
}

struct NotFound;

impl ArtFetcher for NotFound {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Status(404))
    }
}

/// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, mono, no padding.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC0];
const FRAME_LEN: usize = 417;

/// Write a short silent MP3 stream with no tag.
fn write_mpeg(path: &Path) {
    let mut frame = vec![0u8; FRAME_LEN];
    frame[..4].copy_from_slice(&FRAME_HEADER);
    fs::write(path, frame.repeat(8)).unwrap();
}

fn queen(cover: Option<&str>) -> TrackInfo {
    TrackInfo {
        artist: "Queen".into(),
        title: "Bohemian Rhapsody".into(),
        album: Some("A Night at the Opera".into()),
        cover_url: cover.map(str::to_string),
    }
}

#[test]
fn sniff_image_mime_recognizes_magic_numbers() {
    assert_eq!(sniff_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
    assert_eq!(sniff_image_mime(PNG_BYTES), "image/png");
    assert_eq!(sniff_image_mime(b"GIF87a...."), "image/gif");
    assert_eq!(sniff_image_mime(b"GIF89a...."), "image/gif");
    assert_eq!(sniff_image_mime(b"RIFF....WEBP"), "application/octet-stream");
    assert_eq!(sniff_image_mime(&[]), "application/octet-stream");
}

#[tokio::test]
async fn writes_text_frames_and_cover_as_id3v23() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    write_mpeg(&path);

    let writer = Id3TagWriter::new(FixedArt::new(PNG_BYTES), true);
    let outcome = writer
        .write_tags(&path, &queen(Some("http://x/cover.png")))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        TagOutcome {
            tags_ok: true,
            art_ok: true
        }
    );

    let tag = Tag::read_from_path(&path).unwrap();
    assert_eq!(tag.version(), Version::Id3v23);
    assert_eq!(tag.title(), Some("Bohemian Rhapsody"));
    assert_eq!(tag.artist(), Some("Queen"));
    assert_eq!(tag.album(), Some("A Night at the Opera"));

    let pictures: Vec<_> = tag.pictures().collect();
    assert_eq!(pictures.len(), 1);
    assert_eq!(pictures[0].picture_type, PictureType::CoverFront);
    assert_eq!(pictures[0].mime_type, "image/png");
    assert_eq!(pictures[0].description, "Cover");
    assert_eq!(pictures[0].data, PNG_BYTES);
}

#[tokio::test]
async fn replaces_existing_frames_instead_of_merging() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    write_mpeg(&path);

    let mut old = Tag::new();
    old.set_title("Old Title");
    old.set_artist("Old Artist");
    old.set_album("Old Album");
    old.set_genre("Rock");
    old.add_frame(Picture {
        mime_type: "image/jpeg".into(),
        picture_type: PictureType::Other,
        description: "old".into(),
        data: vec![0xFF, 0xD8, 0xFF, 0x00],
    });
    old.write_to_path(&path, Version::Id3v24).unwrap();

    let track = TrackInfo {
        album: None,
        ..queen(None)
    };
    let art = FixedArt::new(PNG_BYTES);
    let writer = Id3TagWriter::new(&art, true);
    let outcome = writer.write_tags(&path, &track).await.unwrap();
    assert!(outcome.tags_ok);
    assert!(!outcome.art_ok);
    assert_eq!(art.calls.get(), 0);

    let tag = Tag::read_from_path(&path).unwrap();
    assert_eq!(tag.title(), Some("Bohemian Rhapsody"));
    assert_eq!(tag.artist(), Some("Queen"));
    assert_eq!(tag.album(), None);
    assert_eq!(tag.pictures().count(), 0);
    // Unrelated frames are kept.
    assert_eq!(tag.genre(), Some("Rock"));
}

#[tokio::test]
async fn failed_cover_download_still_writes_text_tags() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    write_mpeg(&path);

    let writer = Id3TagWriter::new(NotFound, true);
    let outcome = writer
        .write_tags(&path, &queen(Some("http://x/missing.jpg")))
        .await
        .unwrap();
    assert!(outcome.tags_ok);
    assert!(!outcome.art_ok);

    let tag = Tag::read_from_path(&path).unwrap();
    assert_eq!(tag.title(), Some("Bohemian Rhapsody"));
    assert_eq!(tag.pictures().count(), 0);
}

#[tokio::test]
async fn disabled_artwork_skips_the_download() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    write_mpeg(&path);

    let art = FixedArt::new(PNG_BYTES);
    let writer = Id3TagWriter::new(&art, false);
    let outcome = writer
        .write_tags(&path, &queen(Some("http://x/cover.png")))
        .await
        .unwrap();
    assert!(!outcome.art_ok);
    assert_eq!(art.calls.get(), 0);
}

#[tokio::test]
async fn unreadable_file_fails_the_whole_write() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("gone.mp3");

    let art = FixedArt::new(PNG_BYTES);
    let writer = Id3TagWriter::new(&art, true);
    let err = writer
        .write_tags(&missing, &queen(Some("http://x/cover.png")))
        .await
        .unwrap_err();
    assert!(matches!(err, TagError::Probe { .. }));
    assert!(err.to_string().contains("gone.mp3"));
    assert_eq!(art.calls.get(), 0);
}

#[tokio::test]
async fn non_mpeg_files_are_rejected_untouched() {
    let dir = tempdir().unwrap();
    let garbage = dir.path().join("garbage.mp3");
    let empty = dir.path().join("empty.mp3");
    let contents: &[u8] = b"this is definitely not an mpeg stream";
    fs::write(&garbage, contents).unwrap();
    fs::write(&empty, b"").unwrap();

    let art = FixedArt::new(PNG_BYTES);
    let writer = Id3TagWriter::new(&art, true);
    for path in [&garbage, &empty] {
        let err = writer
            .write_tags(path, &queen(Some("http://x/cover.png")))
            .await
            .unwrap_err();
        assert!(
            matches!(err, TagError::Probe { .. } | TagError::NotMpeg { .. }),
            "{err}"
        );
    }

    assert_eq!(fs::read(&garbage).unwrap(), contents);
    assert_eq!(fs::read(&empty).unwrap(), b"");
    assert_eq!(art.calls.get(), 0);
}

#[tokio::test]
async fn existing_tag_in_front_of_the_stream_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    write_mpeg(&path);
    let mut old = Tag::new();
    old.set_title("Old Title");
    old.write_to_path(&path, Version::Id3v24).unwrap();

    let writer = Id3TagWriter::new(NotFound, true);
    let outcome = writer.write_tags(&path, &queen(None)).await.unwrap();
    assert!(outcome.tags_ok);

    let tag = Tag::read_from_path(&path).unwrap();
    assert_eq!(tag.title(), Some("Bohemian Rhapsody"));
    assert_eq!(tag.version(), Version::Id3v23);
}
