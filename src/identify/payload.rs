use serde_json::Value;

use crate::naming::collapse_whitespace;

/// Resolved identity of a track.
///
/// All string fields are whitespace-normalized; `artist` and `title` are never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub artist: String,
    pub title: String,
    pub album: Option<String>,
    pub cover_url: Option<String>,
}

/// Cover image keys in order of preference.
const COVER_KEYS: [&str; 3] = ["coverarthq", "coverart", "background"];

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn normalized(text: &str) -> Option<String> {
    let text = collapse_whitespace(text);
    (!text.is_empty()).then_some(text)
}

/// Scan `track.sections[*].metadata[*]` for an entry titled "album".
///
/// Within a section the first matching entry counts; across sections the
/// last section with a match wins.
fn find_album(track: &Value) -> Option<String> {
    let sections = track.get("sections").and_then(Value::as_array)?;

    let mut album: Option<&str> = None;
    for section in sections {
        let Some(metadata) = section.get("metadata").and_then(Value::as_array) else {
            continue;
        };
        let entry = metadata.iter().find(|entry| {
            entry
                .get("title")
                .and_then(Value::as_str)
                .is_some_and(|title| title.trim().eq_ignore_ascii_case("album"))
        });
        if let Some(text) = entry.and_then(|e| non_empty_str(e.get("text"))) {
            album = Some(text);
        }
    }

    album.and_then(normalized)
}

fn find_cover_url(track: &Value) -> Option<String> {
    let images = track.get("images")?;
    COVER_KEYS
        .iter()
        .find_map(|key| non_empty_str(images.get(*key)))
        .map(str::to_string)
}

/// Turn a raw recognition response into a `TrackInfo`.
///
/// Returns `None` when the payload has no usable title or artist. Never
/// panics, whatever the shape of `payload`.
pub fn extract_track_info(payload: &Value) -> Option<TrackInfo> {
    let track = payload.get("track")?;

    let title = non_empty_str(track.get("title")).and_then(normalized)?;
    let artist = non_empty_str(track.get("subtitle")).and_then(normalized)?;

    Some(TrackInfo {
        artist,
        title,
        album: find_album(track),
        cover_url: find_cover_url(track),
    })
}
