/// Characters that are not allowed in file names on common filesystems.
const RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const FALLBACK_NAME: &str = "untitled";

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace, then strip trailing spaces and periods.
fn tidy(text: &str) -> String {
    collapse_whitespace(text)
        .trim_end_matches([' ', '.'])
        .to_string()
}

/// Rewrite every hyphen, together with the whitespace around it, as `" - "`.
fn normalize_separators(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for (i, part) in text.split('-').enumerate() {
        if i > 0 {
            out.truncate(out.trim_end().len());
            out.push_str(" - ");
            out.push_str(part.trim_start());
        } else {
            out.push_str(part);
        }
    }
    out
}

/// Turn arbitrary text into a name that is safe on any common filesystem.
///
/// Never returns an empty string and never returns a name containing one of
/// `< > : " / \ | ? *`.
pub fn sanitize(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if RESERVED.contains(&c) { ' ' } else { c })
        .collect();

    let name = tidy(&normalize_separators(&tidy(&replaced)));

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// Build `"{artist} - {title}[ - {album}].mp3"` and sanitize the whole string.
///
/// Expects already-normalized fields (see `identify::extract_track_info`).
pub fn build_target_filename(artist: &str, title: &str, album: Option<&str>) -> String {
    let base = match album {
        Some(album) if !album.is_empty() => format!("{artist} - {title} - {album}.mp3"),
        _ => format!("{artist} - {title}.mp3"),
    };
    sanitize(&base)
}
