use super::*;
use crate::config::RecognizerSettings;
use crate::error::RecognizeError;
use serde_json::json;

fn queen_payload() -> serde_json::Value {
    json!({
        "matches": [{"id": "1"}],
        "track": {
            "title": "Bohemian Rhapsody",
            "subtitle": "Queen",
            "images": {
                "background": "http://x/bg.jpg",
                "coverart": "http://x/small.jpg",
                "coverarthq": "http://x/cover.jpg"
            },
            "sections": [
                {
                    "type": "SONG",
                    "metadata": [
                        {"title": "Album", "text": "A Night at the Opera"},
                        {"title": "Label", "text": "EMI"}
                    ]
                },
                {"type": "LYRICS", "text": ["Is this the real life?"]}
            ]
        }
    })
}

#[test]
fn extracts_full_track_info() {
    let info = extract_track_info(&queen_payload()).unwrap();
    assert_eq!(
        info,
        TrackInfo {
            artist: "Queen".into(),
            title: "Bohemian Rhapsody".into(),
            album: Some("A Night at the Opera".into()),
            cover_url: Some("http://x/cover.jpg".into()),
        }
    );
}

#[test]
fn missing_or_blank_title_or_artist_is_unusable() {
    assert!(extract_track_info(&json!({})).is_none());
    assert!(extract_track_info(&json!({"track": {"title": "Song"}})).is_none());
    assert!(extract_track_info(&json!({"track": {"subtitle": "Artist"}})).is_none());
    assert!(extract_track_info(&json!({"track": {"title": "", "subtitle": "A"}})).is_none());
    assert!(extract_track_info(&json!({"track": {"title": "  \t", "subtitle": "A"}})).is_none());
}

#[test]
fn extraction_survives_any_shape() {
    let shapes = [
        json!(null),
        json!(42),
        json!("track"),
        json!([1, 2, 3]),
        json!({"track": null}),
        json!({"track": []}),
        json!({"track": {"title": 7, "subtitle": "A"}}),
        json!({"track": {"title": "T", "subtitle": ["A"]}}),
        json!({"track": {"title": "T", "subtitle": "A", "sections": "nope", "images": 3}}),
        json!({"track": {"title": "T", "subtitle": "A", "sections": [null, 1, {"metadata": {"a": 1}}, {"metadata": [null, {"title": 5}]}]}}),
    ];
    for shape in &shapes {
        let _ = extract_track_info(shape);
    }

    let odd = json!({"track": {"title": "T", "subtitle": "A", "sections": [null, {"metadata": [7]}], "images": []}});
    let info = extract_track_info(&odd).unwrap();
    assert_eq!(info.album, None);
    assert_eq!(info.cover_url, None);
}

#[test]
fn normalizes_whitespace_in_text_fields() {
    let payload = json!({
        "track": {
            "title": "  Bohemian   Rhapsody ",
            "subtitle": "Queen\n",
            "sections": [{"metadata": [{"title": " album ", "text": " A  Night\tat the Opera "}]}]
        }
    });
    let info = extract_track_info(&payload).unwrap();
    assert_eq!(info.title, "Bohemian Rhapsody");
    assert_eq!(info.artist, "Queen");
    assert_eq!(info.album.as_deref(), Some("A Night at the Opera"));
}

#[test]
fn last_section_with_album_wins() {
    let payload = json!({
        "track": {
            "title": "T",
            "subtitle": "A",
            "sections": [
                {"metadata": [{"title": "Album", "text": "First"}, {"title": "ALBUM", "text": "Ignored"}]},
                {"metadata": [{"title": "Released", "text": "1975"}]},
                {"metadata": [{"title": "album", "text": "Second"}]}
            ]
        }
    });
    let info = extract_track_info(&payload).unwrap();
    assert_eq!(info.album.as_deref(), Some("Second"));
}

#[test]
fn cover_url_preference_order() {
    let with = |images: serde_json::Value| {
        let payload = json!({"track": {"title": "T", "subtitle": "A", "images": images}});
        extract_track_info(&payload).unwrap().cover_url
    };
    assert_eq!(
        with(json!({"coverart": "c", "background": "b"})).as_deref(),
        Some("c")
    );
    assert_eq!(with(json!({"background": "b"})).as_deref(), Some("b"));
    assert_eq!(
        with(json!({"coverarthq": "", "coverart": "c"})).as_deref(),
        Some("c")
    );
    assert_eq!(with(json!({})), None);
}

#[test]
fn find_program_resolves_explicit_paths() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("recognize");
    std::fs::write(&bin, b"").unwrap();

    assert_eq!(find_program(bin.to_str().unwrap()), Some(bin.clone()));
    assert_eq!(
        find_program(dir.path().join("absent").to_str().unwrap()),
        None
    );
    assert_eq!(find_program("tunetag-no-such-program-on-path"), None);
}

#[cfg(unix)]
fn shell_recognizer(script: &str) -> CommandRecognizer {
    CommandRecognizer::new(&RecognizerSettings {
        program: "sh".into(),
        args: vec!["-c".into(), script.into()],
        timeout_secs: 5.0,
    })
}

#[cfg(unix)]
#[tokio::test]
async fn command_recognizer_parses_stdout_json() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("song.mp3");
    std::fs::write(&audio, queen_payload().to_string()).unwrap();

    // The audio path arrives as `$0`.
    let recognizer = shell_recognizer("cat \"$0\"");
    assert!(recognizer.is_available());

    let payload = recognizer.recognize(&audio).await.unwrap();
    let info = extract_track_info(&payload).unwrap();
    assert_eq!(info.artist, "Queen");
}

#[cfg(unix)]
#[tokio::test]
async fn command_recognizer_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("song.mp3");
    std::fs::write(&audio, b"not json").unwrap();

    let failing = shell_recognizer("echo boom >&2; exit 3");
    match failing.recognize(&audio).await {
        Err(RecognizeError::Failed { stderr, .. }) => assert_eq!(stderr, "boom"),
        other => panic!("unexpected result: {other:?}"),
    }

    let garbage = shell_recognizer("cat \"$0\"");
    assert!(matches!(
        garbage.recognize(&audio).await,
        Err(RecognizeError::InvalidJson(_))
    ));

    let missing = CommandRecognizer::new(&RecognizerSettings {
        program: "tunetag-no-such-program-on-path".into(),
        ..RecognizerSettings::default()
    });
    assert!(!missing.is_available());
    assert!(matches!(
        missing.recognize(&audio).await,
        Err(RecognizeError::Spawn { .. })
    ));
}

#[test]
fn wrongly_typed_optional_fields_are_dropped_not_fatal() {
    let payload = json!({
        "track": {
            "title": "T",
            "subtitle": "A",
            "images": 3,
            "sections": [{"metadata": [{"title": "Album", "text": 1975}]}]
        }
    });
    let info = extract_track_info(&payload).unwrap();
    assert_eq!(info.title, "T");
    assert_eq!(info.artist, "A");
    assert_eq!(info.album, None);
    assert_eq!(info.cover_url, None);
}
