use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display string for `track` according to `fields` and `sep`.
///
/// Empty or missing fields are skipped; when nothing is produced the title
/// (or file stem) is used instead.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mut push = |v: Option<&str>| {
        if let Some(v) = v.map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(v.to_string());
        }
    };

    for f in fields {
        match f {
            TrackDisplayField::Title => push(track.title.as_deref()),
            TrackDisplayField::Artist => push(track.artist.as_deref()),
            TrackDisplayField::Album => push(track.album.as_deref()),
            TrackDisplayField::Genre => push(track.genre.as_deref()),
            TrackDisplayField::Year => push(track.year.map(|y| y.to_string()).as_deref()),
            TrackDisplayField::Filename => {
                push(track.file_path.file_stem().and_then(|s| s.to_str()))
            }
            TrackDisplayField::Path => push(Some(track.file_path.display().to_string().as_str())),
        }
    }

    if parts.is_empty() {
        track.display_title()
    } else {
        parts.join(sep)
    }
}
