use super::*;
use crate::config::TrackDisplayField;

fn song() -> Track {
    Track::new(1, "/tmp/music/Song.mp3")
        .with_title("Song")
        .with_artist("  Artist  ")
}

#[test]
fn display_from_fields_can_format_artist_title() {
    let t = song();
    assert_eq!(
        display_from_fields(&t, &[TrackDisplayField::Artist, TrackDisplayField::Title], " - "),
        "Artist - Song"
    );
}

#[test]
fn display_from_fields_skips_missing_fields() {
    let t = Track::new(2, "/tmp/music/Song.mp3").with_title("Song");
    assert_eq!(
        display_from_fields(
            &t,
            &[TrackDisplayField::Artist, TrackDisplayField::Title, TrackDisplayField::Album],
            " - ",
        ),
        "Song"
    );
}

#[test]
fn display_from_fields_falls_back_to_file_stem() {
    let t = Track::new(3, "/tmp/music/untitled.flac");
    assert_eq!(display_from_fields(&t, &[TrackDisplayField::Artist], " - "), "untitled");
    assert_eq!(t.format, "flac");
}

#[test]
fn memory_library_resolves_known_ids_only() {
    let mut lib = MemoryLibrary::new([song()]);
    let found = async_io::block_on(lib.track(TrackId(1))).unwrap();
    assert_eq!(found.map(|t| t.id), Some(TrackId(1)));

    let missing = async_io::block_on(lib.track(TrackId(99))).unwrap();
    assert!(missing.is_none());

    lib.upsert(song().with_title("Renamed"));
    let renamed = async_io::block_on(lib.track(TrackId(1))).unwrap().unwrap();
    assert_eq!(renamed.title.as_deref(), Some("Renamed"));
    assert_eq!(lib.len(), 1);
}
