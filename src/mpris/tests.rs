use super::*;
use crate::events::{EventChannel, EventSource};
use crate::library::TrackId;
use std::sync::mpsc;

fn make_track() -> Track {
    Track::new(7, "/tmp/music/test.mp3")
        .with_title("Test Title")
        .with_artist("Test Artist")
        .with_album("Test Album")
        .with_duration(1.234567)
}

fn iface_with_listener() -> (PlayerIface, Arc<Mutex<SharedState>>, mpsc::Receiver<BackendEvent>) {
    let hub = EventHub::new();
    let (tx, rx) = mpsc::channel();
    for channel in EventChannel::ALL {
        // Listeners stay registered for the hub's lifetime.
        let _ = hub.subscribe(channel, tx.clone()).unwrap();
    }
    let state = Arc::new(Mutex::new(SharedState::default()));
    let iface = PlayerIface {
        hub,
        state: state.clone(),
    };
    (iface, state, rx)
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    let track = make_track();
    handle.set_track_metadata(Some(&track), Some("Test Artist - Test Title".to_string()));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Artist - Test Title"));
        assert_eq!(s.artist, vec!["Test Artist".to_string()]);
        assert_eq!(s.album.as_deref(), Some("Test Album"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track_metadata(None, Some("ignored".to_string()));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.album, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn negative_track_ids_still_form_valid_object_paths() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };
    let mut track = make_track();
    track.id = TrackId(-3);

    handle.set_track_metadata(Some(&track), None);
    assert_eq!(
        state.lock().unwrap().track_id.as_ref().map(|p| p.as_str()),
        Some("/org/mpris/MediaPlayer2/track/n3")
    );
}

#[test]
fn playback_status_maps_transport_to_mpris_strings() {
    let (iface, state, _rx) = iface_with_listener();

    for (transport, expected) in [
        (TransportState::Idle, "Stopped"),
        (TransportState::Stopped, "Stopped"),
        (TransportState::Playing, "Playing"),
        (TransportState::Paused, "Paused"),
    ] {
        state.lock().unwrap().playback = transport;
        assert_eq!(iface.playback_status(), expected);
    }
}

#[test]
fn loop_status_and_shuffle_follow_handle() {
    let (iface, state, _rx) = iface_with_listener();
    let handle = MprisHandle { state };

    handle.set_repeat(RepeatMode::Track);
    handle.set_shuffle(true);
    assert_eq!(iface.loop_status(), "Track");
    assert!(iface.shuffle());

    handle.set_repeat(RepeatMode::List);
    assert_eq!(iface.loop_status(), "Playlist");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (iface, state, _rx) = iface_with_listener();
    MprisHandle { state }.set_track_metadata(Some(&make_track()), Some("Title".to_string()));

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn transport_methods_emit_media_control_events() {
    let (iface, _state, rx) = iface_with_listener();

    iface.next();
    iface.previous();
    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();

    let got: Vec<_> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            BackendEvent::MediaControlNext,
            BackendEvent::MediaControlPrevious,
            BackendEvent::MediaControlPlayPause(PlayPauseIntent::Play),
            BackendEvent::MediaControlPlayPause(PlayPauseIntent::Pause),
            BackendEvent::MediaControlPlayPause(PlayPauseIntent::Toggle),
            BackendEvent::MediaControlStop,
        ]
    );
}

#[test]
fn seek_is_relative_to_published_position() {
    let (iface, state, rx) = iface_with_listener();
    let handle = MprisHandle { state };

    // No track: ignored.
    iface.seek(5_000_000);
    assert!(rx.try_recv().is_err());

    handle.set_track_metadata(Some(&make_track()), None);
    handle.set_position(10.0);
    iface.seek(5_000_000);
    assert_eq!(rx.try_recv().unwrap(), BackendEvent::MediaControlSeek(15.0));

    iface.seek(-60_000_000);
    assert_eq!(rx.try_recv().unwrap(), BackendEvent::MediaControlSeek(0.0));
}

#[test]
fn set_position_requires_matching_track_and_range() {
    let (iface, state, rx) = iface_with_listener();
    MprisHandle { state }.set_track_metadata(Some(&make_track()), None);

    let current = ObjectPath::try_from("/org/mpris/MediaPlayer2/track/7").unwrap();
    let other = ObjectPath::try_from("/org/mpris/MediaPlayer2/track/8").unwrap();

    iface.set_position(other, 500_000);
    iface.set_position(current.clone(), 9_000_000);
    assert!(rx.try_recv().is_err());

    iface.set_position(current, 500_000);
    assert_eq!(rx.try_recv().unwrap(), BackendEvent::MediaControlSeek(0.5));
}

#[test]
fn quit_requests_shutdown() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let root = RootIface {
        identity: "encore".to_string(),
        shutdown: shutdown.clone(),
    };
    assert_eq!(root.identity(), "encore");
    root.quit();
    assert!(shutdown.load(Ordering::SeqCst));
}
