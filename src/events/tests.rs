use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;

use async_io::block_on;

use super::*;
use crate::backend::fake::{Call, RecordingBackend};
use crate::error::BackendError;
use crate::library::{MemoryLibrary, Track, TrackId};
use crate::player::{Player, PlayerOptions};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn player() -> Player<RecordingBackend, MemoryLibrary> {
    let tracks: Vec<Track> = (1..=3)
        .map(|id| Track::new(id, format!("/music/{id}.mp3")).with_duration(200.0))
        .collect();
    let mut p = Player::with_options(
        RecordingBackend::new(),
        MemoryLibrary::new(tracks.clone()),
        PlayerOptions {
            gapless_preload: false,
            ..PlayerOptions::default()
        },
    );
    p.set_library_tracks(tracks);
    p
}

fn playing(id: i64) -> Player<RecordingBackend, MemoryLibrary> {
    let mut p = player();
    block_on(p.play_track(TrackId(id))).unwrap();
    p.backend().clear();
    p
}

/// Source that refuses some channels and whose disposers can fail.
#[derive(Default)]
struct FlakySource {
    refuse: HashSet<EventChannel>,
    failing_dispose: HashSet<EventChannel>,
    disposed: Arc<AtomicUsize>,
}

impl EventSource for FlakySource {
    fn subscribe(
        &self,
        channel: EventChannel,
        _sink: Sender<BackendEvent>,
    ) -> Result<Subscription, BackendError> {
        if self.refuse.contains(&channel) {
            return Err(BackendError::command("listen", "refused"));
        }
        let fail = self.failing_dispose.contains(&channel);
        let disposed = self.disposed.clone();
        Ok(Subscription::new(channel, move || {
            disposed.fetch_add(1, Ordering::SeqCst);
            if fail {
                Err(BackendError::command("unlisten", "gone"))
            } else {
                Ok(())
            }
        }))
    }
}

#[test]
fn channel_names_are_the_wire_names() {
    let names: Vec<_> = EventChannel::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec![
            "playback-state-changed",
            "media-control-next",
            "media-control-previous",
            "media-control-seek",
            "media-control-stop",
            "media-control-play-pause",
        ]
    );
    assert_eq!(
        BackendEvent::MediaControlSeek(1.0).channel(),
        EventChannel::MediaControlSeek
    );
}

#[test]
fn hub_delivers_to_listeners_of_the_event_channel_only() {
    let hub = EventHub::new();
    let (tx, rx) = mpsc::channel();
    let _subs = connect(&hub, &tx);

    assert_eq!(hub.emit(BackendEvent::MediaControlNext), 1);
    assert_eq!(rx.try_recv().unwrap(), BackendEvent::MediaControlNext);
    assert!(rx.try_recv().is_err());
}

#[test]
fn disposing_the_set_unsubscribes_every_channel() {
    let hub = EventHub::new();
    let (tx, rx) = mpsc::channel();
    let mut subs = connect(&hub, &tx);
    assert_eq!(subs.len(), EventChannel::ALL.len());

    assert_eq!(subs.dispose(), 0);
    assert!(subs.is_empty());
    for channel in EventChannel::ALL {
        assert_eq!(hub.listener_count(channel), 0);
    }
    assert_eq!(hub.emit(BackendEvent::MediaControlStop), 0);
    assert!(rx.try_recv().is_err());

    // Second dispose has nothing left to do.
    assert_eq!(subs.dispose(), 0);
}

#[test]
fn dropping_the_set_unsubscribes() {
    let hub = EventHub::new();
    let (tx, _rx) = mpsc::channel();
    {
        let _subs = connect(&hub, &tx);
        assert_eq!(hub.listener_count(EventChannel::MediaControlNext), 1);
    }
    assert_eq!(hub.listener_count(EventChannel::MediaControlNext), 0);
}

#[test]
fn hub_prunes_listeners_whose_receiver_is_gone() {
    let hub = EventHub::new();
    let (tx, rx) = mpsc::channel();
    let subs = connect(&hub, &tx);
    drop(rx);

    assert_eq!(hub.emit(BackendEvent::PlaybackStateChanged(true)), 0);
    assert_eq!(hub.listener_count(EventChannel::PlaybackStateChanged), 0);
    drop(subs);
}

#[test]
fn unsubscribe_after_hub_is_gone_reports_disconnected() {
    let hub = EventHub::new();
    let (tx, _rx) = mpsc::channel();
    let sub = hub.subscribe(EventChannel::MediaControlNext, tx).unwrap();
    drop(hub);

    assert_eq!(sub.unsubscribe(), Err(BackendError::Disconnected));
}

#[test]
fn connect_tolerates_partial_failure() {
    init_logger();
    let source = FlakySource {
        refuse: [EventChannel::MediaControlSeek].into_iter().collect(),
        failing_dispose: [EventChannel::MediaControlNext, EventChannel::MediaControlStop]
            .into_iter()
            .collect(),
        ..FlakySource::default()
    };
    let (tx, _rx) = mpsc::channel();

    let mut subs = connect(&source, &tx);
    assert_eq!(subs.len(), 5);
    assert!(!subs.channels().contains(&EventChannel::MediaControlSeek));

    assert_eq!(subs.dispose(), 2);
    assert_eq!(source.disposed.load(Ordering::SeqCst), 5);
}

#[test]
fn playback_state_changed_drives_flag_and_tracker_without_backend_calls() {
    let mut p = playing(1);

    block_on(dispatch(&mut p, BackendEvent::PlaybackStateChanged(false))).unwrap();
    assert!(!p.state().is_playing);
    assert!(!p.tracker().is_running());

    block_on(dispatch(&mut p, BackendEvent::PlaybackStateChanged(true))).unwrap();
    assert!(p.state().is_playing);
    assert!(p.tracker().is_running());
    assert!(p.backend().calls().is_empty());
}

#[test]
fn media_keys_map_to_navigation() {
    let mut p = playing(2);

    block_on(dispatch(&mut p, BackendEvent::MediaControlNext)).unwrap();
    assert_eq!(p.state().current_id(), Some(TrackId(3)));

    block_on(dispatch(&mut p, BackendEvent::MediaControlPrevious)).unwrap();
    assert_eq!(p.state().current_id(), Some(TrackId(2)));

    block_on(dispatch(&mut p, BackendEvent::MediaControlStop)).unwrap();
    assert!(p.state().current_track().is_none());

    assert_eq!(
        p.backend().transport_calls(),
        vec![Call::Play(TrackId(3)), Call::Play(TrackId(2)), Call::Stop]
    );
}

#[test]
fn media_seek_is_forwarded_without_local_update() {
    let mut p = playing(1);
    p.backend().fail("seek_to_position");

    block_on(dispatch(&mut p, BackendEvent::MediaControlSeek(75.0))).unwrap();
    assert_eq!(p.backend().calls(), vec![Call::Seek(75.0)]);
    assert_eq!(p.state().position(), 0.0);
}

#[test]
fn navigation_failures_surface_from_dispatch() {
    let mut p = playing(1);
    p.backend().fail("play_track");

    let result = block_on(dispatch(&mut p, BackendEvent::MediaControlNext));
    assert!(result.is_err());
    assert_eq!(p.state().current_id(), Some(TrackId(2)));
}

#[test]
fn play_pause_intents_only_act_when_they_change_state() {
    let mut p = playing(1);

    block_on(dispatch(&mut p, BackendEvent::MediaControlPlayPause(PlayPauseIntent::Play))).unwrap();
    assert!(p.backend().calls().is_empty());

    block_on(dispatch(&mut p, BackendEvent::MediaControlPlayPause(PlayPauseIntent::Pause))).unwrap();
    assert!(!p.state().is_playing);

    block_on(dispatch(&mut p, BackendEvent::MediaControlPlayPause(PlayPauseIntent::Pause))).unwrap();
    block_on(dispatch(&mut p, BackendEvent::MediaControlPlayPause(PlayPauseIntent::Toggle))).unwrap();
    assert!(p.state().is_playing);

    assert_eq!(p.backend().calls(), vec![Call::Pause, Call::Pause]);
}

#[test]
fn play_intent_without_current_track_starts_the_active_list() {
    let mut p = player();

    block_on(dispatch(&mut p, BackendEvent::MediaControlPlayPause(PlayPauseIntent::Pause))).unwrap();
    assert!(p.backend().calls().is_empty());

    block_on(dispatch(&mut p, BackendEvent::MediaControlPlayPause(PlayPauseIntent::Toggle))).unwrap();
    assert_eq!(p.state().current_id(), Some(TrackId(1)));
}
