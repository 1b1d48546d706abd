use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_io::{Timer, block_on};
use log::{info, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::events::{BackendEvent, EventHub, PlayPauseIntent};
use crate::library::Track;
use crate::player::{RepeatMode, TransportState};

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const SHUTDOWN_POLL: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct SharedState {
    playback: TransportState,
    track_id: Option<OwnedObjectPath>,
    title: Option<String>,
    artist: Vec<String>,
    album: Option<String>,
    length_micros: Option<i64>,
    position_micros: i64,
    shuffle: bool,
    repeat: RepeatMode,
}

/// Writer side of the published now-playing state.
#[derive(Clone)]
pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: TransportState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Publish `track` (or clear it). `title` is the composed display title.
    pub fn set_track_metadata(&self, track: Option<&Track>, title: Option<String>) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        s.track_id = track.and_then(|t| {
            ObjectPath::try_from(format!("{OBJECT_PATH}/track/{}", track_path_segment(t)))
                .ok()
                .map(OwnedObjectPath::from)
        });
        s.title = track.and(title);
        s.artist = track
            .and_then(|t| t.artist.clone())
            .into_iter()
            .collect();
        s.album = track.and_then(|t| t.album.clone());
        s.length_micros = track.and_then(|t| t.duration).map(secs_to_micros);
    }

    pub fn set_position(&self, secs: f64) {
        if let Ok(mut s) = self.state.lock() {
            s.position_micros = secs_to_micros(secs);
        }
    }

    pub fn set_shuffle(&self, shuffle: bool) {
        if let Ok(mut s) = self.state.lock() {
            s.shuffle = shuffle;
        }
    }

    pub fn set_repeat(&self, repeat: RepeatMode) {
        if let Ok(mut s) = self.state.lock() {
            s.repeat = repeat;
        }
    }
}

/// D-Bus object paths only allow `[A-Za-z0-9_]`; negative ids get a prefix.
fn track_path_segment(track: &Track) -> String {
    if track.id.0 < 0 {
        format!("n{}", track.id.0.unsigned_abs())
    } else {
        track.id.0.to_string()
    }
}

fn secs_to_micros(secs: f64) -> i64 {
    if secs.is_finite() {
        (secs.max(0.0) * 1_000_000.0).round() as i64
    } else {
        0
    }
}

fn micros_to_secs(micros: i64) -> f64 {
    micros.max(0) as f64 / 1_000_000.0
}

struct RootIface {
    identity: String,
    shutdown: Arc<AtomicBool>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // Headless engine; nothing to raise.
    }

    fn quit(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> String {
        self.identity.clone()
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    hub: EventHub,
    state: Arc<Mutex<SharedState>>,
}

impl PlayerIface {
    fn emit(&self, event: BackendEvent) {
        if self.hub.emit(event.clone()) == 0 {
            warn!("MPRIS: nobody is listening for {}", event.channel().name());
        }
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        self.emit(BackendEvent::MediaControlNext);
    }

    fn previous(&self) {
        self.emit(BackendEvent::MediaControlPrevious);
    }

    fn play(&self) {
        self.emit(BackendEvent::MediaControlPlayPause(PlayPauseIntent::Play));
    }

    fn pause(&self) {
        self.emit(BackendEvent::MediaControlPlayPause(PlayPauseIntent::Pause));
    }

    fn play_pause(&self) {
        self.emit(BackendEvent::MediaControlPlayPause(PlayPauseIntent::Toggle));
    }

    fn stop(&self) {
        self.emit(BackendEvent::MediaControlStop);
    }

    /// `offset` is relative, in microseconds.
    fn seek(&self, offset: i64) {
        let Ok(s) = self.state.lock() else {
            return;
        };
        if s.track_id.is_none() {
            return;
        }
        let target = s.position_micros.saturating_add(offset);
        drop(s);
        self.emit(BackendEvent::MediaControlSeek(micros_to_secs(target)));
    }

    /// Absolute seek; ignored unless `track_id` is the current track.
    fn set_position(&self, track_id: ObjectPath<'_>, position: i64) {
        let Ok(s) = self.state.lock() else {
            return;
        };
        let current = s.track_id.as_ref().map(|p| p.as_str() == track_id.as_str());
        let out_of_range = position < 0 || s.length_micros.is_some_and(|len| position > len);
        drop(s);
        if current == Some(true) && !out_of_range {
            self.emit(BackendEvent::MediaControlSeek(micros_to_secs(position)));
        }
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            TransportState::Idle | TransportState::Stopped => "Stopped",
            TransportState::Playing => "Playing",
            TransportState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn loop_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "None";
        };
        match s.repeat {
            RepeatMode::Off => "None",
            RepeatMode::List => "Playlist",
            RepeatMode::Track => "Track",
        }
    }

    #[zbus(property)]
    fn shuffle(&self) -> bool {
        self.state.lock().map(|s| s.shuffle).unwrap_or(false)
    }

    #[zbus(property)]
    fn position(&self) -> i64 {
        self.state.lock().map(|s| s.position_micros).unwrap_or(0)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let mut put = |key: &str, value: Value<'_>| {
            if let Ok(v) = OwnedValue::try_from(value) {
                map.insert(key.to_string(), v);
            }
        };

        if let Some(path) = s.track_id.clone() {
            put("mpris:trackid", Value::from(path.into_inner()));
        }
        if let Some(title) = s.title.clone() {
            put("xesam:title", Value::from(title));
        }
        if !s.artist.is_empty() {
            put("xesam:artist", Value::from(s.artist.clone()));
        }
        if let Some(album) = s.album.clone() {
            put("xesam:album", Value::from(album));
        }
        if let Some(len) = s.length_micros {
            put("mpris:length", Value::from(len));
        }
        map
    }
}

/// Register `org.mpris.MediaPlayer2.<identity>` on the session bus from a
/// background thread. Media-key calls are emitted on `hub`; `Quit` sets
/// `shutdown`. The thread exits once `shutdown` is set.
pub fn spawn_mpris(hub: EventHub, shutdown: Arc<AtomicBool>, identity: String) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            let name = format!("org.mpris.MediaPlayer2.{identity}");
            if let Err(e) = connection.request_name(name.as_str()).await {
                warn!("MPRIS: failed to acquire {name}: {e}");
                return;
            }

            let object_server = connection.object_server();

            let root = RootIface {
                identity,
                shutdown: shutdown.clone(),
            };
            if let Err(e) = object_server.at(OBJECT_PATH, root).await {
                warn!("MPRIS: failed to register root iface: {e}");
                return;
            }

            let player = PlayerIface {
                hub,
                state: state_for_thread,
            };
            if let Err(e) = object_server.at(OBJECT_PATH, player).await {
                warn!("MPRIS: failed to register player iface: {e}");
                return;
            }

            info!("MPRIS: serving {name}");
            while !shutdown.load(Ordering::SeqCst) {
                Timer::after(SHUTDOWN_POLL).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
