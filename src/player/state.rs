//! Playback state types: `PlaybackState`, `RepeatMode` and the derived
//! `TransportState`.

use serde::{Deserialize, Serialize};

use crate::config::RepeatModeSetting;
use crate::library::{Track, TrackId};

pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 4.0;

/// What happens when the active list runs out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatMode {
    /// Stop after the last track.
    #[default]
    Off,
    /// Wrap around to the first track.
    List,
    /// Replay the current track indefinitely.
    Track,
}

impl RepeatMode {
    /// `Off -> List -> Track -> Off`.
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::List,
            RepeatMode::List => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Off,
        }
    }
}

impl From<RepeatModeSetting> for RepeatMode {
    fn from(setting: RepeatModeSetting) -> Self {
        match setting {
            RepeatModeSetting::Off => RepeatMode::Off,
            RepeatModeSetting::List => RepeatMode::List,
            RepeatModeSetting::Track => RepeatMode::Track,
        }
    }
}

/// Transport state derived from the playback fields; never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TransportState {
    /// Nothing has played yet.
    #[default]
    Idle,
    Playing,
    Paused,
    /// Cleared by an explicit stop or by running off the end of the list.
    Stopped,
}

/// The shared playback record.
///
/// Position, volume and speed are only reachable through clamping setters so
/// their ranges hold no matter who writes them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    current_track: Option<Track>,
    pub is_playing: bool,
    position: f64,
    volume: f32,
    playback_speed: f32,
    pub shuffle_enabled: bool,
    pub repeat_mode: RepeatMode,
    shuffled_queue: Vec<TrackId>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track: None,
            is_playing: false,
            position: 0.0,
            volume: 1.0,
            playback_speed: 1.0,
            shuffle_enabled: false,
            repeat_mode: RepeatMode::Off,
            shuffled_queue: Vec::new(),
        }
    }
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn current_id(&self) -> Option<TrackId> {
        self.current_track.as_ref().map(|t| t.id)
    }

    /// Replace the current track and re-clamp the position against its
    /// duration.
    pub fn set_current_track(&mut self, track: Option<Track>) {
        self.current_track = track;
        self.set_position(self.position);
    }

    /// Seconds into the current track.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Store `position` clamped to `[0, duration]` (or `>= 0` when the
    /// duration is unknown) and return the stored value.
    pub fn set_position(&mut self, position: f64) -> f64 {
        let mut p = if position.is_nan() { 0.0 } else { position.max(0.0) };
        if let Some(duration) = self
            .current_track
            .as_ref()
            .and_then(|t| t.duration)
            .filter(|d| d.is_finite() && *d >= 0.0)
        {
            p = p.min(duration);
        }
        self.position = p;
        p
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.volume
    }

    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    pub fn set_playback_speed(&mut self, speed: f32) -> f32 {
        self.playback_speed = if speed.is_nan() {
            1.0
        } else {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        };
        self.playback_speed
    }

    /// Shuffled traversal order. Stale (but kept) while shuffle is off.
    pub fn shuffled_queue(&self) -> &[TrackId] {
        &self.shuffled_queue
    }

    pub fn set_shuffled_queue(&mut self, order: Vec<TrackId>) {
        self.shuffled_queue = order;
    }
}
