//! Persisted-session snapshot.
//!
//! The engine only produces and consumes the snapshot; writing it somewhere
//! is the host's job.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::library::Track;
use crate::player::RepeatMode;
use crate::queue::QueueEntry;

/// Exactly the fields that survive a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub volume: f32,
    pub shuffle_enabled: bool,
    pub repeat_mode: RepeatMode,
    pub position: f64,
    pub playback_speed: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_track: Option<Track>,
    #[serde(default)]
    pub queue: Vec<QueueEntry>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            volume: 1.0,
            shuffle_enabled: false,
            repeat_mode: RepeatMode::Off,
            position: 0.0,
            playback_speed: 1.0,
            current_track: None,
            queue: Vec::new(),
        }
    }
}

impl SessionSnapshot {
    pub fn to_toml(&self) -> Result<String, SessionError> {
        Ok(toml::to_string(self)?)
    }

    pub fn from_toml(s: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(s)?)
    }
}
