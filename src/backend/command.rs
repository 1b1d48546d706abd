//! Wire form of backend requests.
//!
//! A `BackendCmd` carries its own reply slot; the engine answers by sending
//! on it. Dropping the slot without answering reads as a disconnect.

use futures::channel::oneshot;

use crate::error::BackendError;
use crate::library::TrackId;

pub type Reply<T> = oneshot::Sender<Result<T, BackendError>>;

#[derive(Debug)]
pub enum BackendCmd {
    /// Load and start the given track from the beginning.
    PlayTrack { track_id: TrackId, reply: Reply<()> },
    /// Toggle pause/resume.
    PausePlayback { reply: Reply<()> },
    /// Stop and unload.
    StopPlayback { reply: Reply<()> },
    /// Jump to an absolute position in seconds.
    SeekToPosition { position: f64, reply: Reply<()> },
    SetVolume { volume: f32, reply: Reply<()> },
    SetPlaybackSpeed { speed: f32, reply: Reply<()> },
    GetTrackCover {
        track_id: TrackId,
        reply: Reply<Option<Vec<u8>>>,
    },
    GetPosition { reply: Reply<f64> },
    PreloadTrack { track_id: TrackId, reply: Reply<()> },
}

impl BackendCmd {
    /// Command name as the engine documents it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayTrack { .. } => "play_track",
            Self::PausePlayback { .. } => "pause_playback",
            Self::StopPlayback { .. } => "stop_playback",
            Self::SeekToPosition { .. } => "seek_to_position",
            Self::SetVolume { .. } => "set_volume",
            Self::SetPlaybackSpeed { .. } => "set_playback_speed",
            Self::GetTrackCover { .. } => "get_track_cover",
            Self::GetPosition { .. } => "get_position",
            Self::PreloadTrack { .. } => "preload_track",
        }
    }
}
