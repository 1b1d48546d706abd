use std::sync::mpsc::Sender;

use futures::channel::oneshot;

use crate::error::BackendError;
use crate::library::TrackId;

use super::command::{BackendCmd, Reply};
use super::gateway::Backend;

/// Gateway that forwards each command to an engine thread over a channel and
/// awaits the engine's reply.
#[derive(Debug, Clone)]
pub struct ChannelBackend {
    tx: Sender<BackendCmd>,
}

impl ChannelBackend {
    pub fn new(tx: Sender<BackendCmd>) -> Self {
        Self { tx }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Reply<T>) -> BackendCmd,
    ) -> Result<T, BackendError> {
        let (reply, rx) = oneshot::channel();
        let cmd = make(reply);
        let name = cmd.name();
        log::debug!("backend <- {name}");

        self.tx.send(cmd).map_err(|_| BackendError::Disconnected)?;
        rx.await.map_err(|_| BackendError::Disconnected)?
    }
}

impl Backend for ChannelBackend {
    async fn play_track(&self, track_id: TrackId) -> Result<(), BackendError> {
        self.request(|reply| BackendCmd::PlayTrack { track_id, reply })
            .await
    }

    async fn pause_playback(&self) -> Result<(), BackendError> {
        self.request(|reply| BackendCmd::PausePlayback { reply }).await
    }

    async fn stop_playback(&self) -> Result<(), BackendError> {
        self.request(|reply| BackendCmd::StopPlayback { reply }).await
    }

    async fn seek_to_position(&self, position: f64) -> Result<(), BackendError> {
        self.request(|reply| BackendCmd::SeekToPosition { position, reply })
            .await
    }

    async fn set_volume(&self, volume: f32) -> Result<(), BackendError> {
        self.request(|reply| BackendCmd::SetVolume { volume, reply })
            .await
    }

    async fn set_playback_speed(&self, speed: f32) -> Result<(), BackendError> {
        self.request(|reply| BackendCmd::SetPlaybackSpeed { speed, reply })
            .await
    }

    async fn get_track_cover(&self, track_id: TrackId) -> Result<Option<Vec<u8>>, BackendError> {
        self.request(|reply| BackendCmd::GetTrackCover { track_id, reply })
            .await
    }

    async fn get_position(&self) -> Result<f64, BackendError> {
        self.request(|reply| BackendCmd::GetPosition { reply }).await
    }

    async fn preload_track(&self, track_id: TrackId) -> Result<(), BackendError> {
        self.request(|reply| BackendCmd::PreloadTrack { track_id, reply })
            .await
    }
}
