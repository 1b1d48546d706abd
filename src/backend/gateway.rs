use crate::error::BackendError;
use crate::library::TrackId;

/// Commands the engine understands.
///
/// Implementations must not block the caller beyond the round trip itself.
/// Positions are seconds.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn play_track(&self, track_id: TrackId) -> Result<(), BackendError>;

    /// Toggles pause in the engine.
    async fn pause_playback(&self) -> Result<(), BackendError>;

    async fn stop_playback(&self) -> Result<(), BackendError>;

    async fn seek_to_position(&self, position: f64) -> Result<(), BackendError>;

    async fn set_volume(&self, volume: f32) -> Result<(), BackendError>;

    async fn set_playback_speed(&self, speed: f32) -> Result<(), BackendError>;

    /// Cover art bytes, `None` when the track has none.
    async fn get_track_cover(&self, track_id: TrackId) -> Result<Option<Vec<u8>>, BackendError>;

    /// Position the engine reports for the loaded track.
    async fn get_position(&self) -> Result<f64, BackendError>;

    /// Hint that `track_id` plays next so the engine can open it early.
    async fn preload_track(&self, track_id: TrackId) -> Result<(), BackendError>;
}
