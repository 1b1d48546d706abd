//! Recording test double for [`Backend`].

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::error::BackendError;
use crate::library::TrackId;

use super::gateway::Backend;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Play(TrackId),
    Pause,
    Stop,
    Seek(f64),
    Volume(f32),
    Speed(f32),
    Cover(TrackId),
    Position,
    Preload(TrackId),
}

impl Call {
    /// Commands that move the transport, as opposed to queries and hints.
    pub(crate) fn is_transport(&self) -> bool {
        matches!(
            self,
            Call::Play(_) | Call::Pause | Call::Stop | Call::Seek(_)
        )
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    failing: RefCell<HashSet<&'static str>>,
    cover: RefCell<Option<Vec<u8>>>,
    position: Cell<f64>,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every future call of `command` fail.
    pub(crate) fn fail(&self, command: &'static str) {
        self.failing.borrow_mut().insert(command);
    }

    pub(crate) fn heal(&self, command: &'static str) {
        self.failing.borrow_mut().remove(command);
    }

    pub(crate) fn set_cover(&self, cover: Option<Vec<u8>>) {
        *self.cover.borrow_mut() = cover;
    }

    pub(crate) fn set_reported_position(&self, position: f64) {
        self.position.set(position);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn transport_calls(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.is_transport())
            .cloned()
            .collect()
    }

    pub(crate) fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, command: &'static str, call: Call) -> Result<(), BackendError> {
        self.calls.borrow_mut().push(call);
        if self.failing.borrow().contains(command) {
            Err(BackendError::command(command, "injected failure"))
        } else {
            Ok(())
        }
    }
}

impl Backend for RecordingBackend {
    async fn play_track(&self, track_id: TrackId) -> Result<(), BackendError> {
        self.record("play_track", Call::Play(track_id))
    }

    async fn pause_playback(&self) -> Result<(), BackendError> {
        self.record("pause_playback", Call::Pause)
    }

    async fn stop_playback(&self) -> Result<(), BackendError> {
        self.record("stop_playback", Call::Stop)
    }

    async fn seek_to_position(&self, position: f64) -> Result<(), BackendError> {
        self.record("seek_to_position", Call::Seek(position))
    }

    async fn set_volume(&self, volume: f32) -> Result<(), BackendError> {
        self.record("set_volume", Call::Volume(volume))
    }

    async fn set_playback_speed(&self, speed: f32) -> Result<(), BackendError> {
        self.record("set_playback_speed", Call::Speed(speed))
    }

    async fn get_track_cover(&self, track_id: TrackId) -> Result<Option<Vec<u8>>, BackendError> {
        self.record("get_track_cover", Call::Cover(track_id))?;
        Ok(self.cover.borrow().clone())
    }

    async fn get_position(&self) -> Result<f64, BackendError> {
        self.record("get_position", Call::Position)?;
        Ok(self.position.get())
    }

    async fn preload_track(&self, track_id: TrackId) -> Result<(), BackendError> {
        self.record("preload_track", Call::Preload(track_id))
    }
}
