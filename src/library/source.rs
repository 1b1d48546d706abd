use std::collections::HashMap;

use crate::error::LibraryError;

use super::model::{Track, TrackId};

/// Lookup contract for the catalog collaborator.
///
/// Lookups may suspend (the catalog usually lives behind a database or an
/// RPC). A missing id is `Ok(None)`, not an error.
#[allow(async_fn_in_trait)]
pub trait Library {
    async fn track(&self, id: TrackId) -> Result<Option<Track>, LibraryError>;
}

/// In-memory catalog, handy for hosts that already hold the full track list.
#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    tracks: HashMap<TrackId, Track>,
}

impl MemoryLibrary {
    pub fn new(tracks: impl IntoIterator<Item = Track>) -> Self {
        Self {
            tracks: tracks.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    /// Insert or replace the canonical record for `track.id`.
    pub fn upsert(&mut self, track: Track) {
        self.tracks.insert(track.id, track);
    }

    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        self.tracks.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Library for MemoryLibrary {
    async fn track(&self, id: TrackId) -> Result<Option<Track>, LibraryError> {
        Ok(self.tracks.get(&id).cloned())
    }
}
