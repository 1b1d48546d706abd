use crate::library::{Track, TrackId};

/// The track collections the player navigates and resolves ids against.
///
/// The active list is the playlist when one is open, else the album, else
/// the full library.
#[derive(Debug, Clone, Default)]
pub struct TrackView {
    library: Vec<Track>,
    playlist: Option<Vec<Track>>,
    album: Option<Vec<Track>>,
}

impl TrackView {
    pub fn new(library: Vec<Track>) -> Self {
        Self {
            library,
            playlist: None,
            album: None,
        }
    }

    pub fn library(&self) -> &[Track] {
        &self.library
    }

    pub fn playlist(&self) -> Option<&[Track]> {
        self.playlist.as_deref()
    }

    pub fn album(&self) -> Option<&[Track]> {
        self.album.as_deref()
    }

    pub fn set_library(&mut self, tracks: Vec<Track>) {
        self.library = tracks;
    }

    pub fn set_playlist(&mut self, tracks: Option<Vec<Track>>) {
        self.playlist = tracks;
    }

    pub fn set_album(&mut self, tracks: Option<Vec<Track>>) {
        self.album = tracks;
    }

    pub fn active(&self) -> &[Track] {
        self.playlist
            .as_deref()
            .or(self.album.as_deref())
            .unwrap_or(&self.library)
    }

    pub fn active_ids(&self) -> Vec<TrackId> {
        self.active().iter().map(|t| t.id).collect()
    }

    /// Resolution order for queue insertion: playlist, album, library.
    pub fn sources(&self) -> Vec<&[Track]> {
        let mut sources: Vec<&[Track]> = Vec::with_capacity(3);
        if let Some(p) = self.playlist.as_deref() {
            sources.push(p);
        }
        if let Some(a) = self.album.as_deref() {
            sources.push(a);
        }
        sources.push(&self.library);
        sources
    }

    pub fn find(&self, id: TrackId) -> Option<&Track> {
        self.sources()
            .into_iter()
            .find_map(|source| source.iter().find(|t| t.id == id))
    }
}
