//! The `Player`: the playback state machine and its backend round trips.
//!
//! Every state-changing method applies its local effect first, then talks to
//! the backend and settles the result with a [`RemoteSync`] policy. Local
//! state is never rolled back when the backend fails.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::debug;

use crate::backend::Backend;
use crate::config::Settings;
use crate::error::PlayerError;
use crate::library::{Library, Track, TrackId};
use crate::queue::{InsertPosition, QueueId, QueueStore};
use crate::session::SessionSnapshot;
use crate::shuffle::Shuffler;

use super::navigation::{next_in_order, previous_in_order};
use super::state::{PlaybackState, RepeatMode, TransportState};
use super::sync::RemoteSync;
use super::tracker::PositionTracker;
use super::view::TrackView;

#[derive(Debug, Clone)]
pub struct PlayerOptions {
    /// "Previous" replays the current track once the position is strictly
    /// past this many seconds.
    pub restart_threshold: f64,
    pub gapless_preload: bool,
    pub tick: Duration,
    pub reconcile_every_ticks: u32,
    pub drift_tolerance: f64,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            restart_threshold: 3.0,
            gapless_preload: true,
            tick: Duration::from_secs(1),
            reconcile_every_ticks: 5,
            drift_tolerance: 1.0,
        }
    }
}

impl From<&Settings> for PlayerOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            restart_threshold: settings.playback.previous_restart_secs,
            gapless_preload: settings.playback.gapless_preload,
            tick: Duration::from_millis(settings.tracker.tick_ms),
            reconcile_every_ticks: settings.tracker.reconcile_every_ticks,
            drift_tolerance: settings.tracker.drift_tolerance_secs,
        }
    }
}

pub struct Player<B, L> {
    backend: B,
    library: L,
    options: PlayerOptions,
    state: PlaybackState,
    queue: QueueStore,
    view: TrackView,
    shuffler: Shuffler,
    tracker: PositionTracker,
    cover: Option<Vec<u8>>,
    /// Whether the backend holds decoded audio for `current_track`.
    audio_loaded: bool,
    stopped: bool,
}

impl<B: Backend, L: Library> Player<B, L> {
    pub fn new(backend: B, library: L) -> Self {
        Self::with_options(backend, library, PlayerOptions::default())
    }

    pub fn with_options(backend: B, library: L, options: PlayerOptions) -> Self {
        let tracker = PositionTracker::new(options.tick, options.reconcile_every_ticks);
        Self {
            backend,
            library,
            options,
            state: PlaybackState::new(),
            queue: QueueStore::new(),
            view: TrackView::default(),
            shuffler: Shuffler::new(),
            tracker,
            cover: None,
            audio_loaded: false,
            stopped: false,
        }
    }

    /// Swap tuning options. The tracker is rebuilt on the new interval and
    /// keeps running if it was.
    pub fn set_options(&mut self, options: PlayerOptions) {
        let running = self.tracker.is_running();
        self.tracker = PositionTracker::new(options.tick, options.reconcile_every_ticks);
        if running {
            self.tracker.start(Instant::now());
        }
        self.options = options;
    }

    /// Replace the shuffle source, e.g. with a seeded one.
    pub fn with_shuffler(mut self, shuffler: Shuffler) -> Self {
        self.shuffler = shuffler;
        self
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn queue(&self) -> &QueueStore {
        &self.queue
    }

    pub fn view(&self) -> &TrackView {
        &self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut L {
        &mut self.library
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    /// Cover art of the current track, once fetched.
    pub fn cover(&self) -> Option<&[u8]> {
        self.cover.as_deref()
    }

    pub fn is_audio_loaded(&self) -> bool {
        self.audio_loaded
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    pub fn transport(&self) -> TransportState {
        match (self.state.current_track(), self.state.is_playing) {
            (None, _) if self.stopped => TransportState::Stopped,
            (None, _) => TransportState::Idle,
            (Some(_), true) => TransportState::Playing,
            (Some(_), false) => TransportState::Paused,
        }
    }

    // View

    pub fn set_library_tracks(&mut self, tracks: Vec<Track>) {
        self.view.set_library(tracks);
        self.sync_shuffle_with_view();
    }

    /// Navigate inside a playlist (`None` leaves it).
    pub fn set_playlist_context(&mut self, tracks: Option<Vec<Track>>) {
        self.view.set_playlist(tracks);
        self.sync_shuffle_with_view();
    }

    /// Navigate inside an album (`None` leaves it).
    pub fn set_album_context(&mut self, tracks: Option<Vec<Track>>) {
        self.view.set_album(tracks);
        self.sync_shuffle_with_view();
    }

    /// Regenerate the shuffle order only when the active collection's
    /// membership changed, so "next" stays stable otherwise.
    fn sync_shuffle_with_view(&mut self) {
        if !self.state.shuffle_enabled {
            return;
        }
        let active: HashSet<TrackId> = self.view.active_ids().into_iter().collect();
        let shuffled: HashSet<TrackId> = self.state.shuffled_queue().iter().copied().collect();
        if active != shuffled {
            self.generate_shuffled_queue();
        }
    }

    // Queue

    pub fn add_to_queue(&mut self, ids: &[TrackId], position: InsertPosition) -> Vec<QueueId> {
        let sources = self.view.sources();
        let handed = self.queue.add(ids, position, &sources);
        debug!(
            "queued {} of {} tracks ({position:?})",
            handed.len(),
            ids.len()
        );
        handed
    }

    pub fn remove_from_queue(&mut self, queue_id: QueueId) {
        if self.queue.remove(queue_id).is_none() {
            debug!("remove_from_queue: {queue_id} not queued");
        }
    }

    pub fn reorder_queue(&mut self, from: usize, to: usize) {
        if !self.queue.reorder(from, to) {
            debug!("reorder_queue: ignoring move {from} -> {to}");
        }
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn toggle_queue_panel(&mut self) -> bool {
        self.queue.toggle_panel();
        self.queue.panel_visible()
    }

    // Shuffle and repeat

    /// Permute the active collection, current track first.
    pub fn generate_shuffled_queue(&mut self) {
        let ids = self.view.active_ids();
        let order = self.shuffler.generate(&ids, self.state.current_id());
        self.state.set_shuffled_queue(order);
    }

    /// Returns the new shuffle flag. Only turning shuffle on regenerates.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.state.shuffle_enabled = !self.state.shuffle_enabled;
        if self.state.shuffle_enabled {
            self.generate_shuffled_queue();
        }
        debug!("shuffle {}", if self.state.shuffle_enabled { "on" } else { "off" });
        self.state.shuffle_enabled
    }

    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.state.repeat_mode = self.state.repeat_mode.cycle();
        self.state.repeat_mode
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.state.repeat_mode = mode;
    }

    // Navigation

    fn navigation_order(&self) -> Vec<TrackId> {
        if self.state.shuffle_enabled {
            self.state.shuffled_queue().to_vec()
        } else {
            self.view.active_ids()
        }
    }

    /// What `play_next_track` would play, without side effects.
    pub fn get_next_track_id(&self) -> Option<TrackId> {
        let current = self.state.current_id()?;
        if self.state.repeat_mode == RepeatMode::Track {
            return Some(current);
        }
        if let Some(head) = self.queue.head() {
            return Some(head.track.id);
        }
        next_in_order(&self.navigation_order(), current, self.state.repeat_mode)
    }

    async fn resolve_track(&self, id: TrackId) -> Result<Option<Track>, PlayerError> {
        if let Some(track) = self.library.track(id).await? {
            return Ok(Some(track));
        }
        Ok(self.view.find(id).cloned())
    }

    async fn start_track(&mut self, track: Track) -> Result<(), PlayerError> {
        let id = track.id;
        self.state.set_current_track(Some(track));
        self.state.is_playing = true;
        self.state.set_position(0.0);
        self.cover = None;
        self.stopped = false;
        self.tracker.stop();
        self.tracker.start(Instant::now());
        debug!("starting track {id}");

        let played = RemoteSync::Propagate.settle("play_track", self.backend.play_track(id).await);
        // Only a confirmed load counts; a rejected play keeps the reload path open.
        self.audio_loaded = played.is_ok();
        self.fetch_cover(id).await;
        played?;

        if self.options.gapless_preload {
            self.preload_next(id).await;
        }
        Ok(())
    }

    async fn fetch_cover(&mut self, id: TrackId) {
        let fetched =
            RemoteSync::Detached.settle("get_track_cover", self.backend.get_track_cover(id).await);
        if let Ok(Some(cover)) = fetched {
            if self.state.current_id() == Some(id) {
                self.cover = cover;
            }
        }
    }

    async fn preload_next(&self, current: TrackId) {
        let Some(next) = self.get_next_track_id().filter(|&next| next != current) else {
            return;
        };
        let _ = RemoteSync::Detached.settle("preload_track", self.backend.preload_track(next).await);
    }

    /// Resolve `id` (library first, then the view) and play it. An unknown id
    /// is a no-op.
    pub async fn play_track(&mut self, id: TrackId) -> Result<(), PlayerError> {
        match self.resolve_track(id).await? {
            Some(track) => self.start_track(track).await,
            None => {
                debug!("play_track: {id} not found");
                Ok(())
            }
        }
    }

    /// Pause or resume.
    ///
    /// When the backend has no audio loaded (fresh backend, restored
    /// session, rejected play) this instead reloads the current track and
    /// seeks back to the stored position.
    pub async fn pause_playback(&mut self) -> Result<(), PlayerError> {
        let Some(track_id) = self.state.current_id() else {
            return Ok(());
        };

        if !self.audio_loaded {
            let resume_at = self.state.position();
            debug!("reloading track {track_id} at {resume_at:.1}s");
            self.state.is_playing = true;
            self.stopped = false;
            self.tracker.start(Instant::now());

            let played =
                RemoteSync::Propagate.settle("play_track", self.backend.play_track(track_id).await);
            self.audio_loaded = played.is_ok();
            played?;
            if resume_at > 0.0 {
                RemoteSync::Propagate.settle(
                    "seek_to_position",
                    self.backend.seek_to_position(resume_at).await,
                )?;
            }
            if self.cover.is_none() {
                self.fetch_cover(track_id).await;
            }
            return Ok(());
        }

        let playing = !self.state.is_playing;
        self.state.is_playing = playing;
        if playing {
            self.tracker.start(Instant::now());
        } else {
            self.tracker.stop();
        }
        RemoteSync::Propagate.settle("pause_playback", self.backend.pause_playback().await)?;
        Ok(())
    }

    pub async fn stop_playback(&mut self) -> Result<(), PlayerError> {
        self.state.set_current_track(None);
        self.state.is_playing = false;
        self.state.set_position(0.0);
        self.cover = None;
        self.audio_loaded = false;
        self.stopped = true;
        self.tracker.stop();
        debug!("stopped");

        RemoteSync::Propagate.settle("stop_playback", self.backend.stop_playback().await)?;
        Ok(())
    }

    /// Repeat-track, then the queue head, then the next entry of the active
    /// order; otherwise stop. No-op without a current track.
    pub async fn play_next_track(&mut self) -> Result<(), PlayerError> {
        let Some(current) = self.state.current_track().cloned() else {
            return Ok(());
        };

        if self.state.repeat_mode == RepeatMode::Track {
            return self.start_track(current).await;
        }
        if let Some(entry) = self.queue.pop_head() {
            debug!("playing queued entry {}", entry.queue_id);
            return self.start_track(entry.track).await;
        }

        match next_in_order(&self.navigation_order(), current.id, self.state.repeat_mode) {
            Some(next) => self.play_track(next).await,
            None => self.stop_playback().await,
        }
    }

    /// Restart the current track when past the threshold, else go one entry
    /// back in the non-shuffled active list (restarting at the first entry).
    pub async fn play_previous_track(&mut self) -> Result<(), PlayerError> {
        let Some(current) = self.state.current_track().cloned() else {
            return Ok(());
        };

        if self.state.position() > self.options.restart_threshold {
            return self.start_track(current).await;
        }

        match previous_in_order(&self.view.active_ids(), current.id) {
            Some(prev) => self.play_track(prev).await,
            None => self.start_track(current).await,
        }
    }

    /// Play the head of the shuffle order or the active list.
    pub async fn play_first_in_view(&mut self) -> Result<(), PlayerError> {
        let first = if self.state.shuffle_enabled {
            self.state.shuffled_queue().first().copied()
        } else {
            self.view.active().first().map(|t| t.id)
        };
        match first {
            Some(id) => self.play_track(id).await,
            None => Ok(()),
        }
    }

    // Levels and seeking

    /// Returns the clamped volume actually applied.
    pub async fn set_volume(&mut self, volume: f32) -> f32 {
        let volume = self.state.set_volume(volume);
        let _ = RemoteSync::Detached.settle("set_volume", self.backend.set_volume(volume).await);
        volume
    }

    /// Returns the clamped speed actually applied.
    pub async fn set_playback_speed(&mut self, speed: f32) -> f32 {
        let speed = self.state.set_playback_speed(speed);
        let _ = RemoteSync::Detached.settle(
            "set_playback_speed",
            self.backend.set_playback_speed(speed).await,
        );
        speed
    }

    /// User seek: clamp, move the local position, tell the backend.
    pub async fn seek_to(&mut self, position: f64) -> Result<(), PlayerError> {
        if self.state.current_track().is_none() {
            return Ok(());
        }
        let position = self.state.set_position(position);
        RemoteSync::Propagate.settle(
            "seek_to_position",
            self.backend.seek_to_position(position).await,
        )?;
        Ok(())
    }

    /// Seek requested by the OS. The backend owns the resulting position, so
    /// local state is left alone until it reports back.
    pub async fn forward_seek(&self, position: f64) {
        let _ = RemoteSync::Detached.settle(
            "seek_to_position",
            self.backend.seek_to_position(position).await,
        );
    }

    // Background refreshes

    /// Re-read the current track from the library and refetch its cover.
    pub async fn refresh_current_track(&mut self) {
        let Some(id) = self.state.current_id() else {
            return;
        };
        match self.library.track(id).await {
            Ok(Some(track)) => self.state.set_current_track(Some(track)),
            Ok(None) => debug!("refresh: track {id} no longer in library"),
            Err(e) => debug!("refresh of track {id} failed, ignoring: {e}"),
        }
        self.fetch_cover(id).await;
    }

    /// The backend reported a transport change on its own.
    /// A "playing" report with no current track is ignored.
    pub fn apply_backend_playing(&mut self, playing: bool) {
        if playing && self.state.current_track().is_none() {
            debug!("backend reports playing with no current track, ignoring");
            return;
        }
        self.state.is_playing = playing;
        if playing {
            self.audio_loaded = true;
            self.tracker.start(Instant::now());
        } else {
            self.tracker.stop();
        }
    }

    /// The backend lost its audio (restart, device change). The next
    /// `pause_playback` reloads the current track.
    pub fn mark_audio_unloaded(&mut self) {
        self.audio_loaded = false;
        self.state.is_playing = false;
        self.tracker.stop();
    }

    /// Advance the local position for every tick due at `now`, scaled by
    /// playback speed, and reconcile with the backend when a reconciliation
    /// tick came up. Never advances to another track.
    pub async fn poll_position(&mut self, now: Instant) {
        if !self.state.is_playing {
            self.tracker.stop();
            return;
        }
        let tick = self.tracker.poll(now);
        if tick.elapsed == 0 {
            return;
        }

        let advance = self.tracker.interval().as_secs_f64()
            * f64::from(tick.elapsed)
            * f64::from(self.state.playback_speed());
        self.state.set_position(self.state.position() + advance);

        if tick.reconcile {
            self.reconcile_position().await;
        }
    }

    async fn reconcile_position(&mut self) {
        let reported =
            RemoteSync::Detached.settle("get_position", self.backend.get_position().await);
        if let Ok(Some(reported)) = reported {
            let local = self.state.position();
            if (reported - local).abs() > self.options.drift_tolerance {
                debug!("position drift: local {local:.2}s, backend {reported:.2}s");
                self.state.set_position(reported);
            }
        }
    }

    // Session

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            volume: self.state.volume(),
            shuffle_enabled: self.state.shuffle_enabled,
            repeat_mode: self.state.repeat_mode,
            queue: self.queue.entries().to_vec(),
            current_track: self.state.current_track().cloned(),
            position: self.state.position(),
            playback_speed: self.state.playback_speed(),
        }
    }

    /// Apply a persisted session. Nothing is sent to the backend: the
    /// restored track is paused with no audio loaded.
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        self.state.set_volume(snapshot.volume);
        self.state.set_playback_speed(snapshot.playback_speed);
        self.state.repeat_mode = snapshot.repeat_mode;
        self.state.set_current_track(snapshot.current_track);
        self.state.set_position(snapshot.position);
        self.state.is_playing = false;
        self.audio_loaded = false;
        self.stopped = false;
        self.cover = None;
        self.tracker.stop();

        let panel_visible = self.queue.panel_visible();
        self.queue = QueueStore::from_entries(snapshot.queue);
        if panel_visible {
            self.queue.toggle_panel();
        }

        self.state.shuffle_enabled = snapshot.shuffle_enabled;
        if self.state.shuffle_enabled {
            self.generate_shuffled_queue();
        }
        debug!(
            "restored session: {} queued, current {:?}",
            self.queue.len(),
            self.state.current_id()
        );
    }
}
