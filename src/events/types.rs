/// Channels a backend can publish on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventChannel {
    PlaybackStateChanged,
    MediaControlNext,
    MediaControlPrevious,
    MediaControlSeek,
    MediaControlStop,
    MediaControlPlayPause,
}

impl EventChannel {
    pub const ALL: [EventChannel; 6] = [
        EventChannel::PlaybackStateChanged,
        EventChannel::MediaControlNext,
        EventChannel::MediaControlPrevious,
        EventChannel::MediaControlSeek,
        EventChannel::MediaControlStop,
        EventChannel::MediaControlPlayPause,
    ];

    /// Wire name of the channel.
    pub fn name(self) -> &'static str {
        match self {
            EventChannel::PlaybackStateChanged => "playback-state-changed",
            EventChannel::MediaControlNext => "media-control-next",
            EventChannel::MediaControlPrevious => "media-control-previous",
            EventChannel::MediaControlSeek => "media-control-seek",
            EventChannel::MediaControlStop => "media-control-stop",
            EventChannel::MediaControlPlayPause => "media-control-play-pause",
        }
    }
}

/// What a play/pause media key asks for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayPauseIntent {
    Play,
    Pause,
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// The engine started or stopped producing audio on its own.
    PlaybackStateChanged(bool),
    MediaControlNext,
    MediaControlPrevious,
    /// Absolute target in seconds.
    MediaControlSeek(f64),
    MediaControlStop,
    MediaControlPlayPause(PlayPauseIntent),
}

impl BackendEvent {
    pub fn channel(&self) -> EventChannel {
        match self {
            BackendEvent::PlaybackStateChanged(_) => EventChannel::PlaybackStateChanged,
            BackendEvent::MediaControlNext => EventChannel::MediaControlNext,
            BackendEvent::MediaControlPrevious => EventChannel::MediaControlPrevious,
            BackendEvent::MediaControlSeek(_) => EventChannel::MediaControlSeek,
            BackendEvent::MediaControlStop => EventChannel::MediaControlStop,
            BackendEvent::MediaControlPlayPause(_) => EventChannel::MediaControlPlayPause,
        }
    }
}
