use serde::Deserialize;

/// Top-level engine settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub tracker: TrackerSettings,
    pub mpris: MprisSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial volume in `[0, 1]` when no session is restored.
    pub volume: f32,
    /// Initial playback speed in `[0.25, 4.0]` when no session is restored.
    pub speed: f32,
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Default repeat mode.
    pub repeat_mode: RepeatModeSetting,
    /// "Previous" restarts the current track once playback is past this many seconds.
    pub previous_restart_secs: f64,
    /// Hint the backend about the next track right after a track starts.
    pub gapless_preload: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            speed: 1.0,
            shuffle: false,
            repeat_mode: RepeatModeSetting::Off,
            previous_restart_secs: 3.0,
            gapless_preload: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatModeSetting {
    #[serde(alias = "none", alias = "no-repeat", alias = "no_repeat")]
    Off,
    #[serde(
        alias = "all",
        alias = "playlist",
        alias = "loop-all",
        alias = "loop_all",
        alias = "repeat-all"
    )]
    List,
    #[serde(
        alias = "one",
        alias = "loop-one",
        alias = "loop_one",
        alias = "repeat-one"
    )]
    Track,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// How often the local position advances while playing (milliseconds).
    pub tick_ms: u64,
    /// Ask the backend for its position every N ticks. 0 disables.
    pub reconcile_every_ticks: u32,
    /// Adopt the backend position when it differs from ours by more than this.
    pub drift_tolerance_secs: f64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            reconcile_every_ticks: 5,
            drift_tolerance_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MprisSettings {
    /// Register an MPRIS2 service for OS media keys.
    pub enabled: bool,
    /// Player identity; the bus name is `org.mpris.MediaPlayer2.<identity>`.
    pub identity: String,
    /// Which track fields make up the published title, and in what order.
    ///
    /// Example: ["artist", "title"]
    pub title_fields: Vec<TrackDisplayField>,
    /// Separator used to join `title_fields`.
    pub title_separator: String,
}

impl Default for MprisSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            identity: "encore".to_string(),
            title_fields: vec![TrackDisplayField::Title],
            title_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Apply a persisted session snapshot at startup when the host provides one.
    pub restore: bool,
    /// Keep the restored position; otherwise restored tracks start from 0.
    pub restore_position: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            restore: true,
            restore_position: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Genre,
    Year,
    Filename,
    Path,
}
