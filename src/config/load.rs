use std::env;
use std::path::{Path, PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "encore";
const CONFIG_FILE: &str = "config.toml";

impl Settings {
    /// Layer `ENCORE__*` env vars over the optional config file over the
    /// struct defaults. A missing file is not an error.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = resolve_config_path() {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix("ENCORE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.tracker.tick_ms == 0 {
            return Err("tracker.tick_ms must be >= 1".to_string());
        }
        let threshold = self.playback.previous_restart_secs;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err("playback.previous_restart_secs must be a non-negative number".to_string());
        }
        let tolerance = self.tracker.drift_tolerance_secs;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err("tracker.drift_tolerance_secs must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// `ENCORE_CONFIG_PATH` when set, else [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os("ENCORE_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `encore/config.toml` inside the XDG config home (`~/.config` when
/// `XDG_CONFIG_HOME` is unset). `None` when neither variable is set.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
