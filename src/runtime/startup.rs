use async_io::block_on;
use log::info;

use crate::backend::Backend;
use crate::config;
use crate::library::Library;
use crate::player::{Player, PlayerOptions};
use crate::session::SessionSnapshot;

/// Apply the configured tuning, seed the player from a persisted session
/// when allowed (else from the playback defaults), then push levels to the
/// backend.
pub fn apply_playback_defaults<B: Backend, L: Library>(
    player: &mut Player<B, L>,
    settings: &config::Settings,
    session: Option<SessionSnapshot>,
) {
    player.set_options(PlayerOptions::from(settings));
    let session = session.filter(|_| settings.session.restore);

    let (volume, speed) = match session {
        Some(mut snapshot) => {
            if !settings.session.restore_position {
                snapshot.position = 0.0;
            }
            info!("restoring session");
            let levels = (snapshot.volume, snapshot.playback_speed);
            player.restore(snapshot);
            levels
        }
        None => {
            player.set_repeat_mode(settings.playback.repeat_mode.into());
            if settings.playback.shuffle != player.state().shuffle_enabled {
                player.toggle_shuffle();
            }
            (settings.playback.volume, settings.playback.speed)
        }
    };

    block_on(player.set_volume(volume));
    block_on(player.set_playback_speed(speed));
}
