use crate::backend::Backend;
use crate::config::MprisSettings;
use crate::library::{Library, display_from_fields};
use crate::mpris::MprisHandle;
use crate::player::Player;

pub fn update_mpris<B: Backend, L: Library>(
    mpris: &MprisHandle,
    player: &Player<B, L>,
    settings: &MprisSettings,
) {
    let state = player.state();
    let track = state.current_track();
    let title =
        track.map(|t| display_from_fields(t, &settings.title_fields, &settings.title_separator));

    mpris.set_track_metadata(track, title);
    mpris.set_playback(player.transport());
    mpris.set_position(state.position());
    mpris.set_shuffle(state.shuffle_enabled);
    mpris.set_repeat(state.repeat_mode);
}
