use std::sync::mpsc::Sender;

use log::{debug, warn};

use crate::backend::Backend;
use crate::error::PlayerError;
use crate::library::Library;
use crate::player::Player;

use super::subscription::{EventSource, SubscriptionSet};
use super::types::{BackendEvent, EventChannel, PlayPauseIntent};

/// Subscribe `sink` to every channel. Channels that fail to subscribe are
/// logged and left out of the returned set.
pub fn connect<S>(source: &S, sink: &Sender<BackendEvent>) -> SubscriptionSet
where
    S: EventSource + ?Sized,
{
    let mut set = SubscriptionSet::new();
    for channel in EventChannel::ALL {
        match source.subscribe(channel, sink.clone()) {
            Ok(subscription) => set.push(subscription),
            Err(e) => warn!("subscribing to {} failed: {e}", channel.name()),
        }
    }
    set
}

/// Route one event into the matching player action.
pub async fn dispatch<B, L>(player: &mut Player<B, L>, event: BackendEvent) -> Result<(), PlayerError>
where
    B: Backend,
    L: Library,
{
    debug!("event {}", event.channel().name());
    match event {
        BackendEvent::PlaybackStateChanged(playing) => {
            player.apply_backend_playing(playing);
            Ok(())
        }
        BackendEvent::MediaControlNext => player.play_next_track().await,
        BackendEvent::MediaControlPrevious => player.play_previous_track().await,
        BackendEvent::MediaControlSeek(position) => {
            player.forward_seek(position).await;
            Ok(())
        }
        BackendEvent::MediaControlStop => player.stop_playback().await,
        BackendEvent::MediaControlPlayPause(intent) => play_pause(player, intent).await,
    }
}

async fn play_pause<B, L>(player: &mut Player<B, L>, intent: PlayPauseIntent) -> Result<(), PlayerError>
where
    B: Backend,
    L: Library,
{
    if player.state().current_track().is_none() {
        return match intent {
            PlayPauseIntent::Pause => Ok(()),
            PlayPauseIntent::Play | PlayPauseIntent::Toggle => player.play_first_in_view().await,
        };
    }

    let playing = player.state().is_playing;
    let changes_state = match intent {
        PlayPauseIntent::Play => !playing,
        PlayPauseIntent::Pause => playing,
        PlayPauseIntent::Toggle => true,
    };
    if changes_state {
        player.pause_playback().await
    } else {
        Ok(())
    }
}
