use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use async_io::block_on;
use log::{info, warn};

use crate::backend::Backend;
use crate::config;
use crate::events::{BackendEvent, dispatch};
use crate::library::Library;
use crate::mpris::MprisHandle;
use crate::player::Player;
use crate::runtime::mpris_sync::update_mpris;

/// Longest the loop sleeps without checking for shutdown.
const IDLE_POLL: Duration = Duration::from_millis(200);

/// Cooperative loop: one event or one tracker deadline per iteration, all on
/// the calling thread. Returns when `shutdown` is set or every event sender
/// is gone. Events already queued at shutdown are still applied.
pub fn run<B: Backend, L: Library>(
    player: &mut Player<B, L>,
    events: &Receiver<BackendEvent>,
    mpris: Option<&MprisHandle>,
    settings: &config::Settings,
    shutdown: &AtomicBool,
) {
    loop {
        if let Some(mpris) = mpris {
            update_mpris(mpris, player, &settings.mpris);
        }

        if shutdown.load(Ordering::SeqCst) {
            info!("shutdown requested");
            for event in events.try_iter() {
                handle_event(player, event);
            }
            break;
        }

        let timeout = player
            .tracker()
            .deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));

        match events.recv_timeout(timeout) {
            Ok(event) => handle_event(player, event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("event source closed");
                break;
            }
        }

        block_on(player.poll_position(Instant::now()));
    }
}

fn handle_event<B: Backend, L: Library>(player: &mut Player<B, L>, event: BackendEvent) {
    let channel = event.channel();
    if let Err(e) = block_on(dispatch(player, event)) {
        warn!("{} failed: {e}", channel.name());
    }
}
