//! Runtime wiring: settings, session restore, event subscription, MPRIS and
//! the cooperative loop, composed on the caller's thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use log::{info, warn};

use crate::backend::Backend;
use crate::config;
use crate::events::{EventHub, connect};
use crate::library::Library;
use crate::player::Player;
use crate::session::SessionSnapshot;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub use settings::load_settings;
pub use startup::apply_playback_defaults;

/// Drive `player` from the events published on `hub` until `shutdown` is
/// set, by the host or by an MPRIS `Quit`. Tuning options from `settings`
/// replace the player's own. Returns the session to persist.
pub fn run<B: Backend, L: Library>(
    player: &mut Player<B, L>,
    hub: &EventHub,
    settings: &config::Settings,
    session: Option<SessionSnapshot>,
    shutdown: Arc<AtomicBool>,
) -> SessionSnapshot {
    info!("starting playback runtime");
    startup::apply_playback_defaults(player, settings, session);

    let (tx, rx) = mpsc::channel();
    let mut subscriptions = connect(hub, &tx);
    drop(tx);

    let mpris = settings.mpris.enabled.then(|| {
        crate::mpris::spawn_mpris(
            hub.clone(),
            shutdown.clone(),
            settings.mpris.identity.clone(),
        )
    });

    event_loop::run(player, &rx, mpris.as_ref(), settings, &shutdown);

    let failed = subscriptions.dispose();
    if failed > 0 {
        warn!("{failed} subscriptions failed to close");
    }
    // Lets the MPRIS thread exit when the loop ended for another reason.
    shutdown.store(true, Ordering::SeqCst);

    info!("playback runtime stopped");
    player.snapshot()
}
