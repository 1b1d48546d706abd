//! Playback orchestration: transport state, next/previous resolution under
//! shuffle and repeat, the play queue and local position tracking.

mod navigation;
mod orchestrator;
mod state;
mod sync;
mod tracker;
mod view;

pub use navigation::{next_in_order, previous_in_order};
pub use orchestrator::{Player, PlayerOptions};
pub use state::*;
pub use sync::RemoteSync;
pub use tracker::{PositionTracker, Tick};
pub use view::TrackView;
