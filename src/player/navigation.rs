//! Next/previous resolution over an ordered id list.

use crate::library::TrackId;

use super::state::RepeatMode;

/// The entry after `current` in `order`.
///
/// At the last entry only `RepeatMode::List` wraps to the first; anything
/// else returns `None`. `None` also when `current` is not in `order`.
/// `RepeatMode::Track` is handled by the caller before this runs.
pub fn next_in_order(order: &[TrackId], current: TrackId, repeat: RepeatMode) -> Option<TrackId> {
    let pos = order.iter().position(|&id| id == current)?;
    match order.get(pos + 1) {
        Some(&next) => Some(next),
        None if repeat == RepeatMode::List => order.first().copied(),
        None => None,
    }
}

/// The entry before `current` in `order`. `None` at the first entry or when
/// `current` is not in `order`; callers restart the current track then.
pub fn previous_in_order(order: &[TrackId], current: TrackId) -> Option<TrackId> {
    let pos = order.iter().position(|&id| id == current)?;
    pos.checked_sub(1).and_then(|p| order.get(p)).copied()
}
