//! Event bridge: backend and OS media-key events flowing back into the
//! player.

mod bridge;
mod hub;
mod subscription;
mod types;

pub use bridge::{connect, dispatch};
pub use hub::EventHub;
pub use subscription::{EventSource, Subscription, SubscriptionSet};
pub use types::*;

#[cfg(test)]
mod tests;
