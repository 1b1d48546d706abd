//! Explicit play-next queue, independent of library or playlist order.
//!
//! Entries carry a per-insertion `QueueId` so the same track can be queued
//! more than once and still be removed or moved individually.

mod store;

pub use store::*;
