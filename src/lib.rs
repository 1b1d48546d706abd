//! Playback orchestration engine.
//!
//! `encore` owns "what is playing, what plays next, and when the audio backend
//! must act". The host application provides the real audio engine (through
//! [`backend::Backend`]) and the catalog (through [`library::Library`]); this
//! crate keeps the queue, shuffle/repeat navigation, transport state and
//! position tracking consistent with the events the backend sends back.

pub mod backend;
pub mod config;
pub mod error;
pub mod events;
pub mod library;
pub mod mpris;
pub mod player;
pub mod queue;
pub mod runtime;
pub mod session;
pub mod shuffle;

pub use backend::{Backend, BackendCmd, ChannelBackend};
pub use error::{BackendError, LibraryError, PlayerError, SessionError};
pub use events::{BackendEvent, EventChannel, EventHub, EventSource, SubscriptionSet};
pub use library::{Library, MemoryLibrary, Track, TrackId};
pub use player::{PlaybackState, Player, RepeatMode, TrackView, TransportState};
pub use queue::{InsertPosition, QueueEntry, QueueId, QueueStore};
pub use session::SessionSnapshot;
