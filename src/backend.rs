//! Backend gateway: the only channel to the real audio engine.
//!
//! Every command is an asynchronous round trip that may fail. The engine is
//! owned by the host application; this module defines the contract
//! ([`Backend`]), the wire form of a request ([`BackendCmd`]) and a ready-made
//! gateway that forwards requests to an engine thread ([`ChannelBackend`]).

mod channel;
mod command;
mod gateway;

pub use channel::ChannelBackend;
pub use command::*;
pub use gateway::Backend;

#[cfg(test)]
pub(crate) mod fake;
