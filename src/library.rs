//! Catalog types and the lookup contract the engine consumes.
//!
//! The library itself (scanning, tags, storage) lives outside this crate. The
//! engine only resolves ids to `Track` records and keeps denormalized copies
//! for display.

mod display;
mod model;
mod source;

pub use display::display_from_fields;
pub use model::*;
pub use source::*;

#[cfg(test)]
mod tests;
