//! Shuffle sequencer: a randomized traversal order anchored on the current
//! track.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::library::TrackId;

/// Produces permutations of a track collection.
///
/// Holds its own RNG so tests can pin a seed; production code seeds from
/// entropy.
pub struct Shuffler {
    rng: StdRng,
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Permute `ids`, moving `anchor` (when present in `ids`) to the front so
    /// turning shuffle on never jumps away from the playing track.
    pub fn generate(&mut self, ids: &[TrackId], anchor: Option<TrackId>) -> Vec<TrackId> {
        let mut order: Vec<TrackId> = ids.to_vec();
        order.shuffle(&mut self.rng);

        if let Some(anchor) = anchor {
            if let Some(pos) = order.iter().position(|&id| id == anchor) {
                order[..=pos].rotate_right(1);
            }
        }
        order
    }
}

impl std::fmt::Debug for Shuffler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shuffler").finish_non_exhaustive()
    }
}
