use std::fmt;

use serde::{Deserialize, Serialize};

use crate::library::{Track, TrackId};

/// Per-insertion handle. Monotonic across the session, never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueId(pub u64);

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub queue_id: QueueId,
    pub track: Track,
}

/// Where `add` places newly resolved entries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InsertPosition {
    /// Append after everything already queued.
    #[default]
    End,
    /// Play these before anything already queued, in input order.
    Next,
}

#[derive(Debug, Clone)]
pub struct QueueStore {
    entries: Vec<QueueEntry>,
    next_id: u64,
    panel_visible: bool,
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            panel_visible: false,
        }
    }

    /// Rebuild a store from persisted entries. Id allocation continues above
    /// the highest restored id so handles stay unique.
    pub fn from_entries(entries: Vec<QueueEntry>) -> Self {
        let next_id = entries
            .iter()
            .map(|e| e.queue_id.0)
            .max()
            .map_or(1, |max| max + 1);
        Self {
            entries,
            next_id,
            panel_visible: false,
        }
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn head(&self) -> Option<&QueueEntry> {
        self.entries.first()
    }

    /// Resolve `ids` against `sources` (first source containing the id wins)
    /// and enqueue the hits. Unknown ids are skipped. Returns the ids handed
    /// out, in input order.
    pub fn add(
        &mut self,
        ids: &[TrackId],
        position: InsertPosition,
        sources: &[&[Track]],
    ) -> Vec<QueueId> {
        let resolved: Vec<QueueEntry> = ids
            .iter()
            .filter_map(|id| resolve(*id, sources))
            .map(|track| QueueEntry {
                queue_id: self.allocate_id(),
                track,
            })
            .collect();

        let handed_out = resolved.iter().map(|e| e.queue_id).collect();
        match position {
            InsertPosition::End => self.entries.extend(resolved),
            InsertPosition::Next => {
                self.entries.splice(0..0, resolved);
            }
        }
        handed_out
    }

    /// Remove the entry with `queue_id`. Unknown ids are ignored.
    pub fn remove(&mut self, queue_id: QueueId) -> Option<QueueEntry> {
        let pos = self.entries.iter().position(|e| e.queue_id == queue_id)?;
        Some(self.entries.remove(pos))
    }

    /// Move one entry from `from` to `to`. Out-of-range indices and
    /// `from == to` leave the queue untouched.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }

    /// Take the next entry to play.
    pub fn pop_head(&mut self) -> Option<QueueEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn toggle_panel(&mut self) {
        self.panel_visible = !self.panel_visible;
    }

    fn allocate_id(&mut self) -> QueueId {
        let id = QueueId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn resolve(id: TrackId, sources: &[&[Track]]) -> Option<Track> {
    sources
        .iter()
        .find_map(|source| source.iter().find(|t| t.id == id))
        .cloned()
}
