//! Frame store implementation
//!
//! The shared last-value cache the relay polls and frame producers write
//! into. Any number of writers and readers operate concurrently; a read
//! racing a write for the same id observes either the old or the new
//! payload, never a torn value.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;

/// Shared last-value cache keyed by stream id
///
/// Thread-safe via `RwLock`. The outer lock guards the slot map and is
/// only write-acquired when a new id is first published or a slot is
/// removed; steady-state traffic (overwrites and reads) takes it for
/// reading and contends on the per-slot lock alone, so unrelated ids
/// never serialize against each other.
pub struct FrameStore {
    /// Map of stream id to its single payload slot
    slots: RwLock<HashMap<String, Arc<RwLock<Bytes>>>>,
}

impl FrameStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Upsert the payload for a stream id
    ///
    /// Always succeeds. The payload is stored opaquely; no validation
    /// happens at this layer.
    pub async fn put(&self, stream_id: &str, payload: impl Into<Bytes>) {
        let payload = payload.into();

        // Fast path: the slot already exists
        {
            let slots = self.slots.read().await;
            if let Some(slot) = slots.get(stream_id) {
                *slot.write().await = payload;
                return;
            }
        }

        // First publish for this id; re-check under the write lock in
        // case another publisher raced the insert.
        let mut slots = self.slots.write().await;
        match slots.entry(stream_id.to_string()) {
            Entry::Occupied(entry) => {
                *entry.get().write().await = payload;
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(RwLock::new(payload)));
                tracing::debug!(stream = %stream_id, "Frame slot created");
            }
        }
    }

    /// Get the most recent payload for a stream id
    ///
    /// Returns `None` if the id was never published. A miss is an
    /// ordinary outcome: the relay polls continuously and simply skips
    /// the tick.
    pub async fn get(&self, stream_id: &str) -> Option<Bytes> {
        let slots = self.slots.read().await;
        let slot = slots.get(stream_id)?;
        let payload = slot.read().await.clone();
        Some(payload)
    }

    /// Drop the slot for a stream id
    ///
    /// Returns true if a slot existed. Used when a bot is removed from
    /// the roster; feeds polling the id observe a miss from then on.
    pub async fn remove(&self, stream_id: &str) -> bool {
        let removed = self.slots.write().await.remove(stream_id).is_some();
        if removed {
            tracing::debug!(stream = %stream_id, "Frame slot removed");
        }
        removed
    }

    /// Number of slots currently held
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    /// Whether the store holds no slots
    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new()
    }
}
