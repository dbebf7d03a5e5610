//! Last-value frame store
//!
//! The store is a single-slot-per-key mailbox: each stream id maps to the
//! most recently published frame payload and nothing else. There is no
//! queue, no history and no eviction. A publish overwrites the previous
//! payload for the same id, and a bot that goes quiet leaves its last
//! frame visible until someone overwrites or removes it.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<FrameStore>
//!                   ┌────────────────────────┐
//!                   │ slots: HashMap<String, │
//!                   │   Arc<RwLock<Bytes>>   │
//!                   │ >                      │
//!                   └───────────┬────────────┘
//!                               │
//!        ┌──────────────────────┼──────────────────────┐
//!        │                      │                      │
//!        ▼                      ▼                      ▼
//!   [Publisher]            [Feed reader]          [Mix reader]
//!   put("botA", …)         get("botA")            get(id) per tick
//! ```
//!
//! The outer map lock is read-mostly: publishes for an existing id and
//! all reads only take it for the slot lookup. Writes to different ids
//! contend only on their own slot locks.
//!
//! # Zero-Copy Design
//!
//! Payloads are held as `bytes::Bytes`, so `get` returns a
//! reference-counted clone, so readers never copy the frame text, no matter
//! how many feeds poll the same slot.

pub mod store;

pub use store::FrameStore;
