//! Storage layer for thunt.
//!
//! Two interchangeable backends implement [`StorageBackend`]:
//!
//! - [`MemoryBackend`]: a process-local map from [`RandomId`](thunt_types::RandomId)
//!   to entity behind a readers-writer lock. Nothing survives a restart.
//! - [`PersistentBackend`]: a per-kind view over a shared [`SqliteStore`],
//!   which assigns monotonically increasing integer keys on insert.
//!
//! Neither backend keeps the identifier inside the stored value; it is
//! returned next to the entity and stamped on by the caller.

mod backend;
mod error;
mod memory;
mod sqlite;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use memory::{IdSource, MAX_ID_ATTEMPTS, MemoryBackend, UuidV4Source};
pub use sqlite::{PersistentBackend, SqliteStore};
