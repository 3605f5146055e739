use std::fmt;
use std::str::FromStr;

use thunt_model::Entity;
use thunt_types::EntityKey;

use crate::StorageResult;

/// Storage contract shared by every backend.
///
/// Backends store entities without their identifier and hand the key back
/// alongside the value. Calls may block (lock acquisition, disk I/O); async
/// callers should run them on a blocking pool.
pub trait StorageBackend<E: Entity>: Send + Sync + 'static {
    /// Identifier type this backend assigns. Parsed from request paths.
    type Key: Copy
        + Eq
        + fmt::Debug
        + fmt::Display
        + FromStr<Err = thunt_types::Error>
        + Into<EntityKey>
        + Send
        + Sync
        + 'static;

    /// Short backend name for log lines.
    fn name(&self) -> &'static str;

    /// Stores `entity` under a fresh identifier and returns it. Never reuses
    /// an identifier held by a live entity of the same kind.
    fn put(&self, entity: E) -> StorageResult<Self::Key>;

    fn get(&self, key: Self::Key) -> StorageResult<Option<E>>;

    /// Returns `false` if nothing was stored under `key`.
    fn delete(&self, key: Self::Key) -> StorageResult<bool>;

    /// Every stored entity of the kind. No ordering guarantee.
    fn list_all(&self) -> StorageResult<Vec<(Self::Key, E)>>;
}
