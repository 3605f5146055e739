//! Concurrent in-memory backend.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use thunt_model::Entity;
use thunt_types::RandomId;
use tracing::warn;

use crate::{StorageBackend, StorageError, StorageResult};

/// Upper bound on identifier draws per insert.
///
/// With 122 random bits a collision is already vanishingly rare, so the
/// loop terminates with overwhelming probability; the cap only matters
/// when the source itself is broken.
pub const MAX_ID_ATTEMPTS: usize = 64;

/// Produces candidate identifiers for [`MemoryBackend::put`].
pub trait IdSource: Send + Sync + 'static {
    fn next_id(&self) -> RandomId;
}

/// Default source: fresh UUID v4 values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Source;

impl IdSource for UuidV4Source {
    fn next_id(&self) -> RandomId {
        RandomId::new()
    }
}

/// Process-local store for one kind.
///
/// Writers (`put`, `delete`) take the write lock; readers (`get`,
/// `list_all`) share the read lock, so no reader ever sees a half-done insert.
pub struct MemoryBackend<E> {
    entries: RwLock<HashMap<RandomId, E>>,
    ids: Box<dyn IdSource>,
}

impl<E: Entity> MemoryBackend<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_source(UuidV4Source)
    }

    /// Uses `source` instead of random UUIDs to draw identifiers.
    #[must_use]
    pub fn with_id_source(source: impl IdSource) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ids: Box::new(source),
        }
    }
}

impl<E: Entity> Default for MemoryBackend<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> fmt::Debug for MemoryBackend<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("kind", &E::KIND)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> StorageBackend<E> for MemoryBackend<E> {
    type Key = RandomId;

    fn name(&self) -> &'static str {
        "memory"
    }

    fn put(&self, mut entity: E) -> StorageResult<RandomId> {
        entity.clear_id();

        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Poisoned(E::KIND))?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if entries.contains_key(&id) {
                warn!(kind = E::KIND, attempt, "generated identifier collided, retrying");
                continue;
            }
            entries.insert(id, entity);
            return Ok(id);
        }

        Err(StorageError::IdSpaceExhausted {
            kind: E::KIND,
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    fn get(&self, key: RandomId) -> StorageResult<Option<E>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Poisoned(E::KIND))?;
        Ok(entries.get(&key).cloned())
    }

    fn delete(&self, key: RandomId) -> StorageResult<bool> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Poisoned(E::KIND))?;
        Ok(entries.remove(&key).is_some())
    }

    fn list_all(&self) -> StorageResult<Vec<(RandomId, E)>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Poisoned(E::KIND))?;
        Ok(entries
            .iter()
            .map(|(id, entity)| (*id, entity.clone()))
            .collect())
    }
}
