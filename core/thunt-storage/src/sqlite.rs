//! Persistent backend over a SQLite keyed store.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, params};
use thunt_model::Entity;
use thunt_types::NumericId;
use tracing::{debug, info};

use crate::{StorageBackend, StorageError, StorageResult};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS entities (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        kind    TEXT NOT NULL,
        payload TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS entities_kind ON entities (kind);
";

/// Keyed store shared by every kind.
///
/// Rows are addressed by `(kind, id)`. `AUTOINCREMENT` makes ids strictly
/// increasing and never reused, even after the row holding the largest id
/// is deleted.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a database file.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        info!("opened entity store at {}", path.display());
        Self::init(conn)
    }

    /// Opens a private in-memory database. Contents vanish with the store.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Poisoned("sqlite connection"))
    }

    /// Inserts a payload with an incomplete key; returns the completed key.
    pub fn insert(&self, kind: &str, payload: &str) -> StorageResult<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO entities (kind, payload) VALUES (?1, ?2)",
            params![kind, payload],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn fetch(&self, kind: &str, id: i64) -> StorageResult<Option<String>> {
        let conn = self.conn()?;
        let payload = conn
            .query_row(
                "SELECT payload FROM entities WHERE kind = ?1 AND id = ?2",
                params![kind, id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    /// Returns `false` when no row matched.
    pub fn remove(&self, kind: &str, id: i64) -> StorageResult<bool> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM entities WHERE kind = ?1 AND id = ?2",
            params![kind, id],
        )?;
        Ok(removed > 0)
    }

    /// Every `(id, payload)` row of `kind`, oldest first.
    pub fn fetch_all(&self, kind: &str) -> StorageResult<Vec<(i64, String)>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare_cached("SELECT id, payload FROM entities WHERE kind = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map(params![kind], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

/// One kind's view over a shared [`SqliteStore`].
pub struct PersistentBackend<E> {
    store: Arc<SqliteStore>,
    _kind: PhantomData<fn() -> E>,
}

impl<E: Entity> PersistentBackend<E> {
    #[must_use]
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for PersistentBackend<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentBackend")
            .field("kind", &E::KIND)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> StorageBackend<E> for PersistentBackend<E> {
    type Key = NumericId;

    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn put(&self, mut entity: E) -> StorageResult<NumericId> {
        entity.clear_id();
        let payload = serde_json::to_string(&entity)?;
        let id = self.store.insert(E::KIND, &payload)?;
        debug!(kind = E::KIND, id, "stored entity");
        Ok(NumericId::new(id))
    }

    fn get(&self, key: NumericId) -> StorageResult<Option<E>> {
        match self.store.fetch(E::KIND, key.get())? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, key: NumericId) -> StorageResult<bool> {
        self.store.remove(E::KIND, key.get())
    }

    fn list_all(&self) -> StorageResult<Vec<(NumericId, E)>> {
        self.store
            .fetch_all(E::KIND)?
            .into_iter()
            .map(|(id, payload)| -> StorageResult<(NumericId, E)> {
                Ok((NumericId::new(id), serde_json::from_str(&payload)?))
            })
            .collect()
    }
}
