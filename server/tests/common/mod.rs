//! Shared helpers for the HTTP API tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use axum::ServiceExt;
use axum::extract::Request;
use serde::{Deserialize, Serialize, Serializer};
use thunt_model::Entity;
use thunt_server::App;
use thunt_storage::{MemoryBackend, StorageBackend, StorageError, StorageResult};
use thunt_types::{EntityKey, NumericId, RandomId};

/// Spin up the router on an OS-assigned port, returning the base URL.
pub async fn spawn_server(app: App) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .await
            .unwrap();
    });
    format!("http://127.0.0.1:{port}")
}

/// Memory backend that counts every call made to it.
pub struct CountingBackend<E> {
    inner: MemoryBackend<E>,
    calls: AtomicUsize,
}

impl<E: Entity> CountingBackend<E> {
    pub fn new() -> Self {
        Self {
            inner: MemoryBackend::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl<E: Entity> StorageBackend<E> for CountingBackend<E> {
    type Key = RandomId;

    fn name(&self) -> &'static str {
        "counting"
    }

    fn put(&self, entity: E) -> StorageResult<RandomId> {
        self.tick();
        self.inner.put(entity)
    }

    fn get(&self, key: RandomId) -> StorageResult<Option<E>> {
        self.tick();
        self.inner.get(key)
    }

    fn delete(&self, key: RandomId) -> StorageResult<bool> {
        self.tick();
        self.inner.delete(key)
    }

    fn list_all(&self) -> StorageResult<Vec<(RandomId, E)>> {
        self.tick();
        self.inner.list_all()
    }
}

/// Backend whose store is unreachable.
pub struct OfflineBackend;

impl<E: Entity> StorageBackend<E> for OfflineBackend {
    type Key = NumericId;

    fn name(&self) -> &'static str {
        "offline"
    }

    fn put(&self, _: E) -> StorageResult<NumericId> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    fn get(&self, _: NumericId) -> StorageResult<Option<E>> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    fn delete(&self, _: NumericId) -> StorageResult<bool> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    fn list_all(&self) -> StorageResult<Vec<(NumericId, E)>> {
        Err(StorageError::Unavailable("connection refused".into()))
    }
}

/// Entity that refuses to be encoded for a response once its label is
/// `poison`. Storing it (without an identifier) still works.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fragile {
    #[serde(skip)]
    pub id: Option<EntityKey>,
    pub label: String,
}

impl Serialize for Fragile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{Error, SerializeMap};

        if self.id.is_some() && self.label == "poison" {
            return Err(S::Error::custom("poisoned entity"));
        }
        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        map.serialize_entry("label", &self.label)?;
        map.end()
    }
}

impl Entity for Fragile {
    const KIND: &'static str = "Fragile";

    fn set_id(&mut self, id: EntityKey) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }
}
