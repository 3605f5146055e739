//! The fixed set of kinds served by one process.

use std::sync::Arc;

use axum::Router;
use thunt_model::{Entity, Hunt, Mission};
use thunt_storage::{MemoryBackend, PersistentBackend, SqliteStore, StorageBackend, StorageResult};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{BackendConfig, ServiceConfig, WriteFailurePolicy};
use crate::handler::EntityHandler;

/// The served application: every kind's routes, reachable with or without
/// a trailing slash.
pub type App = NormalizePath<Router>;

/// Collects one handler per kind. Consumed by [`KindRegistry::into_app`],
/// after which no kind can be added.
pub struct KindRegistry {
    routes: Router,
    kinds: Vec<&'static str>,
    write_failure: WriteFailurePolicy,
}

impl KindRegistry {
    #[must_use]
    pub fn new(write_failure: WriteFailurePolicy) -> Self {
        Self {
            routes: Router::new(),
            kinds: Vec::new(),
            write_failure,
        }
    }

    /// Serves kind `E` from `backend`.
    ///
    /// # Panics
    ///
    /// Panics if `E` is already registered; route paths would clash.
    #[must_use]
    pub fn register<E, B>(mut self, backend: Arc<B>) -> Self
    where
        E: Entity,
        B: StorageBackend<E>,
    {
        assert!(
            !self.kinds.contains(&E::KIND),
            "kind {} registered twice",
            E::KIND
        );
        info!(kind = E::KIND, backend = backend.name(), "registered kind");
        self.kinds.push(E::KIND);
        self.routes = self
            .routes
            .merge(EntityHandler::<E, B>::new(backend, self.write_failure).routes());
        self
    }

    /// Names of the registered kinds, in registration order.
    #[must_use]
    pub fn kinds(&self) -> &[&'static str] {
        &self.kinds
    }

    /// Finishes the registry. Trailing slashes are trimmed before routing,
    /// so `/mission/` reaches the same handler as `/mission`.
    pub fn into_app(self) -> App {
        NormalizePath::trim_trailing_slash(self.routes.layer(TraceLayer::new_for_http()))
    }
}

/// Builds the registry of every kind the service exposes.
pub fn default_registry(config: &ServiceConfig) -> StorageResult<KindRegistry> {
    let registry = KindRegistry::new(config.write_failure);
    let registry = match &config.backend {
        BackendConfig::Memory => registry
            .register::<Mission, _>(Arc::new(MemoryBackend::new()))
            .register::<Hunt, _>(Arc::new(MemoryBackend::new())),
        BackendConfig::Sqlite(path) => with_store(registry, SqliteStore::open(path)?),
        BackendConfig::SqliteInMemory => with_store(registry, SqliteStore::open_in_memory()?),
    };
    Ok(registry)
}

fn with_store(registry: KindRegistry, store: SqliteStore) -> KindRegistry {
    let store = Arc::new(store);
    registry
        .register::<Mission, _>(Arc::new(PersistentBackend::new(Arc::clone(&store))))
        .register::<Hunt, _>(Arc::new(PersistentBackend::new(store)))
}

/// Application serving every kind the service exposes.
pub fn build_app(config: &ServiceConfig) -> StorageResult<App> {
    Ok(default_registry(config)?.into_app())
}
