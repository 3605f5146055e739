//! Generic CRUD handlers, one instance per registered kind.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use thunt_model::{Entity, EntityDescriptor};
use thunt_storage::{StorageBackend, StorageError, StorageResult};
use thunt_types::EntityKey;
use tracing::{debug, error};

use crate::config::WriteFailurePolicy;
use crate::error::ApiError;
use crate::json::{self, decode_into};
use crate::stream::JsonArrayStream;

/// Put/Get/Delete/List for entities of kind `E` stored in backend `B`.
///
/// Stateless across requests: every call is an independent transaction
/// against the backend.
pub struct EntityHandler<E, B> {
    descriptor: EntityDescriptor<E>,
    backend: Arc<B>,
    write_failure: WriteFailurePolicy,
}

impl<E, B> EntityHandler<E, B>
where
    E: Entity,
    B: StorageBackend<E>,
{
    pub fn new(backend: Arc<B>, write_failure: WriteFailurePolicy) -> Self {
        Self {
            descriptor: EntityDescriptor::new(),
            backend,
            write_failure,
        }
    }

    /// Routes for this kind: `/<kind>` (GET list, PUT) and `/<kind>/{id}` (GET, DELETE).
    pub fn routes(self) -> Router {
        let collection = format!("/{}", self.descriptor.route_segment());
        let item = format!("{collection}/{{id}}");
        Router::new()
            .route(&collection, get(Self::list).put(Self::put))
            .route(&item, get(Self::get).delete(Self::delete))
            .with_state(Arc::new(self))
    }

    /// Decodes a new entity and answers with its assigned identifier.
    pub async fn put(State(this): State<Arc<Self>>, body: Bytes) -> Result<Response, ApiError> {
        let entity = decode_into(this.descriptor.make_blank(), &body).map_err(|err| {
            debug!(kind = E::KIND, error = %err, "rejected body");
            ApiError::BadRequest(err.to_string())
        })?;

        let key = match this.run("put", move |backend| backend.put(entity)).await {
            Ok(key) => key,
            Err(err) => {
                if this.write_failure == WriteFailurePolicy::Terminate {
                    error!(kind = E::KIND, "store write failed, terminating");
                    std::process::exit(1);
                }
                return Err(err);
            }
        };

        let key: EntityKey = key.into();
        json_response(StatusCode::OK, &key)
    }

    pub async fn get(
        State(this): State<Arc<Self>>,
        Path(raw): Path<String>,
    ) -> Result<Response, ApiError> {
        let key = this.parse_key(&raw)?;
        let mut entity = this
            .run("get", move |backend| backend.get(key))
            .await?
            .ok_or(ApiError::NotFound)?;

        entity.set_id(key.into());
        json_response(StatusCode::OK, &entity)
    }

    pub async fn delete(
        State(this): State<Arc<Self>>,
        Path(raw): Path<String>,
    ) -> Result<StatusCode, ApiError> {
        let key = this.parse_key(&raw)?;
        if this.run("delete", move |backend| backend.delete(key)).await? {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(ApiError::NotFound)
        }
    }

    /// Streams every stored entity as one JSON array.
    pub async fn list(State(this): State<Arc<Self>>) -> Result<Response, ApiError> {
        let rows = this.run("list", |backend| backend.list_all()).await?;
        let count = rows.len();

        let mut keys = Vec::with_capacity(count);
        let mut entities = this.descriptor.make_list();
        for (key, entity) in rows {
            keys.push(key);
            entities.push(entity);
        }
        for (index, key) in keys.into_iter().enumerate() {
            if let Some(entity) = this.descriptor.element_at(&mut entities, index) {
                entity.set_id(key.into());
            }
        }

        let (head, rest) = JsonArrayStream::new(entities).open().map_err(|err| {
            error!(kind = E::KIND, error = %err, "encoding first list element failed");
            ApiError::Unavailable
        })?;

        let chunks = std::iter::once(Ok(head)).chain(rest).inspect(move |chunk| {
            if let Err(err) = chunk {
                error!(kind = E::KIND, count, error = %err, "list stream aborted mid-response");
            }
        });

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from_stream(futures::stream::iter(chunks)))
            .map_err(|err| {
                error!(kind = E::KIND, error = %err, "building list response failed");
                ApiError::Unavailable
            })
    }

    fn parse_key(&self, raw: &str) -> Result<B::Key, ApiError> {
        raw.parse().map_err(|err: thunt_types::Error| {
            debug!(kind = E::KIND, id = raw, error = %err, "rejected identifier");
            ApiError::BadRequest(err.to_string())
        })
    }

    /// Runs a backend call on the blocking pool.
    async fn run<T, F>(&self, op: &'static str, call: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&B) -> StorageResult<T> + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let result = tokio::task::spawn_blocking(move || call(&backend))
            .await
            .unwrap_or_else(|err| Err(StorageError::Unavailable(err.to_string())));

        result.map_err(|err| {
            error!(
                kind = E::KIND,
                op,
                backend = self.backend.name(),
                error = %err,
                "storage operation failed"
            );
            ApiError::Unavailable
        })
    }
}

fn json_response<T>(status: StatusCode, value: &T) -> Result<Response, ApiError>
where
    T: Serialize + ?Sized,
{
    let body = json::to_vec(value).map_err(|err| {
        error!(error = %err, "encoding response failed");
        ApiError::Unavailable
    })?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}
