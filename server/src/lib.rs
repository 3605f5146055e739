//! HTTP surface of the thunt entity service.
//!
//! Every registered kind gets the same four routes:
//!
//! | Method | Path          | Success                          |
//! |--------|---------------|----------------------------------|
//! | PUT    | `/<kind>`     | 200, bare identifier             |
//! | GET    | `/<kind>/{id}`| 200, entity with identifier      |
//! | DELETE | `/<kind>/{id}`| 204                              |
//! | GET    | `/<kind>`     | 200, streamed JSON array         |
//!
//! Malformed identifiers and bodies are answered with 400 before the
//! backend is touched; unknown identifiers with 404; backend failures
//! with 503.

pub mod config;
pub mod error;
pub mod handler;
pub mod json;
pub mod registry;
pub mod stream;

pub use config::{BackendConfig, ServiceConfig, WriteFailurePolicy};
pub use error::ApiError;
pub use handler::EntityHandler;
pub use registry::{App, KindRegistry, build_app, default_registry};
pub use stream::JsonArrayStream;
