//! Core identifier types for thunt.
//!
//! Every entity kind has its own identifier namespace. Two families of
//! identifiers exist, one per storage backend:
//! - [`NumericId`]: store-assigned 64-bit integers (persistent backend)
//! - [`RandomId`]: randomly generated UUID v4 values (in-memory backend)
//!
//! [`EntityKey`] carries either one on an entity value and serialises to the
//! bare JSON form clients see (`7` or `"0d9c…"`).

mod ids;

pub use ids::{EntityKey, NumericId, RandomId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing identifiers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid numeric id: {0}")]
    InvalidNumericId(#[from] std::num::ParseIntError),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
