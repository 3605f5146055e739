//! Core entity model for thunt.
//!
//! Defines what the generic CRUD engine needs to know about a kind:
//! - [`Entity`]: the capability set every stored record type satisfies
//! - [`EntityDescriptor`]: manufactures blank entities and lists for one kind
//! - [`Mission`], [`Hunt`]: the kinds the service exposes
//!
//! Identifiers never travel inside the client payload or the stored payload.
//! Backends carry them out-of-band and the handler stamps them onto the
//! value with [`Entity::set_id`] right before it is encoded.

mod descriptor;
mod entity;
mod kinds;

pub use descriptor::EntityDescriptor;
pub use entity::Entity;
pub use kinds::{Hunt, Mission};
