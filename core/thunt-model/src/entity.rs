use serde::Serialize;
use serde::de::DeserializeOwned;
use thunt_types::EntityKey;

/// A record type belonging to exactly one kind.
///
/// Implementors should mark their identifier field
/// `#[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]`
/// and the struct `#[serde(deny_unknown_fields)]`: a client-supplied `id`
/// is then rejected like any other unknown field, and a value without an
/// identifier serialises without one.
pub trait Entity: Default + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Kind name, e.g. `"Mission"`. Also scopes the identifier namespace.
    const KIND: &'static str;

    /// Stamps the backend-assigned identifier onto the value.
    fn set_id(&mut self, id: EntityKey);

    /// Removes the identifier so the value can be stored without it.
    fn clear_id(&mut self);
}
