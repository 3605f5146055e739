use std::fmt;
use std::marker::PhantomData;

use crate::Entity;

/// Per-kind configuration: how to manufacture and address entities of `E`.
///
/// Carries no state beyond the kind itself; every method is side-effect free.
pub struct EntityDescriptor<E> {
    _kind: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityDescriptor<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self { _kind: PhantomData }
    }

    /// A blank entity, ready to be filled by a strict decode.
    #[must_use]
    pub fn make_blank(&self) -> E {
        E::default()
    }

    /// An empty homogeneous container for a bulk fetch.
    #[must_use]
    pub fn make_list(&self) -> Vec<E> {
        Vec::new()
    }

    /// Addresses the `index`-th element of `list`. Mutations through the
    /// returned reference land in the list itself.
    pub fn element_at<'a>(&self, list: &'a mut [E], index: usize) -> Option<&'a mut E> {
        list.get_mut(index)
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        E::KIND
    }

    /// Path segment the kind is served under, e.g. `mission`.
    #[must_use]
    pub fn route_segment(&self) -> String {
        E::KIND.to_ascii_lowercase()
    }
}

impl<E: Entity> Default for EntityDescriptor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EntityDescriptor<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EntityDescriptor<E> {}

impl<E: Entity> fmt::Debug for EntityDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("kind", &E::KIND)
            .finish()
    }
}
