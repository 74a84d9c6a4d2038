//! Identity of stored documents.

/// A document model whose id is assigned by the store.
///
/// The id is kept out of the stored fields and travels beside them, so it
/// only needs to be viewable as the store's string key.
pub trait Entity {
    type Id: AsRef<str> + Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
