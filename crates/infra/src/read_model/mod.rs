//! Read-model joins: UI-ready shapes assembled from stored documents.
//!
//! Nothing here writes. Dangling references (an item pointing at a deleted
//! athlete) are tolerated and simply render without a name.

pub mod athletes;
pub mod inventory;

pub use athletes::{AssignedItem, AthleteView};
pub use inventory::InventoryItemView;

/// Query side over a document store.
#[derive(Debug, Clone)]
pub struct ReadModel<S> {
    store: S,
}

impl<S> ReadModel<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}
