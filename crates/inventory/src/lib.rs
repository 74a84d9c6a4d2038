//! Inventory domain module.
//!
//! This crate contains business rules for inventory items and their
//! assignment to athletes, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod assignment;
pub mod item;

pub use assignment::{AssignmentChange, ensure_assignable, status_for_assignee, validate_assignment};
pub use item::{
    DetailsPatch, InventoryItem, ItemDetails, ItemDraft, ItemInput, ItemStatus, NewInventoryItem,
    normalize_assignee,
};
