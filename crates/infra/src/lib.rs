//! Infrastructure layer: document storage and the services built on it.

pub mod assignment;
pub mod error;
pub mod read_model;
pub mod roster;
pub mod schedule;
pub mod store;

pub use assignment::AssignmentEngine;
pub use error::{ServiceError, ServiceResult};
pub use read_model::{AssignedItem, AthleteView, InventoryItemView, ReadModel};
pub use roster::AthleteService;
pub use schedule::ScheduleService;
pub use store::{Collection, Document, DocumentStore, Filter, InMemoryDocumentStore, StoreError};

#[cfg(feature = "postgres")]
pub use store::PostgresDocumentStore;

#[cfg(test)]
mod testing;

#[cfg(test)]
mod integration_tests;
