//! Assignment rules between inventory items and athletes.
//!
//! The item's `assignedTo` is the source of truth; an athlete's
//! `hasUniform`/`uniformId` pair mirrors it. These helpers decide what is
//! allowed and which athlete records a transition touches. Applying those
//! writes is the caller's job.

use trackhub_core::{AthleteId, DomainError, DomainResult};

use crate::item::{InventoryItem, ItemStatus};

/// Enforce `assignedTo != null ⇔ status == Checked Out` on caller input.
pub fn validate_assignment(status: ItemStatus, assigned_to: Option<&AthleteId>) -> DomainResult<()> {
    match (status, assigned_to) {
        (ItemStatus::CheckedOut, None) => Err(DomainError::validation(
            "an athlete must be assigned to checked out items",
        )),
        (ItemStatus::CheckedOut, Some(_)) => Ok(()),
        (_, Some(_)) => Err(DomainError::validation(
            "only checked out items can be assigned to an athlete",
        )),
        (_, None) => Ok(()),
    }
}

/// Guard for the narrow assign operation.
///
/// An item that currently has an assignee may always be reassigned or
/// unassigned. An unassigned item must be `Available`.
pub fn ensure_assignable(item: &InventoryItem) -> DomainResult<()> {
    if item.status != ItemStatus::Available && !item.is_assigned() {
        return Err(DomainError::validation("only available items can be assigned"));
    }
    Ok(())
}

/// Status an item takes after the assign operation.
pub fn status_for_assignee(assignee: Option<&AthleteId>) -> ItemStatus {
    match assignee {
        Some(_) => ItemStatus::CheckedOut,
        None => ItemStatus::Available,
    }
}

/// Before/after view of an item's assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentChange {
    pub previous: Option<AthleteId>,
    pub next: Option<AthleteId>,
}

impl AssignmentChange {
    pub fn new(previous: Option<AthleteId>, next: Option<AthleteId>) -> Self {
        Self { previous, next }
    }

    /// No athlete record needs a write.
    pub fn is_unchanged(&self) -> bool {
        self.previous == self.next
    }

    /// Athlete whose uniform flag must be cleared, if any.
    pub fn released(&self) -> Option<&AthleteId> {
        if self.is_unchanged() {
            return None;
        }
        self.previous.as_ref()
    }

    /// Athlete whose uniform flag must be set, if any.
    pub fn acquired(&self) -> Option<&AthleteId> {
        if self.is_unchanged() {
            return None;
        }
        self.next.as_ref()
    }
}
