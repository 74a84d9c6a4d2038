use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trackhub_core::{AthleteId, DomainError, DomainResult, Entity, InventoryItemId};

use crate::assignment::{status_for_assignee, validate_assignment};

/// Lifecycle status of an inventory item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Available,
    #[serde(rename = "Checked Out")]
    CheckedOut,
    Maintenance,
    Retired,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Available,
        ItemStatus::CheckedOut,
        ItemStatus::Maintenance,
        ItemStatus::Retired,
    ];

    /// Wire representation (as stored and as sent by the UI).
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "Available",
            ItemStatus::CheckedOut => "Checked Out",
            ItemStatus::Maintenance => "Maintenance",
            ItemStatus::Retired => "Retired",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ItemStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(
                    "status must be one of: Available, Checked Out, Maintenance, Retired",
                )
            })
    }
}

/// Optional descriptive attributes of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Stored inventory item document.
///
/// Older documents carry `lastUpdated` instead of `updatedAt` and may lack
/// `createdAt`; both are tolerated on read and normalized on the next write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredInventoryItem")]
pub struct InventoryItem {
    pub id: InventoryItemId,
    /// Human-readable code, e.g. `UNIFORM-001`.
    pub item_id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub status: ItemStatus,
    #[serde(default)]
    pub assigned_to: Option<AthleteId>,
    #[serde(flatten)]
    pub details: ItemDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredInventoryItem {
    id: InventoryItemId,
    item_id: String,
    #[serde(rename = "type")]
    item_type: String,
    status: ItemStatus,
    #[serde(default)]
    assigned_to: Option<AthleteId>,
    #[serde(flatten)]
    details: ItemDetails,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

impl From<StoredInventoryItem> for InventoryItem {
    fn from(doc: StoredInventoryItem) -> Self {
        let touched = doc.updated_at.or(doc.last_updated);
        let created_at = doc.created_at.or(touched).unwrap_or_default();
        InventoryItem {
            id: doc.id,
            item_id: doc.item_id,
            item_type: doc.item_type,
            status: doc.status,
            assigned_to: doc.assigned_to,
            details: doc.details,
            created_at,
            updated_at: touched.unwrap_or(created_at),
        }
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An item that has been validated but not yet stored (the store assigns the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub item_id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub status: ItemStatus,
    pub assigned_to: Option<AthleteId>,
    #[serde(flatten)]
    pub details: ItemDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewInventoryItem {
    pub fn into_item(self, id: InventoryItemId) -> InventoryItem {
        InventoryItem {
            id,
            item_id: self.item_id,
            item_type: self.item_type,
            status: self.status,
            assigned_to: self.assigned_to,
            details: self.details,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl InventoryItem {
    /// Build a new item from a validated draft. `createdAt` and `updatedAt`
    /// both take `now`; nothing client-supplied reaches them.
    pub fn create(draft: ItemDraft, now: DateTime<Utc>) -> NewInventoryItem {
        let mut details = ItemDetails::default();
        draft.details.apply_to(&mut details);

        NewInventoryItem {
            item_id: draft.item_id,
            item_type: draft.item_type,
            status: draft.status,
            assigned_to: draft.assigned_to,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the item's fields from a validated draft.
    ///
    /// Descriptive fields omitted from the draft keep their stored values.
    pub fn apply_update(&mut self, draft: ItemDraft, now: DateTime<Utc>) {
        self.item_id = draft.item_id;
        self.item_type = draft.item_type;
        self.status = draft.status;
        self.assigned_to = draft.assigned_to;
        draft.details.apply_to(&mut self.details);
        self.updated_at = now;
    }

    /// (Re)assign or unassign, moving the status along with the assignee.
    pub fn apply_assignment(&mut self, assignee: Option<AthleteId>, now: DateTime<Utc>) {
        self.status = status_for_assignee(assignee.as_ref());
        self.assigned_to = assignee;
        self.updated_at = now;
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }
}

/// Raw create/update input, exactly as a caller sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub item_id: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Descriptive-field changes carried by a draft.
///
/// `None` leaves the stored value alone; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsPatch {
    pub category: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl DetailsPatch {
    fn apply_to(&self, target: &mut ItemDetails) {
        fn set(slot: &mut Option<String>, patch: &Option<String>) {
            if let Some(value) = patch {
                *slot = non_blank(value);
            }
        }

        set(&mut target.category, &self.category);
        set(&mut target.size, &self.size);
        set(&mut target.condition, &self.condition);
        set(&mut target.location, &self.location);
        set(&mut target.notes, &self.notes);
    }
}

/// Validated create/update input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub item_id: String,
    pub item_type: String,
    pub status: ItemStatus,
    pub assigned_to: Option<AthleteId>,
    pub details: DetailsPatch,
}

impl ItemDraft {
    /// Validate raw input.
    ///
    /// Checks, in order: required fields, status value, then the
    /// `Checked Out ⇔ assignedTo` pairing. An empty `assignedTo` counts as
    /// absent.
    pub fn parse(input: ItemInput) -> DomainResult<Self> {
        let item_id = input.item_id.as_deref().and_then(non_blank);
        let item_type = input.item_type.as_deref().and_then(non_blank);
        let status = input.status.as_deref().and_then(non_blank);

        let mut missing = Vec::new();
        if item_id.is_none() {
            missing.push("itemId");
        }
        if item_type.is_none() {
            missing.push("type");
        }
        if status.is_none() {
            missing.push("status");
        }

        let (Some(item_id), Some(item_type), Some(status)) = (item_id, item_type, status) else {
            return Err(DomainError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        };

        let status: ItemStatus = status.parse()?;
        let assigned_to = normalize_assignee(input.assigned_to.as_deref());
        validate_assignment(status, assigned_to.as_ref())?;

        Ok(Self {
            item_id,
            item_type,
            status,
            assigned_to,
            details: DetailsPatch {
                category: input.category,
                size: input.size,
                condition: input.condition,
                location: input.location,
                notes: input.notes,
            },
        })
    }
}

/// Treat a missing, empty, or whitespace-only assignee as "unassigned".
pub fn normalize_assignee(raw: Option<&str>) -> Option<AthleteId> {
    raw.and_then(|s| s.parse::<AthleteId>().ok())
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
