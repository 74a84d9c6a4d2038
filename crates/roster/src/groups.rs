//! Training groups: a fixed skill-tier × discipline table.
//!
//! Lookups are total. Unknown ids map to the default group's name and unknown
//! names map to the default id, so a bad value never blocks a roster render.

use serde::Serialize;

/// One row of the group table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: u32,
    pub name: &'static str,
}

pub const DEFAULT_GROUP_ID: u32 = 1;

pub const GROUPS: [Group; 12] = [
    Group { id: 1, name: "Elite Sprinters" },
    Group { id: 2, name: "Elite Distance" },
    Group { id: 3, name: "Elite Throwers" },
    Group { id: 4, name: "Elite Jumpers" },
    Group { id: 5, name: "Intermediate Sprinters" },
    Group { id: 6, name: "Intermediate Distance" },
    Group { id: 7, name: "Intermediate Throwers" },
    Group { id: 8, name: "Intermediate Jumpers" },
    Group { id: 9, name: "Beginner Sprinters" },
    Group { id: 10, name: "Beginner Distance" },
    Group { id: 11, name: "Beginner Throwers" },
    Group { id: 12, name: "Beginner Jumpers" },
];

fn lookup(id: u32) -> Option<&'static Group> {
    GROUPS.iter().find(|g| g.id == id)
}

/// Display name for a group id.
pub fn group_name(id: u32) -> &'static str {
    lookup(id)
        .or_else(|| lookup(DEFAULT_GROUP_ID))
        .map(|g| g.name)
        .unwrap_or(GROUPS[0].name)
}

/// Group id for a display name (trimmed, case-insensitive).
pub fn group_id(name: &str) -> u32 {
    let name = name.trim();
    GROUPS
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(name))
        .map(|g| g.id)
        .unwrap_or(DEFAULT_GROUP_ID)
}

/// Clamp an arbitrary id onto the table.
pub fn normalize_group_id(id: u32) -> u32 {
    lookup(id).map(|g| g.id).unwrap_or(DEFAULT_GROUP_ID)
}
