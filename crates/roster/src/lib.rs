//! Roster domain module: athletes and training groups.
//!
//! Pure data + rules; storage and HTTP live elsewhere.

pub mod athlete;
pub mod groups;

pub use athlete::{Athlete, AthleteDraft, AthleteInput, NewAthlete, UniformStatus, display_name};
pub use groups::{DEFAULT_GROUP_ID, GROUPS, Group, group_id, group_name, normalize_group_id};
