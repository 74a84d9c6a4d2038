use serde::{Deserialize, Serialize};

use trackhub_core::{AthleteId, DomainError, DomainResult, Entity};

use crate::groups::{DEFAULT_GROUP_ID, group_id, group_name, normalize_group_id};

/// Stored athlete document.
///
/// `hasUniform`/`uniformId` mirror inventory assignments and are written only
/// by the assignment engine; roster edits never touch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: AthleteId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default = "default_group")]
    pub group_id: u32,
    #[serde(default)]
    pub has_uniform: bool,
    #[serde(default)]
    pub uniform_id: Option<String>,
}

fn default_group() -> u32 {
    DEFAULT_GROUP_ID
}

impl Entity for Athlete {
    type Id = AthleteId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Athlete {
    /// Build a new athlete from a validated draft. Nobody starts with a uniform.
    pub fn create(draft: AthleteDraft) -> NewAthlete {
        NewAthlete {
            first_name: draft.first_name,
            last_name: draft.last_name,
            group_id: draft.group_id,
            has_uniform: false,
            uniform_id: None,
        }
    }

    pub fn name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }

    pub fn group_name(&self) -> &'static str {
        group_name(self.group_id)
    }
}

/// `"<first> <last>"`, trimmed.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}

/// Athlete that has been validated but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAthlete {
    pub first_name: String,
    pub last_name: String,
    pub group_id: u32,
    pub has_uniform: bool,
    pub uniform_id: Option<String>,
}

impl NewAthlete {
    pub fn into_athlete(self, id: AthleteId) -> Athlete {
        Athlete {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            group_id: self.group_id,
            has_uniform: self.has_uniform,
            uniform_id: self.uniform_id,
        }
    }
}

/// Raw roster input. `groupId` wins over `group` (a display name) when both are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub group_id: Option<u32>,
    pub group: Option<String>,
}

/// Validated roster fields; serializes as the partial document a roster edit writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteDraft {
    pub first_name: String,
    pub last_name: String,
    pub group_id: u32,
}

impl AthleteDraft {
    pub fn parse(input: AthleteInput) -> DomainResult<Self> {
        let first_name = input.first_name.as_deref().map(str::trim).unwrap_or_default();
        let last_name = input.last_name.as_deref().map(str::trim).unwrap_or_default();

        let mut missing = Vec::new();
        if first_name.is_empty() {
            missing.push("firstName");
        }
        if last_name.is_empty() {
            missing.push("lastName");
        }
        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let group_id = match (input.group_id, input.group.as_deref()) {
            (Some(id), _) => normalize_group_id(id),
            (None, Some(name)) => group_id(name),
            (None, None) => DEFAULT_GROUP_ID,
        };

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            group_id,
        })
    }
}

/// The mirrored uniform pair, written as a partial athlete document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniformStatus {
    pub has_uniform: bool,
    pub uniform_id: Option<String>,
}

impl UniformStatus {
    pub fn issued(item_code: impl Into<String>) -> Self {
        Self {
            has_uniform: true,
            uniform_id: Some(item_code.into()),
        }
    }

    pub fn cleared() -> Self {
        Self {
            has_uniform: false,
            uniform_id: None,
        }
    }
}
