use core::cmp::Ordering;
use core::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use trackhub_core::{DomainError, DomainResult, Entity, ScheduleEventId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Practice,
    Meet,
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "practice" => Ok(EventKind::Practice),
            "meet" => Ok(EventKind::Meet),
            _ => Err(DomainError::validation("kind must be one of: practice, meet")),
        }
    }
}

/// Stored schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub id: ScheduleEventId,
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for ScheduleEvent {
    type Id = ScheduleEventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl ScheduleEvent {
    pub fn create(draft: ScheduleEventDraft, now: DateTime<Utc>) -> NewScheduleEvent {
        NewScheduleEvent {
            draft,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, draft: ScheduleEventDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.kind = draft.kind;
        self.date = draft.date;
        self.start_time = draft.start_time;
        self.end_time = draft.end_time;
        self.location = draft.location;
        self.notes = draft.notes;
        self.updated_at = now;
    }

    /// Calendar order: date, then start time (all-day entries first).
    pub fn chronological(a: &ScheduleEvent, b: &ScheduleEvent) -> Ordering {
        a.date
            .cmp(&b.date)
            .then_with(|| a.start_time.cmp(&b.start_time))
    }
}

/// Entry that has been validated but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleEvent {
    #[serde(flatten)]
    pub draft: ScheduleEventDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewScheduleEvent {
    pub fn into_event(self, id: ScheduleEventId) -> ScheduleEvent {
        let d = self.draft;
        ScheduleEvent {
            id,
            title: d.title,
            kind: d.kind,
            date: d.date,
            start_time: d.start_time,
            end_time: d.end_time,
            location: d.location,
            notes: d.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Raw create/update input. Dates are `YYYY-MM-DD`, times `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEventInput {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEventDraft {
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl ScheduleEventDraft {
    pub fn parse(input: ScheduleEventInput) -> DomainResult<Self> {
        let title = non_blank(input.title.as_deref())
            .ok_or_else(|| DomainError::validation("title is required"))?;
        let kind = match non_blank(input.kind.as_deref()) {
            Some(kind) => kind.parse()?,
            None => EventKind::Practice,
        };
        let date = non_blank(input.date.as_deref())
            .ok_or_else(|| DomainError::validation("date is required"))?;
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| DomainError::validation("date must be formatted YYYY-MM-DD"))?;

        let start_time = parse_time("startTime", input.start_time.as_deref())?;
        let end_time = parse_time("endTime", input.end_time.as_deref())?;
        if let (Some(start), Some(end)) = (start_time, end_time) {
            if end < start {
                return Err(DomainError::validation("endTime cannot be before startTime"));
            }
        }

        Ok(Self {
            title,
            kind,
            date,
            start_time,
            end_time,
            location: non_blank(input.location.as_deref()),
            notes: non_blank(input.notes.as_deref()),
        })
    }
}

fn parse_time(field: &str, raw: Option<&str>) -> DomainResult<Option<NaiveTime>> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| DomainError::validation(format!("{field} must be formatted HH:MM")))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
