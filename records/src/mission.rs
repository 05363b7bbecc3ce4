//! Missions: the dashboard's to-do items, plus the reminder due-check the
//! Tasks panel polls.

#[cfg(test)]
#[path = "mission_test.rs"]
mod mission_test;

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RecordError;

pub const MAX_TITLE_CHARS: usize = 200;

/// Mission urgency. Ordered low → high.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse the lowercase wire name; unknown values map to `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A stored mission row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminder_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminded: bool,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a mission.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionDraft {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminder_at: Option<DateTime<Utc>>,
}

/// Partial update for a mission. Absent fields are left untouched.
///
/// `deadline` and `reminder_at` use a nested option so a patch can clear them:
/// `Some(None)` serializes as `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub reminder_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// A reminder that came due during a poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReminderAlert {
    pub mission_id: String,
    pub title: String,
    pub deadline: Option<DateTime<Utc>>,
}

impl ReminderAlert {
    /// Notification body text with the deadline in the viewer's local offset.
    #[must_use]
    pub fn body(&self, offset: FixedOffset) -> String {
        match self.deadline {
            Some(deadline) => format!("Due {}", deadline.with_timezone(&offset).format("%a %b %-d, %H:%M")),
            None => "Mission reminder".to_owned(),
        }
    }
}

/// Distinguish an explicit `null` (clear the field) from an absent key.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_title(raw: &str) -> Result<String, RecordError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(RecordError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(RecordError::TitleTooLong { max: MAX_TITLE_CHARS });
    }
    Ok(title.to_owned())
}

fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
}

impl MissionDraft {
    /// Trim and check the draft, returning the cleaned copy.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyTitle`] or [`RecordError::TitleTooLong`].
    pub fn validate(self) -> Result<Self, RecordError> {
        Ok(Self { title: validate_title(&self.title)?, notes: clean_notes(self.notes), ..self })
    }
}

impl MissionPatch {
    /// Trim and check the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] when a present title is blank or too long.
    pub fn validate(self) -> Result<Self, RecordError> {
        let title = self.title.as_deref().map(validate_title).transpose()?;
        let notes = self.notes.map(clean_notes);
        Ok(Self { title, notes, ..self })
    }

    /// Patch that only flips completion.
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self { completed: Some(completed), ..Self::default() }
    }

    /// Patch that records a fired reminder.
    #[must_use]
    pub fn reminded() -> Self {
        Self { reminded: Some(true), ..Self::default() }
    }

    /// Whether writing this patch could re-arm the reminder, which needs the
    /// stored row to decide.
    #[must_use]
    pub fn touches_reminder(&self) -> bool {
        self.reminder_at.is_some() && self.reminded.is_none()
    }

    /// Resolve the patch against the stored row for stores that cannot compare
    /// values themselves: when `reminder_at` actually changes, the returned
    /// patch also clears `reminded`.
    #[must_use]
    pub fn resolve_against(mut self, current: &Mission) -> Self {
        if self.touches_reminder() {
            let mut next = current.clone();
            next.apply(self.clone());
            if next.reminded != current.reminded {
                self.reminded = Some(next.reminded);
            }
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Mission {
    /// Build a new, open mission from a validated draft.
    #[must_use]
    pub fn from_draft(draft: MissionDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: crate::new_id(),
            user_id: None,
            title: draft.title,
            notes: draft.notes,
            priority: draft.priority,
            deadline: draft.deadline,
            reminder_at: draft.reminder_at,
            reminded: false,
            completed: false,
            created_at: now,
        }
    }

    /// Flip the completed flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Apply the fields present in `patch`. A new reminder time re-arms the
    /// reminder unless the patch sets `reminded` itself.
    pub fn apply(&mut self, patch: MissionPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if let Some(reminder_at) = patch.reminder_at {
            if reminder_at != self.reminder_at {
                self.reminded = false;
            }
            self.reminder_at = reminder_at;
        }
        if let Some(reminded) = patch.reminded {
            self.reminded = reminded;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.deadline.is_some_and(|d| d < now)
    }

    /// Whether the reminder should fire at `now`.
    #[must_use]
    pub fn reminder_due(&self, now: DateTime<Utc>) -> bool {
        !self.completed && !self.reminded && self.reminder_at.is_some_and(|at| at <= now)
    }
}

fn compare_missions(a: &Mission, b: &Mission) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.priority.cmp(&a.priority))
        .then_with(|| match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Display order: open before done, high priority first, earliest deadline
/// first (missions without one last), then oldest first.
pub fn sort_missions(missions: &mut [Mission]) {
    missions.sort_by(compare_missions);
}

/// Missions whose reminder is due at `now`, in array order.
#[must_use]
pub fn due_reminders(missions: &[Mission], now: DateTime<Utc>) -> Vec<ReminderAlert> {
    missions
        .iter()
        .filter(|m| m.reminder_due(now))
        .map(|m| ReminderAlert { mission_id: m.id.clone(), title: m.title.clone(), deadline: m.deadline })
        .collect()
}
