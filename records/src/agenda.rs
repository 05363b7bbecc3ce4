//! Calendar events and the day/month grouping the Agenda panel renders.

#[cfg(test)]
#[path = "agenda_test.rs"]
mod agenda_test;

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::mission::MAX_TITLE_CHARS;

/// A stored calendar event row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgendaEvent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgendaDraft {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub all_day: bool,
}

impl AgendaDraft {
    /// Trim and check the draft.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] for a blank or oversized title, or when the
    /// event ends before it starts.
    pub fn validate(self) -> Result<Self, RecordError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(RecordError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(RecordError::TitleTooLong { max: MAX_TITLE_CHARS });
        }
        if self.ends_at < self.starts_at {
            return Err(RecordError::EndsBeforeStart);
        }
        let location = self
            .location
            .map(|l| l.trim().to_owned())
            .filter(|l| !l.is_empty());
        Ok(Self { title: title.to_owned(), location, ..self })
    }
}

/// UTC bounds `[start, end)` of a local calendar day.
fn day_bounds(date: NaiveDate, offset: FixedOffset) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = date
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(offset)
        .single()?
        .with_timezone(&Utc);
    let next = date.checked_add_days(Days::new(1))?;
    let end = next
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(offset)
        .single()?
        .with_timezone(&Utc);
    Some((start, end))
}

impl AgendaEvent {
    #[must_use]
    pub fn from_draft(draft: AgendaDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: crate::new_id(),
            user_id: None,
            title: draft.title,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            location: draft.location,
            all_day: draft.all_day,
            created_at: now,
        }
    }

    /// Whether the event overlaps the local day `date`. Zero-length events
    /// count on the day they start.
    #[must_use]
    pub fn occurs_on(&self, date: NaiveDate, offset: FixedOffset) -> bool {
        let Some((start, end)) = day_bounds(date, offset) else {
            return false;
        };
        if self.starts_at == self.ends_at {
            return self.starts_at >= start && self.starts_at < end;
        }
        self.starts_at < end && self.ends_at > start
    }

    /// Local start date of the event.
    #[must_use]
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        self.starts_at.with_timezone(&offset).date_naive()
    }
}

/// Events overlapping a local day, ordered by start time.
#[must_use]
pub fn events_on(events: &[AgendaEvent], date: NaiveDate, offset: FixedOffset) -> Vec<AgendaEvent> {
    let mut out: Vec<AgendaEvent> = events
        .iter()
        .filter(|e| e.occurs_on(date, offset))
        .cloned()
        .collect();
    out.sort_by_key(|e| (!e.all_day, e.starts_at));
    out
}

/// Events that have not yet ended, soonest first, at most `limit`.
#[must_use]
pub fn upcoming(events: &[AgendaEvent], now: DateTime<Utc>, limit: usize) -> Vec<AgendaEvent> {
    let mut out: Vec<AgendaEvent> = events
        .iter()
        .filter(|e| e.ends_at > now || (e.ends_at == e.starts_at && e.starts_at >= now))
        .cloned()
        .collect();
    out.sort_by_key(|e| e.starts_at);
    out.truncate(limit);
    out
}

/// Monday-first weeks covering `month`. Cells outside the month are `None`.
/// An invalid year/month yields no weeks.
#[must_use]
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = lead;
    let mut day = first;
    while day.month() == month {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

/// Step a `(year, month)` pair by `delta` months.
#[must_use]
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
