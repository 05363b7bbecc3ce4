//! Agenda panel state: loaded events plus the calendar cursor.
//!
//! The selected day and visible month are local dates; events stay in UTC
//! and are projected through the viewer's offset when grouped.

#[cfg(test)]
#[path = "agenda_test.rs"]
mod agenda_test;

use chrono::{Datelike, FixedOffset, NaiveDate};
use records::AgendaEvent;
use records::agenda::{events_on, shift_month};

#[derive(Clone, Debug, Default)]
pub struct AgendaState {
    pub events: Vec<AgendaEvent>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: NaiveDate,
    /// Visible month as `(year, month)`.
    pub month: (i32, u32),
}

impl AgendaState {
    pub fn new(today: NaiveDate) -> Self {
        Self { selected: today, month: (today.year(), today.month()), ..Self::default() }
    }

    pub fn replace(&mut self, mut events: Vec<AgendaEvent>) {
        events.sort_by_key(|e| e.starts_at);
        self.events = events;
        self.loading = false;
        self.error = None;
    }

    pub fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn insert(&mut self, event: AgendaEvent) {
        let at = self.events.partition_point(|e| e.starts_at <= event.starts_at);
        self.events.insert(at, event);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    /// Select a day and bring its month into view.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.month = (date.year(), date.month());
    }

    pub fn shift_month(&mut self, delta: i32) {
        let (year, month) = self.month;
        self.month = shift_month(year, month, delta);
    }

    pub fn day_events(&self, offset: FixedOffset) -> Vec<AgendaEvent> {
        events_on(&self.events, self.selected, offset)
    }

    pub fn has_events(&self, date: NaiveDate, offset: FixedOffset) -> bool {
        self.events.iter().any(|e| e.occurs_on(date, offset))
    }

    /// Header text for the visible month, e.g. `March 2026`.
    pub fn month_label(&self) -> String {
        let (year, month) = self.month;
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}
