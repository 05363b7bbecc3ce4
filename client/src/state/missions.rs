//! Missions panel state and the local side of reminder bookkeeping.

#[cfg(test)]
#[path = "missions_test.rs"]
mod missions_test;

use chrono::{DateTime, Utc};
use records::mission::{due_reminders, sort_missions};
use records::{Mission, MissionPatch, ReminderAlert};

#[derive(Clone, Debug, Default)]
pub struct MissionsState {
    pub items: Vec<Mission>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

impl MissionsState {
    /// Replace the list with a fresh server copy.
    pub fn replace(&mut self, mut items: Vec<Mission>) {
        sort_missions(&mut items);
        self.items = items;
        self.loading = false;
        self.loaded = true;
        self.error = None;
    }

    pub fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Insert or replace by id, keeping display order.
    pub fn upsert(&mut self, mission: Mission) {
        match self.items.iter_mut().find(|m| m.id == mission.id) {
            Some(existing) => *existing = mission,
            None => self.items.push(mission),
        }
        sort_missions(&mut self.items);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|m| m.id != id);
        self.items.len() != before
    }

    /// Flip completion locally and return the patch that persists it, or
    /// `None` when the mission is not in the list.
    pub fn toggle(&mut self, id: &str) -> Option<MissionPatch> {
        let mission = self.items.iter_mut().find(|m| m.id == id)?;
        mission.toggle();
        let patch = MissionPatch::completed(mission.completed);
        sort_missions(&mut self.items);
        Some(patch)
    }

    /// Collect reminders that came due and mark them reminded locally, so the
    /// next poll does not fire them again while the server write is in flight.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<ReminderAlert> {
        let alerts = due_reminders(&self.items, now);
        for alert in &alerts {
            if let Some(m) = self.items.iter_mut().find(|m| m.id == alert.mission_id) {
                m.reminded = true;
            }
        }
        alerts
    }

    pub fn open_count(&self) -> usize {
        self.items.iter().filter(|m| !m.completed).count()
    }

    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.items.iter().filter(|m| m.is_overdue(now)).count()
    }
}
