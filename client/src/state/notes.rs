//! Notes panel state. Notes live only in this browser's localStorage.

#[cfg(test)]
#[path = "notes_test.rs"]
mod notes_test;

use chrono::{DateTime, Utc};
use records::Note;
use records::RecordError;
use records::note::sort_notes;

pub const STORAGE_KEY: &str = "deskboard.notes";

#[derive(Clone, Debug, Default)]
pub struct NotesState {
    pub notes: Vec<Note>,
    /// Id of the note open in the editor; `None` while composing a new one.
    pub selected: Option<String>,
    pub preview: bool,
}

impl NotesState {
    pub fn from_stored(stored: Option<Vec<Note>>) -> Self {
        let mut notes = stored.unwrap_or_default();
        sort_notes(&mut notes);
        Self { notes, ..Self::default() }
    }

    pub fn selected_note(&self) -> Option<&Note> {
        let id = self.selected.as_deref()?;
        self.notes.iter().find(|n| n.id == id)
    }

    /// Save the editor contents: edits the selected note or creates a new one
    /// and selects it.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyNote`] when title and body are both blank.
    pub fn save(&mut self, title: &str, body: &str, now: DateTime<Utc>) -> Result<(), RecordError> {
        let existing = self
            .selected
            .as_deref()
            .and_then(|id| self.notes.iter_mut().find(|n| n.id == id));
        match existing {
            Some(note) => note.edit(title, body, now)?,
            None => {
                let note = Note::new(title, body, now)?;
                self.selected = Some(note.id.clone());
                self.notes.push(note);
            }
        }
        sort_notes(&mut self.notes);
        Ok(())
    }

    pub fn toggle_pin(&mut self, id: &str) {
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.pinned = !note.pinned;
        }
        sort_notes(&mut self.notes);
    }

    pub fn remove(&mut self, id: &str) {
        self.notes.retain(|n| n.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    pub fn compose(&mut self) {
        self.selected = None;
        self.preview = false;
    }
}
