//! Notes kept in browser storage by the Notes panel.

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Markdown source.
    pub body: String,
    #[serde(default)]
    pub pinned: bool,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a note. Either the title or the body must have content.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyNote`] when both are blank.
    pub fn new(title: &str, body: &str, now: DateTime<Utc>) -> Result<Self, RecordError> {
        let mut note =
            Self { id: crate::new_id(), title: String::new(), body: String::new(), pinned: false, updated_at: now };
        note.edit(title, body, now)?;
        Ok(note)
    }

    /// Replace title and body, bumping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyNote`] when both are blank; the note is
    /// left unchanged.
    pub fn edit(&mut self, title: &str, body: &str, now: DateTime<Utc>) -> Result<(), RecordError> {
        if title.trim().is_empty() && body.trim().is_empty() {
            return Err(RecordError::EmptyNote);
        }
        self.title = title.trim().to_owned();
        self.body = body.to_owned();
        self.updated_at = now;
        Ok(())
    }

    /// Heading shown in the note list: the title, else the preview.
    #[must_use]
    pub fn heading(&self) -> String {
        if self.title.is_empty() { self.preview(40) } else { self.title.clone() }
    }

    /// First non-blank body line, cut to `max_chars` with a trailing `…`.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let line = self
            .body
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .trim_start_matches('#')
            .trim_start();
        if line.chars().count() <= max_chars {
            return line.to_owned();
        }
        let mut cut: String = line.chars().take(max_chars).collect();
        cut.push('…');
        cut
    }
}

/// Pinned notes first, then most recently edited.
pub fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.pinned.cmp(&a.pinned).then_with(|| b.updated_at.cmp(&a.updated_at)));
}
