//! Shared dashboard records for the `server` and `client` crates.
//!
//! DESIGN
//! ======
//! Every record is a flat serde struct that mirrors a Supabase row or a
//! localStorage entry. Validation lives next to the record so both the API
//! handlers and the panels reject the same inputs with the same messages.
//! Nothing in this crate reads the clock; callers pass `now` explicitly so
//! the same code runs on the server and in the browser.

pub mod agenda;
pub mod chat;
pub mod error;
pub mod layout;
pub mod mission;
pub mod note;
pub mod profile;
pub mod vault;

pub use agenda::{AgendaDraft, AgendaEvent};
pub use chat::{ChatReply, ChatRequest, ChatRole, ChatTurn};
pub use error::RecordError;
pub use layout::{CardLayout, PanelKind};
pub use mission::{Mission, MissionDraft, MissionPatch, Priority, ReminderAlert};
pub use note::Note;
pub use profile::{AvatarUpload, Profile, ProfileUpdate};
pub use vault::VaultLink;

/// Generate a fresh record id (UUID v4 string).
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
