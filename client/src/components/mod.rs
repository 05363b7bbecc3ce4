//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `card` is the draggable frame; each `*_panel` is the content of one card
//! and reads/writes its state through Leptos context. `toast_stack` renders
//! the notices every panel reports errors through.

pub mod agenda_panel;
pub mod card;
pub mod chat_panel;
pub mod missions_panel;
pub mod notes_panel;
pub mod profile_panel;
pub mod toast_stack;
pub mod vault_panel;
