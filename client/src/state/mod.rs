//! Reactive state held in `RwSignal` contexts.
//!
//! DESIGN
//! ======
//! Each module owns a plain struct with pure mutators. Components read and
//! update it through `RwSignal<T>` provided by `app::App`; network calls and
//! browser storage stay in the components so the mutators remain testable
//! without a browser.

pub mod agenda;
pub mod auth;
pub mod chat;
pub mod layout;
pub mod missions;
pub mod notes;
pub mod toast;
pub mod ui;
pub mod vault;
