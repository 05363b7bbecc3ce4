//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, notifications, clock,
//! theme) from page and component logic so the pure parts stay testable.

pub mod auth;
pub mod clock;
pub mod dark_mode;
pub mod markdown;
pub mod notify;
pub mod persistence;
