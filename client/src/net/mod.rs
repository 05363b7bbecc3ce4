//! Networking modules for the `/api` surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps every HTTP call the panels make and `types` holds the session
//! envelopes the auth endpoints return.

pub mod api;
pub mod types;
