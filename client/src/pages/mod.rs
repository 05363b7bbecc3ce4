//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (auth guards, the reminder
//! poller, gesture tracking) and delegates rendering details to `components`.

pub mod dashboard;
pub mod login;
