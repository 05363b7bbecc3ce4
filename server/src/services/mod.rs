//! Request-level logic that sits between routes and the vendor clients.

pub mod chat;
