//! Lotus
//!
//! Lotus is the session and API layer of the studio admin dashboard: it keeps the
//! admin's bearer token, attaches it to every call against the yoga, store and
//! users backends, and guards the admin views behind it.

pub mod api;
pub mod context;
pub mod guard;
pub mod ids;
pub mod resources;
pub mod session;
