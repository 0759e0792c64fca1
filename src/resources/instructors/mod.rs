//! Instructors and their bookings

pub mod models;
mod service;

pub use service::*;
