//! Store items and orders

pub mod models;
mod service;

pub use service::*;
