//! Lotus dashboard: resource views, configuration and the admin command line.

pub mod config;
pub mod content;
pub mod errors;
pub mod logging;
pub mod notifications;
pub mod views;
