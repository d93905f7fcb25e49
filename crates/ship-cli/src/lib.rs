//! Session, settings and logging for the shipment manifest CLI.

pub mod config;
pub mod logging;
pub mod session;
