//! Utility functions

pub mod logger;
pub mod time;

pub use time::{now_millis, now_rfc3339};
