//! Data models
//!
//! Entities persisted per tenant namespace. Orders are immutable snapshots:
//! they carry copies of the model name and image taken at creation time, not
//! references into the Model collection.

pub mod model;
pub mod order;

// Re-exports
pub use model::*;
pub use order::*;
