//! StitchDesk Core - local-first order intake for a small apparel shop
//!
//! # Architecture Overview
//!
//! This crate is the data layer behind a single-client order intake tool:
//!
//! - **Entity store** (`store`): authoritative Models and Orders, persisted
//!   per tenant namespace with full-collection rewrites on every mutation
//! - **Schema patcher** (`store::patch`): tolerant defaulting of raw records,
//!   applied on every load (the migration mechanism)
//! - **Query engine** (`query`): filtered order views and per-model size
//!   breakdowns, recomputed on read
//! - **CSV export** (`export`): byte-exact tabular serialization
//! - **Sync client** (`sync`): best-effort push of orders to a webhook sink
//! - **Order desk** (`intake`): orchestration, transient notices, attachments
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── core/       # configuration, error taxonomy
//! ├── models/     # Model, Order, Size
//! ├── store/      # namespace key, patcher, redb-backed KV, entity store
//! ├── query/      # filtering and aggregation
//! ├── export/     # CSV serializer
//! ├── sync/       # webhook sink client
//! ├── intake/     # order desk service
//! └── utils/      # logging, time helpers
//! ```
//!
//! Local state is always the source of truth: sync failures surface as
//! transient notices and never roll back a committed mutation.

pub mod core;
pub mod export;
pub mod intake;
pub mod models;
pub mod query;
pub mod store;
pub mod sync;
pub mod utils;

// Re-export public types
pub use crate::core::{AppError, AppResult, Config};
pub use intake::{Notice, OrderDesk};
pub use models::{Model, Order, OrderDraft, Size};
pub use query::{breakdown, filter, OrderFilter, SizeBreakdown};
pub use store::{namespace_key, EntityStore, LocalStore};
pub use sync::{SyncClient, SyncError};

// Re-export logger functions
pub use utils::logger::init_logger;
