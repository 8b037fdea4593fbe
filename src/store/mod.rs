//! Tally event store
//!
//! Persistence for recorded events:
//!
//! - **types**: `Event` and `EventFilter`
//! - **engine**: the SQLite-backed `EventStore`
//! - **error**: error types
//!
//! The store holds no aggregation logic: insert a row, list rows, delete a
//! row, count rows. Bucketing and densifying live in [`crate::series`],
//! which consumes events fetched from here.

pub mod engine;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use engine::{EventStore, StoreStats};
pub use error::{StoreError, StoreResult};
pub use types::{Event, EventFilter};
