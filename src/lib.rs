//! # Tally
//!
//! Personal event tally - record timestamped events at the press of a button,
//! then list, search, and chart them over days, months, and years.
//!
//! ## Features
//!
//! - **Durable store**: SQLite-backed event log in WAL mode
//! - **Calendar-correct charts**: day, month, and year buckets with gap filling
//! - **Exact labels**: events group by exact label match, no normalization
//! - **REST API**: Axum server with a small CLI client
//!
//! ## Modules
//!
//! - [`store`]: SQLite-backed event store
//! - [`series`]: Bucketing, gap filling, and summary statistics
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tally::series::{bucketize, densify, Granularity, SeriesSummary};
//! use tally::store::{Event, EventStore};
//! use chrono::{Offset, Utc};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = EventStore::open(Path::new("tally_data"))?;
//!
//!     // Record a press
//!     store.insert(&Event::new("coffee"))?;
//!
//!     // Chart it by day
//!     let events = store.events_for_label("coffee")?;
//!     let sparse = bucketize(&events, Granularity::Day, "coffee", Utc.fix())?;
//!     let dense = densify(sparse, Granularity::Day)?;
//!     let summary = SeriesSummary::compute(&dense);
//!
//!     println!("{} presses over {} days", summary.total, dense.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod series;
pub mod store;

// Re-export top-level types for convenience
pub use store::{Event, EventFilter, EventStore, StoreError, StoreResult, StoreStats};

pub use series::{
    bucketize, densify, Granularity, Period, SeriesError, SeriesPoint, SeriesResult, SeriesSummary,
};

pub use api::{build_router, serve, ApiConfig, ApiError, ApiResult, AppState};

pub use config::{
    ApiConfig as ConfigApiConfig, ChartConfig, Config, ConfigError, LoggingConfig,
    StoreConfig as ConfigStoreConfig,
};
