//! Tally aggregation core
//!
//! Turns raw events into the dense, chart-ready series behind the stats
//! view:
//!
//! - **granularity**: the day/month/year period selector
//! - **period**: calendar periods, canonical keys, successor arithmetic
//! - **bucket**: events → sparse `(key, count)` series
//! - **densify**: sparse series → contiguous zero-filled series
//! - **summary**: total/average/max/min over a series
//! - **types**: the shared `SeriesPoint`
//! - **error**: error types
//!
//! # Pipeline
//!
//! ```text
//! events ──bucketize──► sparse series ──densify──► dense series ──► summary
//! ```
//!
//! The whole pipeline is pure: no I/O, no shared state, no clock reads.
//! Callers fetch events, pick a granularity and a calendar offset, and get a
//! fresh result per invocation, so concurrent calls never interfere. Cost is
//! linear in the number of periods spanned.
//!
//! # Example
//!
//! ```rust
//! use chrono::FixedOffset;
//! use tally::series::{bucketize, densify, Granularity, SeriesSummary};
//! use tally::store::Event;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let utc = FixedOffset::east_opt(0).expect("zero offset");
//!     let events = vec![
//!         Event::with_timestamp("press", 1704448800000),
//!         Event::with_timestamp("press", 1704618000000),
//!     ];
//!
//!     let sparse = bucketize(&events, Granularity::Day, "press", utc)?;
//!     let dense = densify(sparse, Granularity::Day)?;
//!     let summary = SeriesSummary::compute(&dense);
//!
//!     assert_eq!(dense.len(), 3); // Jan 5, 6, 7
//!     assert_eq!(summary.total, 2);
//!     Ok(())
//! }
//! ```

pub mod bucket;
pub mod densify;
pub mod error;
pub mod granularity;
pub mod period;
pub mod summary;
pub mod types;

// Re-export commonly used types
pub use bucket::bucketize;
pub use densify::densify;
pub use error::{SeriesError, SeriesResult};
pub use granularity::Granularity;
pub use period::Period;
pub use summary::SeriesSummary;
pub use types::SeriesPoint;
