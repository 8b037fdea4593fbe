//! Series pipeline error types
//!
//! Every variant indicates invalid input or a calendar-range violation. The
//! pipeline is total over valid input: it never retries, never logs and
//! continues, and never repairs malformed data silently.

use super::granularity::Granularity;
use thiserror::Error;

/// Errors that can occur while bucketing or densifying a series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// Timestamp does not map to a calendar date in years 0000-9999
    #[error("Timestamp {0} is outside the supported calendar range")]
    TimestampOutOfRange(i64),

    /// Key is not the canonical form for the granularity
    #[error("Invalid period key '{key}' for granularity '{granularity}'")]
    InvalidKey {
        key: String,
        granularity: Granularity,
    },

    /// Advancing past this period would leave the supported calendar range
    #[error("The period after {0} is outside the supported calendar range")]
    PeriodOverflow(String),

    /// Series keys are out of order or duplicated
    #[error("Series keys are not strictly ascending: '{prev}' followed by '{next}'")]
    NotAscending { prev: String, next: String },
}

/// Result type alias for series operations
pub type SeriesResult<T> = Result<T, SeriesError>;
