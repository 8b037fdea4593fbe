//! Series data types
//!
//! A bucketed series is an ordered sequence of `SeriesPoint`s. The same type
//! carries both sparse series (only periods with events, as produced by
//! `bucketize`) and dense series (every period in range, as produced by
//! `densify`); the ordering and gap invariants are documented on the
//! producing functions.

use serde::{Deserialize, Serialize};

/// A single `(period key, count)` entry in a bucketed series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Canonical period key (`YYYY-MM-DD`, `YYYY-MM`, or `YYYY`)
    pub key: String,
    /// Number of events bucketed into this period
    pub count: u64,
}

impl SeriesPoint {
    /// Create a new series point
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}
