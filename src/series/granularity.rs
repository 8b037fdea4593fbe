//! Period granularity for bucketing
//!
//! The granularity is fixed per aggregation run; day, month, and year
//! buckets are never mixed within one series.

use serde::{Deserialize, Serialize};

/// Period size used to bucket events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One calendar date per bucket
    Day,
    /// One calendar month per bucket
    Month,
    /// One calendar year per bucket
    Year,
}

impl Granularity {
    /// Parse from string
    ///
    /// Accepts the canonical names and their adjective forms
    /// (`day`/`daily`, `month`/`monthly`, `year`/`yearly`), case-insensitive.
    /// Anything else is `None`; callers reject it rather than defaulting.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Some(Self::Day),
            "month" | "monthly" => Some(Self::Month),
            "year" | "yearly" => Some(Self::Year),
            _ => None,
        }
    }

    /// Get all granularities for iteration
    pub fn all() -> &'static [Granularity] {
        &[Granularity::Day, Granularity::Month, Granularity::Year]
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Month => write!(f, "month"),
            Granularity::Year => write!(f, "year"),
        }
    }
}
