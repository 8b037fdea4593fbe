//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

use crate::series::SeriesSummary;
use crate::store::Event;

// ============================================
// RECORD DTOs
// ============================================

/// Create record request
#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    /// Label to record under, defaults to the configured label
    #[serde(default)]
    pub label: Option<String>,
    /// Optional timestamp, defaults to now
    #[serde(default)]
    pub timestamp: Option<TimestampSpec>,
}

/// Timestamp accepted as epoch milliseconds or as a time expression
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TimestampSpec {
    /// Epoch milliseconds
    Millis(i64),
    /// RFC 3339, `YYYY-MM-DD`, or a relative form like "now-7d"
    Text(String),
}

/// Single stored record
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    /// Record id
    pub id: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    /// Timestamp rendered in the configured calendar
    pub time: String,
    /// Record label
    pub label: String,
}

impl RecordResponse {
    /// Render a stored event for the wire
    pub fn from_event(event: &Event, calendar: FixedOffset) -> Self {
        let time = calendar
            .timestamp_millis_opt(event.timestamp)
            .single()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();

        Self {
            id: event.id.to_string(),
            timestamp: event.timestamp,
            time,
            label: event.label.clone(),
        }
    }
}

/// List records response
#[derive(Debug, Serialize)]
pub struct RecordListResponse {
    /// Matching records, newest first
    pub records: Vec<RecordResponse>,
    /// Number of records returned
    pub total: usize,
}

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Maximum rows to return, defaults to the configured limit
    #[serde(default)]
    pub limit: Option<usize>,
}

// ============================================
// SEARCH DTOs
// ============================================

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Exact label to match
    #[serde(default)]
    pub label: Option<String>,
    /// Range start (epoch ms, ISO 8601, `YYYY-MM-DD`, or relative like "now-7d")
    #[serde(default)]
    pub start: Option<String>,
    /// Range end, date-only values cover the whole day
    #[serde(default)]
    pub end: Option<String>,
}

// ============================================
// CHART DTOs
// ============================================

/// Chart query parameters
#[derive(Debug, Deserialize)]
pub struct ChartParams {
    /// Bucket granularity: day, month, or year (default: day)
    #[serde(default)]
    pub granularity: Option<String>,
    /// Label to chart, defaults to the configured label
    #[serde(default)]
    pub label: Option<String>,
}

/// One dense chart bucket
#[derive(Debug, Serialize)]
pub struct ChartPoint {
    /// Period key: `YYYY-MM-DD`, `YYYY-MM`, or `YYYY`
    pub date: String,
    /// Events in the period
    pub count: u64,
}

/// Chart response
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    /// Bucket granularity
    pub granularity: String,
    /// Label charted
    pub label: String,
    /// Gap-free buckets from first to last active period
    pub points: Vec<ChartPoint>,
    /// Summary statistics over the dense series
    pub summary: SeriesSummary,
}

// ============================================
// STATS DTOs
// ============================================

/// Stats query parameters
#[derive(Debug, Deserialize)]
pub struct StatsParams {
    /// Label to report on, defaults to the configured label
    #[serde(default)]
    pub label: Option<String>,
}

/// Stats response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Label reported on
    pub label: String,
    /// Events recorded today in the configured calendar
    pub today_count: u64,
    /// Events recorded in total
    pub total_count: u64,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Store status
    pub store: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
