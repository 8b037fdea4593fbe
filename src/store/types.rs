//! Event store data types
//!
//! - `Event`: one recorded occurrence
//! - `EventFilter`: label/time-range criteria for search queries

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded event
///
/// Immutable once created except for deletion; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: Uuid,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Who or what is being tallied
    pub label: String,
}

impl Event {
    /// Create a new event with the current timestamp
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now().timestamp_millis(),
            label: label.into(),
        }
    }

    /// Create an event with a specific timestamp
    pub fn with_timestamp(label: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            label: label.into(),
        }
    }
}

/// Search criteria for events
///
/// All fields are optional; an empty filter matches everything. The time
/// range is inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Exact label to match
    pub label: Option<String>,
    /// Earliest timestamp (inclusive), in milliseconds
    pub start: Option<i64>,
    /// Latest timestamp (inclusive), in milliseconds
    pub end: Option<i64>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: match a label exactly
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder: set the inclusive start bound
    pub fn start(mut self, timestamp: i64) -> Self {
        self.start = Some(timestamp);
        self
    }

    /// Builder: set the inclusive end bound
    pub fn end(mut self, timestamp: i64) -> Self {
        self.end = Some(timestamp);
        self
    }

    /// Check whether an event matches this filter
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(label) = &self.label {
            if event.label != *label {
                return false;
            }
        }
        if let Some(start) = self.start {
            if event.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if event.timestamp > end {
                return false;
            }
        }
        true
    }
}
