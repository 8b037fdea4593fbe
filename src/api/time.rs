//! Time Expression Parsing
//!
//! Parses the timestamp forms requests may carry: raw epoch milliseconds,
//! relative expressions like "now-7d", RFC 3339, naive date-times, and plain
//! dates. Naive forms are interpreted in the configured calendar offset so
//! that "2024-01-15" means midnight where the user keeps their tally.

use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::api::error::{ApiError, ApiResult};

/// Parse a timestamp expression into epoch milliseconds
pub(crate) fn parse_timestamp(s: &str, calendar: FixedOffset) -> ApiResult<i64> {
    // Try raw milliseconds first (most common from the CLI)
    if let Ok(ts) = s.parse::<i64>() {
        return Ok(ts);
    }

    // Handle relative times like "now", "now-7d"
    if s.starts_with("now") {
        return parse_relative_time(s);
    }

    // Try ISO 8601 with an explicit offset
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }

    // Naive date-time, interpreted in the configured calendar
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return local_to_millis(dt, calendar);
    }

    // Date only: midnight in the configured calendar
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date_start_millis(date, calendar);
    }

    Err(ApiError::Validation(format!(
        "Cannot parse timestamp: {}",
        s
    )))
}

/// Parse a range end, where date-only forms cover the whole day
pub(crate) fn parse_range_end(s: &str, calendar: FixedOffset) -> ApiResult<i64> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let next = date
            .succ_opt()
            .ok_or_else(|| ApiError::Validation(format!("Date out of range: {}", s)))?;
        return Ok(date_start_millis(next, calendar)? - 1);
    }

    parse_timestamp(s, calendar)
}

/// Parse relative time like "now-7d"
fn parse_relative_time(s: &str) -> ApiResult<i64> {
    let now = Utc::now().timestamp_millis();

    if s == "now" {
        return Ok(now);
    }

    // Parse "now-Nh", "now-Nd", "now-Nw", "now-Nm"
    let re = regex::Regex::new(r"^now-(\d+)([hdwm])$")
        .map_err(|_| ApiError::Internal("Regex error".to_string()))?;

    if let Some(caps) = re.captures(s) {
        let amount: i64 = caps[1]
            .parse()
            .map_err(|_| ApiError::Validation("Invalid number in time expression".to_string()))?;
        let unit = &caps[2];

        let ms = match unit {
            "h" => amount * 3600 * 1000,
            "d" => amount * 24 * 3600 * 1000,
            "w" => amount * 7 * 24 * 3600 * 1000,
            "m" => amount * 30 * 24 * 3600 * 1000,
            _ => return Err(ApiError::Validation(format!("Invalid time unit: {}", unit))),
        };

        return Ok(now - ms);
    }

    Err(ApiError::Validation(format!(
        "Cannot parse relative time: {}",
        s
    )))
}

fn local_to_millis(dt: NaiveDateTime, calendar: FixedOffset) -> ApiResult<i64> {
    match calendar.from_local_datetime(&dt) {
        LocalResult::Single(t) => Ok(t.timestamp_millis()),
        _ => Err(ApiError::Validation(format!(
            "Time {} cannot be placed in the configured calendar",
            dt
        ))),
    }
}

fn date_start_millis(date: NaiveDate, calendar: FixedOffset) -> ApiResult<i64> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ApiError::Validation(format!("Date out of range: {}", date)))?;
    local_to_millis(midnight, calendar)
}
