//! Record Routes
//!
//! Endpoints for recording and managing tally events.
//!
//! - POST /api/v1/records - Record an event
//! - GET /api/v1/records - List recent records
//! - DELETE /api/v1/records/:id - Delete a record

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{
    CreateRecordRequest, ListParams, RecordListResponse, RecordResponse, TimestampSpec,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::api::time::parse_timestamp;
use crate::series::{Granularity, Period};
use crate::store::Event;

/// Maximum rows a single list request may ask for
const MAX_LIST_LIMIT: usize = 1000;

/// POST /api/v1/records
///
/// Record a single event.
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRecordRequest>,
) -> ApiResult<(StatusCode, Json<RecordResponse>)> {
    let label = resolve_label(req.label, &state.config.default_label)?;

    let timestamp = match req.timestamp {
        None => Utc::now().timestamp_millis(),
        Some(TimestampSpec::Millis(ms)) => ms,
        Some(TimestampSpec::Text(s)) => parse_timestamp(&s, state.config.calendar)?,
    };

    // Reject timestamps the calendar cannot place
    Period::from_timestamp(timestamp, Granularity::Day, state.config.calendar).map_err(|_| {
        ApiError::Validation(format!(
            "Timestamp {} is outside the supported calendar range",
            timestamp
        ))
    })?;

    let event = Event::with_timestamp(&label, timestamp);
    state.store.insert(&event)?;

    Ok((
        StatusCode::CREATED,
        Json(RecordResponse::from_event(&event, state.config.calendar)),
    ))
}

/// GET /api/v1/records
///
/// List the most recent records, newest first.
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<RecordListResponse>> {
    let limit = params.limit.unwrap_or(state.config.list_limit);

    if limit == 0 {
        return Err(ApiError::Validation("limit must be at least 1".to_string()));
    }
    if limit > MAX_LIST_LIMIT {
        return Err(ApiError::Validation(format!(
            "limit exceeds maximum of {}",
            MAX_LIST_LIMIT
        )));
    }

    let events = state.store.list(limit)?;
    let records: Vec<RecordResponse> = events
        .iter()
        .map(|e| RecordResponse::from_event(e, state.config.calendar))
        .collect();

    Ok(Json(RecordListResponse {
        total: records.len(),
        records,
    }))
}

/// DELETE /api/v1/records/:id
///
/// Delete a record by id. Unknown ids are a 404, not a silent success.
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id =
        Uuid::parse_str(&id).map_err(|_| ApiError::Validation(format!("Invalid record id: {}", id)))?;

    state.store.delete(&id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Resolve an optional request label against the configured default
fn resolve_label(label: Option<String>, default: &str) -> ApiResult<String> {
    let label = match label {
        Some(l) => l,
        None => return Ok(default.to_string()),
    };

    if label.trim().is_empty() {
        return Err(ApiError::Validation("Label cannot be empty".to_string()));
    }

    if label.len() > 100 {
        return Err(ApiError::Validation(
            "Label exceeds maximum length of 100 characters".to_string(),
        ));
    }

    Ok(label)
}
