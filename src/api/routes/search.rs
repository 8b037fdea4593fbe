//! Search Routes
//!
//! Endpoint for searching records by label and time range.
//!
//! - GET /api/v1/search - Filtered record search

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{RecordListResponse, RecordResponse, SearchParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::api::time::{parse_range_end, parse_timestamp};
use crate::store::EventFilter;

/// GET /api/v1/search
///
/// Search records by exact label and inclusive time range, newest first.
pub async fn search_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<RecordListResponse>> {
    let calendar = state.config.calendar;

    let mut filter = EventFilter::default();

    if let Some(label) = params.label {
        filter = filter.label(label);
    }

    if let Some(ref start) = params.start {
        filter = filter.start(parse_timestamp(start, calendar)?);
    }

    if let Some(ref end) = params.end {
        filter = filter.end(parse_range_end(end, calendar)?);
    }

    if let (Some(start), Some(end)) = (filter.start, filter.end) {
        if start > end {
            return Err(ApiError::Validation(
                "start must be before end".to_string(),
            ));
        }
    }

    let events = state.store.search(&filter)?;
    let records: Vec<RecordResponse> = events
        .iter()
        .map(|e| RecordResponse::from_event(e, calendar))
        .collect();

    Ok(Json(RecordListResponse {
        total: records.len(),
        records,
    }))
}
