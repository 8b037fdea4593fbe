//! Stats Routes
//!
//! Endpoint for headline counts.
//!
//! - GET /api/v1/stats - Today and all-time counts for a label

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{StatsParams, StatsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::series::{Granularity, Period};

/// GET /api/v1/stats
///
/// Count events for today (in the configured calendar) and all time.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> ApiResult<Json<StatsResponse>> {
    let label = params
        .label
        .unwrap_or_else(|| state.config.default_label.clone());
    let calendar = state.config.calendar;

    let now = Utc::now().timestamp_millis();
    let today = Period::from_timestamp(now, Granularity::Day, calendar)?;
    let (day_start, day_end) = today.utc_range(calendar)?;

    let today_count = state.store.count_between(&label, day_start, day_end)?;
    let total_count = state.store.count_label(&label)?;

    Ok(Json(StatsResponse {
        label,
        today_count,
        total_count,
    }))
}
