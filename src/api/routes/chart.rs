//! Chart Routes
//!
//! Endpoint producing the dense per-period count series.
//!
//! - GET /api/v1/chart - Dense series for a label

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartParams, ChartPoint, ChartResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::series::{bucketize, densify, Granularity, SeriesSummary};

/// GET /api/v1/chart
///
/// Bucket, densify, and summarize the events for one label.
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChartParams>,
) -> ApiResult<Json<ChartResponse>> {
    let granularity = parse_granularity(params.granularity.as_deref())?;
    let label = params
        .label
        .unwrap_or_else(|| state.config.default_label.clone());

    let events = state.store.events_for_label(&label)?;
    let sparse = bucketize(&events, granularity, &label, state.config.calendar)?;
    let dense = densify(sparse, granularity)?;
    let summary = SeriesSummary::compute(&dense);

    let points = dense
        .into_iter()
        .map(|p| ChartPoint {
            date: p.key,
            count: p.count,
        })
        .collect();

    Ok(Json(ChartResponse {
        granularity: granularity.to_string(),
        label,
        points,
        summary,
    }))
}

/// Parse the granularity parameter, absent means day
///
/// An unrecognized value is a client error, never silently defaulted.
fn parse_granularity(s: Option<&str>) -> ApiResult<Granularity> {
    match s {
        None => Ok(Granularity::Day),
        Some(s) => Granularity::from_str(s).ok_or_else(|| {
            ApiError::Validation(format!(
                "Invalid granularity: {}. Use day, month, or year",
                s
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_granularity() {
        assert!(matches!(parse_granularity(None), Ok(Granularity::Day)));
        assert!(matches!(
            parse_granularity(Some("month")),
            Ok(Granularity::Month)
        ));
        assert!(matches!(
            parse_granularity(Some("YEARLY")),
            Ok(Granularity::Year)
        ));
    }

    #[test]
    fn test_parse_granularity_rejects_unknown() {
        assert!(parse_granularity(Some("hour")).is_err());
        assert!(parse_granularity(Some("")).is_err());
        assert!(parse_granularity(Some("fortnight")).is_err());
    }
}
