//! Chart Routes
//!
//! The second dashboard trigger: a date-range change re-requests just the
//! figure, leaving the surrounding page untouched.
//!
//! - GET <prefix>/api/chart?start_date=&end_date= - rebuild the figure

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ChartQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chart::Figure;
use crate::view::update_chart;

/// GET <prefix>/api/chart
///
/// Rebuild the EBITDA figure for the supplied date range. Either bound may
/// be absent (a cleared picker side), leaving that side unbounded. An
/// inverted range yields an empty figure, not an error.
pub async fn chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Json<Figure>> {
    let range = query.into_range();
    tracing::debug!(start = ?range.start, end = ?range.end, "Rebuilding chart");

    let figure = update_chart(&state.source, &range)?;
    Ok(Json(figure))
}
