//! Page Routes
//!
//! One handler serves every navigation path under the dashboard prefix.
//! It runs the view resolver on the prefix-relative pathname and returns
//! the rendered page description as JSON. Unrecognized paths render the
//! not-found page with a 200; they are navigation results, not errors.

use axum::{extract::State, http::Uri, Json};
use std::sync::Arc;

use crate::api::dto::PageResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::view::{resolve_page, Route};

/// GET <prefix>/*
///
/// Resolve the pathname to page content. Registered as the fallback of the
/// nested dashboard router, so the URI seen here already has the mount
/// prefix stripped.
pub async fn render_page(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    // A request for the bare prefix arrives with an empty path
    let path = match uri.path() {
        "" => "/",
        p => p,
    };

    let route = Route::from_path(path);
    tracing::debug!(path = %path, route = ?route, "Resolved navigation path");

    let content = resolve_page(route, &state.source)?;
    Ok(Json(PageResponse::from(content)))
}
