//! Dashboard HTTP API
//!
//! The adapter between HTTP and the pure dashboard core, built with Axum.
//! Handlers strip the mount prefix, call the view resolver or chart
//! builder, and serialize the result; no rendering logic lives here.
//!
//! # Endpoints
//!
//! ## Dashboard (under the configured prefix, default `/dashapp`)
//! - `GET <prefix>/` - Home page
//! - `GET <prefix>/finance` - Finance page (chart + date picker)
//! - `GET <prefix>/page-2` - Page 2
//! - `GET <prefix>/<anything else>` - Not-found page (still HTTP 200)
//! - `GET <prefix>/api/chart?start_date=&end_date=` - Rebuilt figure for a
//!   user-supplied date range
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use opsboard::api::{serve, ApiConfig, AppState};
//! use opsboard::data::DataSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::new(DataSource::new("data.csv"), config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let prefix = state.config.pathname_prefix.clone();

    // Every navigation path falls through to the page resolver; only the
    // chart endpoint is routed explicitly.
    let dashboard_routes = Router::new()
        .route("/api/chart", get(routes::chart::chart))
        .fallback(routes::pages::render_page);

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    // `nest_service` rather than `nest`: a plain `nest` never routes the
    // bare prefix with a trailing slash (`<prefix>/`) to the nested
    // fallback, which this router relies on for every navigation path.
    Router::new()
        .nest_service(&prefix, dashboard_routes.with_state(shared_state.clone()))
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        "Opsboard dashboard listening on {} (mounted at {})",
        addr,
        config.pathname_prefix
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Opsboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSource;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tower::util::ServiceExt;

    const SAMPLE: &str = "\
Date,Goal,Annualized EBITDA,First of the Year
2022-01-01,100,90,2022-01-01
2022-06-01,110,115,2022-01-01";

    fn create_test_app() -> (Router, NamedTempFile) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = ApiConfig::default();
        let state = AppState::new(DataSource::new(file.path()), config);
        let router = build_router(state);

        (router, file)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_home_page() {
        let (app, _file) = create_test_app();

        let (status, body) = get_json(app, "/dashapp/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "home");
        assert_eq!(body["body"], "This is the content of the home page!");
    }

    #[tokio::test]
    async fn test_page_two() {
        let (app, _file) = create_test_app();

        let (status, body) = get_json(app, "/dashapp/page-2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "page-2");
    }

    #[tokio::test]
    async fn test_finance_page_has_chart_and_picker() {
        let (app, _file) = create_test_app();

        let (status, body) = get_json(app, "/dashapp/finance").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "finance");
        assert_eq!(body["title"], "Financial Reporting");

        // Both series over the full dataset
        let traces = body["figure"]["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["name"], "Goal");
        assert_eq!(traces[1]["name"], "Ann. EBITDA");
        assert_eq!(traces[0]["x"].as_array().unwrap().len(), 2);

        let picker = &body["date_picker"];
        assert_eq!(picker["start_date"], "2022-04-09");
        assert_eq!(picker["clearable"], true);
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found_page() {
        let (app, _file) = create_test_app();

        let (status, body) = get_json(app, "/dashapp/unknown").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "not-found");
        assert_eq!(body["title"], "404: Not found");
        assert_eq!(body["body"], "The pathname /unknown was not recognised...");
    }

    #[tokio::test]
    async fn test_chart_update_with_range() {
        let (app, _file) = create_test_app();

        let (status, body) = get_json(
            app,
            "/dashapp/api/chart?start_date=2022-03-01&end_date=2022-12-31",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let traces = body["data"].as_array().unwrap();
        assert_eq!(traces[0]["x"].as_array().unwrap().len(), 1);
        assert_eq!(traces[0]["x"][0], "2022-06-01");
        assert_eq!(traces[1]["y"][0], 115.0);
    }

    #[tokio::test]
    async fn test_chart_update_inverted_range_is_empty() {
        let (app, _file) = create_test_app();

        let (status, body) = get_json(
            app,
            "/dashapp/api/chart?start_date=2022-12-31&end_date=2022-01-01",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"][0]["x"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chart_update_without_params_is_unfiltered() {
        let (app, _file) = create_test_app();

        let (status, body) = get_json(app, "/dashapp/api/chart").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["x"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_source_fails_finance_only() {
        let config = ApiConfig::default();
        let state = AppState::new(DataSource::new("does-not-exist.csv"), config);
        let app = build_router(state);

        let (status, body) = get_json(app.clone(), "/dashapp/finance").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATA_SOURCE_ERROR");

        // Static pages never touch the source
        let (status, body) = get_json(app, "/dashapp/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "home");
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _file) = create_test_app();

        let (status, _) = get_json(app.clone(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get_json(app.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["data_source"], "ok");
    }

    #[tokio::test]
    async fn test_readiness_fails_without_source() {
        let config = ApiConfig::default();
        let state = AppState::new(DataSource::new("does-not-exist.csv"), config);
        let app = build_router(state);

        let (status, _) = get_json(app, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
