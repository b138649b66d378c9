//! # Opsboard
//!
//! Operational Dashboard backend - serves a sidebar-navigated financial
//! dashboard (actual vs. goal EBITDA) built from a CSV time series.
//!
//! ## How it works
//!
//! - **Data Loader**: a read-through accessor over a CSV file, re-read on
//!   every request (no caching, no invalidation problem)
//! - **Range Filter**: inclusive [start, end] date filtering that preserves
//!   source order
//! - **Chart Builder**: a Plotly-compatible figure description with fixed
//!   presentation parameters
//! - **View Resolver**: an exact-match pure function from pathname to page
//!   content
//! - **API**: a thin Axum adapter that mounts the dashboard under a
//!   configurable prefix
//!
//! ## Modules
//!
//! - [`data`]: data model, loader, and range filter
//! - [`chart`]: figure builder
//! - [`view`]: routing and page resolution
//! - [`api`]: HTTP adapter
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use opsboard::data::{DataSource, DateRange};
//! use opsboard::view::{resolve_page, update_chart, Route};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = DataSource::new("data.csv");
//!
//!     // Trigger 1: navigate to the finance page
//!     let page = resolve_page(Route::from_path("/finance"), &source)?;
//!
//!     // Trigger 2: the user narrows the date range
//!     let range = DateRange::new(
//!         "2022-04-09".parse()?,
//!         "2022-12-31".parse()?,
//!     );
//!     let figure = update_chart(&source, &range)?;
//!
//!     println!("{} traces", figure.data.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod data;
pub mod view;

// Re-export top-level types for convenience
pub use data::{DataResult, DataSource, DataSourceError, DateRange, Dataset, Row};

pub use chart::{build_chart, Figure, Trace};

pub use view::{resolve_page, update_chart, PageContent, Route};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    Config, ConfigError, DashboardConfig, LoggingConfig, SourceConfig,
    ApiConfig as ConfigApiConfig,
};
