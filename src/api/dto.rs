//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::chart::Figure;
use crate::data::DateRange;
use crate::view::PageContent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================
// PAGE DTOs
// ============================================

/// Rendered page description returned for every dashboard path
#[derive(Debug, Serialize)]
pub struct PageResponse {
    /// Which page this is: "home", "finance", "page-2", or "not-found"
    pub page: &'static str,
    /// Page heading
    pub title: String,
    /// Static body text, if the page has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Chart description, finance page only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<Figure>,
    /// Date picker state, finance page only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_picker: Option<DatePickerDto>,
}

/// Date picker state for the finance page
#[derive(Debug, Serialize)]
pub struct DatePickerDto {
    /// Initial start date, if set
    pub start_date: Option<NaiveDate>,
    /// Initial end date, if set
    pub end_date: Option<NaiveDate>,
    /// The picker may be cleared to unbound either side
    pub clearable: bool,
}

impl From<PageContent> for PageResponse {
    fn from(content: PageContent) -> Self {
        match content {
            PageContent::Home => PageResponse {
                page: "home",
                title: "Home".to_string(),
                body: Some("This is the content of the home page!".to_string()),
                figure: None,
                date_picker: None,
            },
            PageContent::Finance { figure, range } => PageResponse {
                page: "finance",
                title: "Financial Reporting".to_string(),
                body: None,
                figure: Some(figure),
                date_picker: Some(DatePickerDto {
                    start_date: range.start,
                    end_date: range.end,
                    clearable: true,
                }),
            },
            PageContent::PageTwo => PageResponse {
                page: "page-2",
                title: "Page 2".to_string(),
                body: Some("This is page 2!".to_string()),
                figure: None,
                date_picker: None,
            },
            PageContent::NotFound { path } => PageResponse {
                page: "not-found",
                title: "404: Not found".to_string(),
                body: Some(format!("The pathname {path} was not recognised...")),
                figure: None,
                date_picker: None,
            },
        }
    }
}

// ============================================
// CHART DTOs
// ============================================

/// Query parameters for a chart update.
///
/// Both bounds are optional; a cleared picker side arrives absent and
/// leaves that side of the range unbounded.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    /// Inclusive start date (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ChartQuery {
    /// Convert to the domain range
    pub fn into_range(self) -> DateRange {
        DateRange::from_bounds(self.start_date, self.end_date)
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "unhealthy"
    pub status: String,
    /// Data source status: "ok" or "error"
    pub data_source: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}
