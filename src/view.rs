//! View Resolver
//!
//! Maps a navigation pathname to one of a closed set of page contents, and
//! drives the two chart triggers:
//!
//! 1. Navigating to the finance page loads the dataset fresh and charts the
//!    full series, with the default date range attached for the picker.
//! 2. A date-range change reloads, filters, and rebuilds just the figure.
//!
//! Routing itself is a pure function of the path string; dataset IO happens
//! only when a resolved route needs it. There is no state carried between
//! navigations, so each entry to the finance page resets the picker to its
//! default range.

use crate::chart::{build_chart, Figure};
use crate::data::{DataResult, DataSource, DateRange};

/// A navigation target, keyed by exact pathname match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Finance,
    PageTwo,
    /// Any unrecognized path; carries the path exactly as received
    NotFound(String),
}

impl Route {
    /// Resolve a pathname (relative to the mount prefix) to a route.
    ///
    /// Matching is exact: `"/"`, `"/finance"`, and `"/page-2"` are the only
    /// recognized paths; everything else is `NotFound` with the input
    /// string preserved.
    pub fn from_path(path: &str) -> Route {
        match path {
            "/" => Route::Home,
            "/finance" => Route::Finance,
            "/page-2" => Route::PageTwo,
            other => Route::NotFound(other.to_string()),
        }
    }
}

/// The rendered result for a navigation path.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    Home,
    Finance {
        /// Chart over the full dataset
        figure: Figure,
        /// Default picker range; does not filter the initial render
        range: DateRange,
    },
    PageTwo,
    NotFound {
        path: String,
    },
}

/// Resolve a route to renderable page content.
///
/// Only the finance page touches the data source; an unrecognized path is a
/// normal page, not an error.
pub fn resolve_page(route: Route, source: &DataSource) -> DataResult<PageContent> {
    match route {
        Route::Home => Ok(PageContent::Home),
        Route::Finance => {
            let dataset = source.load()?;
            Ok(PageContent::Finance {
                figure: build_chart(&dataset),
                range: DateRange::default_range(),
            })
        }
        Route::PageTwo => Ok(PageContent::PageTwo),
        Route::NotFound(path) => Ok(PageContent::NotFound { path }),
    }
}

/// Rebuild the figure for a user-supplied date range.
///
/// Loads fresh, keeps rows inside the inclusive range, and builds the
/// figure. An inverted or out-of-dataset range produces an empty chart.
pub fn update_chart(source: &DataSource, range: &DateRange) -> DataResult<Figure> {
    let dataset = source.load()?;
    Ok(build_chart(&dataset.filter_by_range(range)))
}
