//! Chart Builder
//!
//! Builds a Plotly-compatible figure description for the annualized EBITDA
//! chart: a red "Goal" line and a blue "Ann. EBITDA" line plotted against
//! the observation date. The frontend just hands the serialized figure to
//! Plotly; nothing here is computed beyond aligning the two series.
//!
//! Colors, hover templates, tick formats, and the zoom-preset buttons are
//! fixed presentation parameters and are emitted verbatim.

use crate::data::Dataset;
use chrono::NaiveDate;
use serde::Serialize;

const GOAL_COLOR: &str = "red";
const EBITDA_COLOR: &str = "blue";
const EBITDA_HOVER: &str = "<br><b>Date</b>: %{x|%m/%d/%Y}<br><b>EBITDA</b>: $%{y:,.2f}";

/// A renderable chart description: traces plus layout.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One scatter trace: a named series of (date, value) points with display
/// metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<&'static str>,
    pub line: Line,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Line {
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Layout {
    pub title: Title,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Title {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Font {
    pub family: &'static str,
    pub size: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct XAxis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub dtick: &'static str,
    pub tickformat: &'static str,
    pub rangeslider: RangeSlider,
    pub rangeselector: RangeSelector,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RangeSelector {
    pub buttons: Vec<RangeButton>,
}

/// One zoom-preset button (1m, 6m, YTD, 1y, all).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RangeButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub step: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stepmode: Option<&'static str>,
}

impl RangeButton {
    fn preset(count: u32, label: &'static str, step: &'static str, stepmode: &'static str) -> Self {
        Self {
            count: Some(count),
            label: Some(label),
            step,
            stepmode: Some(stepmode),
        }
    }

    fn all() -> Self {
        Self {
            count: None,
            label: None,
            step: "all",
            stepmode: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YAxis {
    pub rangemode: &'static str,
    pub tickformat: &'static str,
}

/// Build the annualized EBITDA figure over `dataset`.
///
/// An empty dataset yields a figure with two empty traces; Plotly renders
/// it with no points, which is the accepted behavior for out-of-range or
/// inverted date filters.
pub fn build_chart(dataset: &Dataset) -> Figure {
    let dates: Vec<NaiveDate> = dataset.iter().map(|row| row.date).collect();

    Figure {
        data: vec![
            Trace {
                kind: "scatter",
                name: "Goal",
                mode: Some("lines"),
                x: dates.clone(),
                y: dataset.iter().map(|row| row.goal).collect(),
                hovertemplate: None,
                line: Line { color: GOAL_COLOR },
            },
            Trace {
                kind: "scatter",
                name: "Ann. EBITDA",
                mode: None,
                x: dates,
                y: dataset.iter().map(|row| row.annualized_ebitda).collect(),
                hovertemplate: Some(EBITDA_HOVER),
                line: Line {
                    color: EBITDA_COLOR,
                },
            },
        ],
        layout: layout(),
    }
}

/// The fixed chart layout, emitted verbatim.
fn layout() -> Layout {
    Layout {
        title: Title {
            text: "Annualized EBITDA",
            x: 0.5,
            y: 0.9,
            xanchor: "center",
            yanchor: "top",
            font: Font {
                family: "Sans-Serif",
                size: 28,
                color: "#747c84",
            },
        },
        xaxis: XAxis {
            kind: "date",
            dtick: "M1",
            tickformat: "%b\n%Y",
            rangeslider: RangeSlider { visible: false },
            rangeselector: RangeSelector {
                buttons: vec![
                    RangeButton::preset(1, "1m", "month", "backward"),
                    RangeButton::preset(6, "6m", "month", "backward"),
                    RangeButton::preset(1, "YTD", "year", "todate"),
                    RangeButton::preset(1, "1y", "year", "backward"),
                    RangeButton::all(),
                ],
            },
        },
        yaxis: YAxis {
            rangemode: "tozero",
            tickformat: "$,.0f",
        },
    }
}
