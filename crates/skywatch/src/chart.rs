//! The trend correlation chart.
//!
//! [`ChartBuilder`] lays three layers over one year axis:
//!
//! - sighting counts as a solid line,
//! - the yearly film rating scaled by [`MOVIE_QUALITY_SCALE`] as a dotted line,
//! - one vertical marker per military disclosure, labelled with the aircraft.
//!
//! The output serializes to a Plotly figure (`data` + `layout`). Rows are
//! plotted exactly as given; nothing is aggregated, sorted or smoothed.

use serde::{Deserialize, Serialize};

use crate::model::{MilitaryTechEvent, MovieQualityPoint};

/// Display multiplier that brings a 0–10 rating up to the magnitude of the
/// yearly sighting counts. Not a statistical normalization.
pub const MOVIE_QUALITY_SCALE: f64 = 500.0;

/// Plotly template for the dark theme.
pub const DARK_TEMPLATE: &str = "plotly_dark";

/// Hover mode showing every series for the hovered year.
pub const UNIFIED_HOVER: &str = "x unified";

/// Dash pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    /// Continuous line.
    #[default]
    Solid,
    /// Dotted line.
    Dot,
    /// Dashed line.
    Dash,
}

/// Stroke style of a trace or marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// CSS color name or value.
    pub color: String,
    /// Stroke width in pixels.
    pub width: f64,
    /// Dash pattern.
    pub dash: LineDash,
}

impl LineStyle {
    fn new(color: &str, width: f64, dash: LineDash) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash,
        }
    }
}

/// One line series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Plotly trace type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Legend name.
    pub name: String,
    /// Draw mode.
    pub mode: String,
    /// Years.
    pub x: Vec<i32>,
    /// Values, one per year.
    pub y: Vec<f64>,
    /// Stroke style.
    pub line: LineStyle,
}

/// A vertical rule spanning the full plot height at one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalMarker {
    /// Plotly shape type.
    #[serde(rename = "type")]
    pub kind: String,
    /// X axis reference.
    pub xref: String,
    /// Y axis reference; `paper` spans the plot regardless of data range.
    pub yref: String,
    /// Start year.
    pub x0: i32,
    /// End year, equal to `x0`.
    pub x1: i32,
    /// Bottom, in paper coordinates.
    pub y0: f64,
    /// Top, in paper coordinates.
    pub y1: f64,
    /// Stroke style.
    pub line: LineStyle,
}

impl VerticalMarker {
    fn at(year: i32) -> Self {
        Self {
            kind: "line".to_string(),
            xref: "x".to_string(),
            yref: "paper".to_string(),
            x0: year,
            x1: year,
            y0: 0.0,
            y1: 1.0,
            line: LineStyle::new("gray", 1.0, LineDash::Dash),
        }
    }
}

/// A text label positioned in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Year.
    pub x: i32,
    /// Height on the sighting-count axis.
    pub y: f64,
    /// Label text.
    pub text: String,
    /// Whether an arrow points at (x, y).
    pub showarrow: bool,
}

/// Figure-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Plotly template name.
    pub template: String,
    /// Hover mode.
    pub hovermode: String,
    /// Disclosure markers.
    pub shapes: Vec<VerticalMarker>,
    /// Disclosure labels.
    pub annotations: Vec<Annotation>,
}

/// A complete chart, ready for the host to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Line series.
    pub data: Vec<Trace>,
    /// Layout, markers and labels.
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// The sighting count series.
    #[must_use]
    pub fn sightings_trace(&self) -> Option<&Trace> {
        self.data.first()
    }

    /// The scaled film rating series.
    #[must_use]
    pub fn movie_quality_trace(&self) -> Option<&Trace> {
        self.data.get(1)
    }
}

/// Builds [`ChartSpec`]s from query results.
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder;

impl ChartBuilder {
    /// Create a chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the chart for a trend series and its disclosure events.
    ///
    /// Every label shares one height: the largest sighting count in the whole
    /// series. When the series is empty the labels sit at 0.
    #[must_use]
    pub fn build(
        &self,
        trend: &[MovieQualityPoint],
        events: &[MilitaryTechEvent],
    ) -> ChartSpec {
        let years: Vec<i32> = trend.iter().map(|p| p.year).collect();

        #[allow(clippy::cast_precision_loss)]
        let counts: Vec<f64> = trend.iter().map(|p| p.sighting_count as f64).collect();
        let scaled: Vec<f64> = trend
            .iter()
            .map(|p| p.imdb_rating * MOVIE_QUALITY_SCALE)
            .collect();

        let sightings = Trace {
            kind: "scatter".to_string(),
            name: "UFO Sightings".to_string(),
            mode: "lines".to_string(),
            x: years.clone(),
            y: counts,
            line: LineStyle::new("crimson", 3.0, LineDash::Solid),
        };
        let movie_quality = Trace {
            kind: "scatter".to_string(),
            name: "Movie Quality Pulse".to_string(),
            mode: "lines".to_string(),
            x: years,
            y: scaled,
            line: LineStyle::new("teal", 2.0, LineDash::Dot),
        };

        let label_y = Self::label_height(trend);
        let shapes = events.iter().map(|e| VerticalMarker::at(e.year)).collect();
        let annotations = events
            .iter()
            .map(|e| Annotation {
                x: e.year,
                y: label_y,
                text: e.aircraft.clone(),
                showarrow: false,
            })
            .collect();

        ChartSpec {
            data: vec![sightings, movie_quality],
            layout: ChartLayout {
                template: DARK_TEMPLATE.to_string(),
                hovermode: UNIFIED_HOVER.to_string(),
                shapes,
                annotations,
            },
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn label_height(trend: &[MovieQualityPoint]) -> f64 {
        trend
            .iter()
            .map(|p| p.sighting_count)
            .max()
            .map_or(0.0, |max| max as f64)
    }
}
