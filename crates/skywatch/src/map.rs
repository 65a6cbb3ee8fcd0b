//! Point map of sighting locations.
//!
//! Serializes to a Plotly `scattergeo` figure. Centering and zoom are left to
//! the host (`fitbounds = "locations"`), and every point is drawn as given.

use serde::{Deserialize, Serialize};

use crate::chart::DARK_TEMPLATE;
use crate::model::MapPoint;

/// Marker appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Marker diameter in pixels.
    pub size: f64,
    /// Fill color.
    pub color: String,
    /// Fill opacity.
    pub opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: 4.0,
            color: "#ff4b4b".to_string(),
            opacity: 0.8,
        }
    }
}

/// The single marker trace of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointTrace {
    /// Plotly trace type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Draw mode.
    pub mode: String,
    /// Latitudes, in input order.
    pub lat: Vec<f64>,
    /// Longitudes, in input order.
    pub lon: Vec<f64>,
    /// Marker appearance.
    pub marker: MarkerStyle,
}

/// Geographic projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoSettings {
    /// Fit the view to the plotted points.
    pub fitbounds: String,
    /// Draw land masses.
    pub showland: bool,
    /// Draw country borders.
    pub showcountries: bool,
}

/// Map-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Plotly template name.
    pub template: String,
    /// Projection settings.
    pub geo: GeoSettings,
}

/// A complete point map, ready for the host to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    /// The marker trace.
    pub data: Vec<PointTrace>,
    /// Layout.
    pub layout: MapLayout,
}

impl MapSpec {
    /// Number of plotted points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.data.iter().map(|t| t.lat.len()).sum()
    }
}

/// Builds [`MapSpec`]s from sighting coordinates.
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    marker: MarkerStyle,
}

impl MapRenderer {
    /// Create a renderer with the default marker style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `marker` for every point.
    #[must_use]
    pub fn with_marker(mut self, marker: MarkerStyle) -> Self {
        self.marker = marker;
        self
    }

    /// Build the map for `points`.
    #[must_use]
    pub fn build(&self, points: &[MapPoint]) -> MapSpec {
        let (lat, lon) = points.iter().map(|p| (p.lat, p.lon)).unzip();

        MapSpec {
            data: vec![PointTrace {
                kind: "scattergeo".to_string(),
                mode: "markers".to_string(),
                lat,
                lon,
                marker: self.marker.clone(),
            }],
            layout: MapLayout {
                template: DARK_TEMPLATE.to_string(),
                geo: GeoSettings {
                    fitbounds: "locations".to_string(),
                    showland: true,
                    showcountries: true,
                },
            },
        }
    }
}
