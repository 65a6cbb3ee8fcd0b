//! One render pass of the dashboard.
//!
//! [`Dashboard::render`] turns a [`FilterState`] into everything the page
//! shows. Each pass refetches from scratch; nothing is carried over between
//! passes.

use serde::Serialize;
use tracing::{info, warn};

use crate::chart::{ChartBuilder, ChartSpec};
use crate::error::{Error, Result};
use crate::filter::{FilterState, YearRange};
use crate::map::{MapRenderer, MapSpec};
use crate::storage::DataSource;

/// Shown in place of the map when no shapes are selected.
pub const EMPTY_SELECTION_NOTICE: &str = "Please select at least one shape to view the map.";

/// What the map area of the page displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapView {
    /// The sighting map.
    Points(MapSpec),
    /// A warning shown instead of the map.
    Notice {
        /// Text for the viewer.
        message: String,
    },
}

impl MapView {
    /// The map, unless a notice replaced it.
    #[must_use]
    pub fn spec(&self) -> Option<&MapSpec> {
        match self {
            Self::Points(spec) => Some(spec),
            Self::Notice { .. } => None,
        }
    }

    /// The notice, if the map was replaced.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Points(_) => None,
            Self::Notice { message } => Some(message.as_str()),
        }
    }
}

/// The result of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Choices for the shape selector.
    pub shape_options: Vec<String>,
    /// The filter actually applied, after unknown shapes were dropped.
    pub filter: FilterState,
    /// The trend chart.
    pub chart: ChartSpec,
    /// The map or its replacement notice.
    pub map: MapView,
}

/// Runs render passes against a [`DataSource`].
#[derive(Debug, Clone)]
pub struct Dashboard<S> {
    source: S,
    chart: ChartBuilder,
    map: MapRenderer,
    us_only: bool,
}

impl<S: DataSource> Dashboard<S> {
    /// Create a dashboard reading from `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            chart: ChartBuilder::new(),
            map: MapRenderer::new(),
            us_only: false,
        }
    }

    /// Limit the map to sightings reported in the United States.
    #[must_use]
    pub fn with_us_only(mut self, us_only: bool) -> Self {
        self.us_only = us_only;
        self
    }

    /// Use `map` to draw sighting maps.
    #[must_use]
    pub fn with_map_renderer(mut self, map: MapRenderer) -> Self {
        self.map = map;
        self
    }

    /// The data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Choices for the shape selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the data cannot be read.
    pub fn shape_options(&self) -> Result<Vec<String>> {
        self.source.shapes()
    }

    /// Build the trend chart for `range`.
    ///
    /// The chart does not depend on the shape selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the data cannot be read.
    pub fn chart(&self, range: Option<YearRange>) -> Result<ChartSpec> {
        let trend = self.source.movie_quality(range)?;
        let events = self.source.military_tech(range)?;
        Ok(self.chart.build(&trend, &events))
    }

    /// Build the map for `filter`, or a notice if no shapes are selected.
    ///
    /// Shapes the data does not contain are dropped first, so a selection
    /// of only unknown shapes also yields the notice. An empty selection
    /// never reaches the sightings query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the data cannot be read.
    pub fn map(&self, filter: &FilterState) -> Result<MapView> {
        let options = self.shape_options()?;
        self.map_for(&Self::restrict(filter, &options))
    }

    fn restrict(filter: &FilterState, options: &[String]) -> FilterState {
        let applied = filter.restricted_to(options);
        for dropped in filter
            .selected_shapes()
            .difference(applied.selected_shapes())
        {
            warn!("Ignoring shape not present in the data: {}", dropped);
        }
        applied
    }

    fn map_for(&self, applied: &FilterState) -> Result<MapView> {
        if applied.has_empty_selection() {
            warn!("No shapes selected; skipping the map");
            return Ok(Self::empty_selection());
        }
        match self.source.sightings(applied, self.us_only) {
            Ok(points) => Ok(MapView::Points(self.map.build(&points))),
            Err(Error::EmptySelection) => Ok(Self::empty_selection()),
            Err(e) => Err(e),
        }
    }

    fn empty_selection() -> MapView {
        MapView::Notice {
            message: EMPTY_SELECTION_NOTICE.to_string(),
        }
    }

    /// Run a full render pass for `filter`.
    ///
    /// Shapes the data does not contain are dropped from the filter first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if any query fails; the pass is
    /// abandoned and nothing partial is returned.
    pub fn render(&self, filter: &FilterState) -> Result<DashboardView> {
        let shape_options = self.shape_options()?;
        let applied = Self::restrict(filter, &shape_options);

        let chart = self.chart(applied.year_range())?;
        let map = self.map_for(&applied)?;

        info!(
            shapes = applied.selected_shapes().len(),
            years = %applied
                .year_range()
                .map_or_else(|| "all".to_string(), |r| r.to_string()),
            points = map.spec().map_or(0, MapSpec::point_count),
            "Rendered dashboard"
        );

        Ok(DashboardView {
            shape_options,
            filter: applied,
            chart,
            map,
        })
    }
}
