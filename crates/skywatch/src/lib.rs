//! `skywatch` - Sighting trends and anomaly mapping over a local database
//!
//! This library reads a pre-populated SQLite database of reported sightings,
//! movie-quality trends and military aircraft milestones, and builds the
//! figure specifications for the trend correlation chart and the sighting
//! map from an explicit [`FilterState`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod chart;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod logging;
pub mod map;
pub mod model;
pub mod page;
pub mod storage;

pub use chart::{ChartBuilder, ChartSpec};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardView, MapView};
pub use error::{Error, Result};
pub use filter::{FilterState, YearRange};
pub use logging::init_logging;
pub use map::{MapRenderer, MapSpec};
pub use model::{MapPoint, MilitaryTechEvent, MovieQualityPoint};
pub use storage::{DataSource, QueryGateway};
