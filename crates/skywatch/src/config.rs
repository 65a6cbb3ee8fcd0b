//! Configuration management for skywatch.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::{
    FilterState, YearRange, DEFAULT_FROM_YEAR, DEFAULT_SHAPES, DEFAULT_TO_YEAR, MAX_YEAR, MIN_YEAR,
};
use crate::map::MarkerStyle;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory name.
const CONFIG_DIR_NAME: &str = "skywatch";

/// Default database file, relative to the working directory.
const DATABASE_FILE_NAME: &str = "ufo_analytics.db";

/// Default HTML output file.
const OUTPUT_FILE_NAME: &str = "dashboard.html";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SKYWATCH_`)
/// 2. TOML config file at `~/.config/skywatch/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Filter defaults and bounds.
    pub filters: FilterConfig,
    /// Page output configuration.
    pub page: PageConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the sightings database.
    /// Defaults to `ufo_analytics.db` in the working directory.
    pub database_path: Option<PathBuf>,
}

/// Filter defaults applied when the dashboard loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Shapes selected initially.
    pub default_shapes: Vec<String>,
    /// Earliest year the slider allows.
    pub min_year: i32,
    /// Latest year the slider allows.
    pub max_year: i32,
    /// Initial first year.
    pub default_from: i32,
    /// Initial last year.
    pub default_to: i32,
    /// Whether the year filter is offered at all. When off, every year is
    /// shown and the map is not limited by year.
    pub year_filter: bool,
    /// Limit the map to sightings reported in the United States.
    pub us_only: bool,
}

/// Page-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Page heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: String,
    /// Where `render` writes the page.
    pub output_path: PathBuf,
    /// Map marker color.
    pub marker_color: String,
    /// Map marker diameter in pixels.
    pub marker_size: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_shapes: DEFAULT_SHAPES.iter().map(ToString::to_string).collect(),
            min_year: MIN_YEAR,
            max_year: MAX_YEAR,
            default_from: DEFAULT_FROM_YEAR,
            default_to: DEFAULT_TO_YEAR,
            year_filter: true,
            us_only: false,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "UFO Anomaly & Cultural Correlation".to_string(),
            subtitle: "Exploring the link between military tech, movie quality, and high-speed sightings.".to_string(),
            output_path: PathBuf::from(OUTPUT_FILE_NAME),
            marker_color: MarkerStyle::default().color,
            marker_size: MarkerStyle::default().size,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("SKYWATCH_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let filters = &self.filters;

        if filters.default_shapes.is_empty() {
            return Err(Error::config_validation(
                "default_shapes must name at least one shape",
            ));
        }

        if filters.min_year > filters.max_year {
            return Err(Error::config_validation(format!(
                "min_year ({}) cannot be greater than max_year ({})",
                filters.min_year, filters.max_year
            )));
        }

        if filters.default_from > filters.default_to {
            return Err(Error::config_validation(format!(
                "default_from ({}) cannot be greater than default_to ({})",
                filters.default_from, filters.default_to
            )));
        }

        if filters.default_from < filters.min_year || filters.default_to > filters.max_year {
            return Err(Error::config_validation(format!(
                "default year range {}-{} must lie within {}-{}",
                filters.default_from, filters.default_to, filters.min_year, filters.max_year
            )));
        }

        if self.page.output_path.as_os_str().is_empty() {
            return Err(Error::config_validation("output_path must not be empty"));
        }

        if self.page.marker_size.is_nan() || self.page.marker_size <= 0.0 {
            return Err(Error::config_validation(format!(
                "marker_size must be greater than 0, got {}",
                self.page.marker_size
            )));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }

    /// The range the year slider spans.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured bounds are reversed.
    pub fn year_bounds(&self) -> Result<YearRange> {
        YearRange::new(self.filters.min_year, self.filters.max_year)
    }

    /// Marker style for the sighting map.
    #[must_use]
    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle {
            size: self.page.marker_size,
            color: self.page.marker_color.clone(),
            ..MarkerStyle::default()
        }
    }

    /// The filter the dashboard starts with.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default range is reversed.
    pub fn initial_filter(&self) -> Result<FilterState> {
        let year_range = if self.filters.year_filter {
            Some(YearRange::new(
                self.filters.default_from,
                self.filters.default_to,
            )?)
        } else {
            None
        };
        Ok(FilterState::new(
            self.filters.default_shapes.iter().cloned(),
            year_range,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.filters.default_shapes, vec!["triangle", "disk"]);
        assert_eq!(config.filters.min_year, 1981);
        assert_eq!(config.filters.max_year, 2014);
        assert_eq!(config.filters.default_from, 1990);
        assert_eq!(config.filters.default_to, 2010);
        assert!(config.filters.year_filter);
        assert!(!config.filters.us_only);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_default_shapes() {
        let mut config = Config::default();
        config.filters.default_shapes.clear();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("default_shapes"));
    }

    #[test]
    fn test_validate_reversed_bounds() {
        let mut config = Config::default();
        config.filters.min_year = 2020;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("min_year"));
    }

    #[test]
    fn test_validate_reversed_default_range() {
        let mut config = Config::default();
        config.filters.default_from = 2011;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("default_from"));
    }

    #[test]
    fn test_validate_default_range_outside_bounds() {
        let mut config = Config::default();
        config.filters.default_from = 1970;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must lie within"));
    }

    #[test]
    fn test_validate_empty_output_path() {
        let mut config = Config::default();
        config.page.output_path = PathBuf::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_marker_size() {
        let mut config = Config::default();
        config.page.marker_size = 0.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("marker_size"));
    }

    #[test]
    fn test_validate_nan_marker_size() {
        let mut config = Config::default();
        config.page.marker_size = f64::NAN;
        assert!(config.validate().is_err());

        config.page.marker_size = -2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_marker_style_from_page() {
        let mut config = Config::default();
        config.page.marker_color = "lime".to_string();
        config.page.marker_size = 6.0;

        let marker = config.marker_style();
        assert_eq!(marker.color, "lime");
        assert!((marker.size - 6.0).abs() < f64::EPSILON);
        assert!((marker.opacity - MarkerStyle::default().opacity).abs() < f64::EPSILON);
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        assert_eq!(config.database_path(), PathBuf::from("ufo_analytics.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/data/sightings.db"));

        assert_eq!(config.database_path(), PathBuf::from("/data/sightings.db"));
    }

    #[test]
    fn test_initial_filter_default() {
        let filter = Config::default().initial_filter().unwrap();
        assert_eq!(filter, FilterState::default());
    }

    #[test]
    fn test_initial_filter_without_year_filter() {
        let mut config = Config::default();
        config.filters.year_filter = false;

        let filter = config.initial_filter().unwrap();
        assert!(filter.year_range().is_none());
    }

    #[test]
    fn test_year_bounds() {
        let bounds = Config::default().year_bounds().unwrap();
        assert_eq!(bounds, YearRange::slider_bounds());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("skywatch"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "skywatch_config_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[storage]\ndatabase_path = \"/srv/ufo.db\"\n\n[filters]\ndefault_shapes = [\"light\"]\nus_only = true\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.database_path(), PathBuf::from("/srv/ufo.db"));
        assert_eq!(config.filters.default_shapes, vec!["light"]);
        assert!(config.filters.us_only);
        assert_eq!(config.filters.max_year, 2014);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!(
            "skywatch_config_invalid_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[filters]\nmin_year = 2015\n").unwrap();

        let result = Config::load_from(Some(path.clone()));
        let _ = std::fs::remove_file(&path);

        assert!(result.is_err());
    }

    #[test]
    fn test_filter_config_deserialize() {
        let json = r#"{"default_shapes": ["orb"], "min_year": 1985}"#;
        let filters: FilterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(filters.default_shapes, vec!["orb"]);
        assert_eq!(filters.min_year, 1985);
        assert_eq!(filters.max_year, 2014);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("default_shapes"));
        assert!(json.contains("output_path"));
    }
}
