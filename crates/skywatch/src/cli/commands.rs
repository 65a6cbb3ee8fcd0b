//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::filter::{FilterState, YearRange};

/// Filter selection shared by the commands that run queries.
///
/// Anything not given falls back to the configured defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Shape to include on the map (repeatable)
    #[arg(short, long = "shape", value_name = "SHAPE")]
    pub shapes: Vec<String>,

    /// Select no shapes at all
    #[arg(long, conflicts_with = "shapes")]
    pub no_shapes: bool,

    /// First year to include
    #[arg(long, value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last year to include
    #[arg(long, value_name = "YEAR")]
    pub to: Option<i32>,

    /// Include every year
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub all_years: bool,

    /// Only map sightings reported in the United States
    #[arg(long)]
    pub us_only: bool,
}

impl FilterArgs {
    /// Resolve these arguments against the configured defaults.
    ///
    /// Years outside the configured bounds are clamped into them, as the
    /// year slider would.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting year range is reversed.
    pub fn to_filter(&self, config: &Config) -> Result<FilterState> {
        let mut filter = config.initial_filter()?;

        if self.no_shapes {
            filter = filter.with_shapes(Vec::<String>::new());
        } else if !self.shapes.is_empty() {
            filter = filter.with_shapes(self.shapes.iter().cloned());
        }

        if self.all_years {
            return Ok(filter.without_year_range());
        }

        if self.from.is_some() || self.to.is_some() {
            let current = filter.year_range().unwrap_or(config.year_bounds()?);
            let requested = YearRange::new(
                self.from.unwrap_or(current.min()),
                self.to.unwrap_or(current.max()),
            )?;
            let clamped = requested.clamp_to(&config.year_bounds()?);
            filter = filter.with_year_range(clamped.min(), clamped.max())?;
        }

        Ok(filter)
    }

    /// Whether to limit the map to the United States.
    #[must_use]
    pub fn us_only(&self, config: &Config) -> bool {
        self.us_only || config.filters.us_only
    }
}

/// Shapes command arguments.
#[derive(Debug, Args)]
pub struct ShapesCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Chart command arguments.
#[derive(Debug, Args)]
pub struct ChartCommand {
    /// Filter selection
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Pretty-print the JSON
    #[arg(short, long)]
    pub pretty: bool,
}

/// Map command arguments.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Filter selection
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Pretty-print the JSON
    #[arg(short, long)]
    pub pretty: bool,
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Filter selection
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Where to write the page (defaults to the configured output path)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_use_config_filter() {
        let config = Config::default();
        let filter = FilterArgs::default().to_filter(&config).unwrap();
        assert_eq!(filter, config.initial_filter().unwrap());
    }

    #[test]
    fn test_shapes_replace_defaults() {
        let args = FilterArgs {
            shapes: vec!["light".into(), "orb".into()],
            ..FilterArgs::default()
        };
        let filter = args.to_filter(&Config::default()).unwrap();

        assert_eq!(filter.selected_shapes().len(), 2);
        assert!(filter.selected_shapes().contains("orb"));
        assert!(!filter.selected_shapes().contains("triangle"));
    }

    #[test]
    fn test_no_shapes_empties_selection() {
        let args = FilterArgs {
            no_shapes: true,
            ..FilterArgs::default()
        };
        let filter = args.to_filter(&Config::default()).unwrap();
        assert!(filter.has_empty_selection());
    }

    #[test]
    fn test_partial_year_override() {
        let args = FilterArgs {
            from: Some(2000),
            ..FilterArgs::default()
        };
        let filter = args.to_filter(&Config::default()).unwrap();
        assert_eq!(filter.year_range(), Some(YearRange::new(2000, 2010).unwrap()));
    }

    #[test]
    fn test_years_clamped_to_bounds() {
        let args = FilterArgs {
            from: Some(1950),
            to: Some(2030),
            ..FilterArgs::default()
        };
        let filter = args.to_filter(&Config::default()).unwrap();
        assert_eq!(filter.year_range(), Some(YearRange::slider_bounds()));
    }

    #[test]
    fn test_reversed_years_rejected() {
        let args = FilterArgs {
            from: Some(2005),
            to: Some(1995),
            ..FilterArgs::default()
        };
        assert!(args.to_filter(&Config::default()).is_err());
    }

    #[test]
    fn test_all_years_drops_range() {
        let args = FilterArgs {
            all_years: true,
            ..FilterArgs::default()
        };
        let filter = args.to_filter(&Config::default()).unwrap();
        assert!(filter.year_range().is_none());
    }

    #[test]
    fn test_years_apply_when_year_filter_disabled() {
        let mut config = Config::default();
        config.filters.year_filter = false;
        let args = FilterArgs {
            to: Some(1999),
            ..FilterArgs::default()
        };
        let filter = args.to_filter(&config).unwrap();
        assert_eq!(filter.year_range(), Some(YearRange::new(1981, 1999).unwrap()));
    }

    #[test]
    fn test_us_only_from_flag_or_config() {
        let mut config = Config::default();
        assert!(!FilterArgs::default().us_only(&config));

        let args = FilterArgs {
            us_only: true,
            ..FilterArgs::default()
        };
        assert!(args.us_only(&config));

        config.filters.us_only = true;
        assert!(FilterArgs::default().us_only(&config));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
