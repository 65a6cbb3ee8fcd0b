//! `skywatch` - CLI for the sighting dashboard
//!
//! This binary queries the sightings database and prints chart and map
//! specifications, or writes the full dashboard page.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use skywatch::cli::{
    ChartCommand, CheckCommand, Cli, Command, ConfigCommand, MapCommand, RenderCommand,
    ShapesCommand,
};
use skywatch::map::MapRenderer;
use skywatch::page::{render_error_page, render_page};
use skywatch::{init_logging, Config, Dashboard, QueryGateway};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, letting -d override the database path
    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(database) = cli.database.clone() {
        config.storage.database_path = Some(database);
    }

    match cli.command {
        Command::Shapes(cmd) => handle_shapes(&config, &cmd),
        Command::Chart(cmd) => handle_chart(&config, &cmd),
        Command::Map(cmd) => handle_map(&config, &cmd),
        Command::Render(cmd) => handle_render(&config, &cmd),
        Command::Check(cmd) => handle_check(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn dashboard(config: &Config, us_only: bool) -> Dashboard<QueryGateway> {
    Dashboard::new(QueryGateway::new(config.database_path()))
        .with_us_only(us_only)
        .with_map_renderer(MapRenderer::new().with_marker(config.marker_style()))
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn handle_shapes(config: &Config, cmd: &ShapesCommand) -> anyhow::Result<()> {
    let shapes = dashboard(config, false).shape_options()?;
    if cmd.json {
        print_json(&shapes, false)?;
    } else {
        for shape in &shapes {
            println!("{shape}");
        }
    }
    Ok(())
}

fn handle_chart(config: &Config, cmd: &ChartCommand) -> anyhow::Result<()> {
    let filter = cmd.filter.to_filter(config)?;
    let chart = dashboard(config, false).chart(filter.year_range())?;
    print_json(&chart, cmd.pretty)
}

fn handle_map(config: &Config, cmd: &MapCommand) -> anyhow::Result<()> {
    let filter = cmd.filter.to_filter(config)?;
    let view = dashboard(config, cmd.filter.us_only(config)).map(&filter)?;
    match view.spec() {
        Some(spec) => print_json(spec, cmd.pretty),
        None => {
            eprintln!("{}", view.notice().unwrap_or_default());
            Ok(())
        }
    }
}

fn handle_render(config: &Config, cmd: &RenderCommand) -> anyhow::Result<()> {
    let filter = cmd.filter.to_filter(config)?;
    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| config.page.output_path.clone());

    let result = dashboard(config, cmd.filter.us_only(config)).render(&filter);
    let (html, outcome) = match result {
        Ok(view) => (
            render_page(&config.page, &view, config.year_bounds().ok())?,
            Ok(()),
        ),
        Err(e) if e.is_data_unavailable() => {
            error!("Render pass failed: {}", e);
            (render_error_page(&config.page, &e), Err(e))
        }
        Err(e) => return Err(e.into()),
    };

    std::fs::write(&output, html)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Wrote {}", output.display());

    outcome.context("dashboard data unavailable")
}

fn handle_check(config: &Config, cmd: &CheckCommand) -> anyhow::Result<()> {
    let gateway = QueryGateway::new(config.database_path());
    let result = gateway.verify_schema();

    if cmd.json {
        let status = serde_json::json!({
            "database_path": gateway.path(),
            "ok": result.is_ok(),
            "error": result.as_ref().err().map(ToString::to_string),
        });
        print_json(&status, true)?;
    } else {
        println!("Database: {}", gateway.path().display());
        match &result {
            Ok(()) => println!("Schema:   ok"),
            Err(e) => println!("Schema:   {e}"),
        }
    }

    result.context("schema check failed")
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                print_json(config, true)?;
            } else {
                let filters = &config.filters;
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!();
                println!("[Filters]");
                println!("  Default shapes:  {}", filters.default_shapes.join(", "));
                println!(
                    "  Year bounds:     {}-{}",
                    filters.min_year, filters.max_year
                );
                println!(
                    "  Default range:   {}-{}",
                    filters.default_from, filters.default_to
                );
                println!("  Year filter:     {}", filters.year_filter);
                println!("  US only:         {}", filters.us_only);
                println!();
                println!("[Page]");
                println!("  Title:           {}", config.page.title);
                println!("  Output path:     {}", config.page.output_path.display());
                println!(
                    "  Marker:          {} x{}",
                    config.page.marker_color, config.page.marker_size
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
