//! CLI interface for Starhelm.
//!
//! Each subcommand is non-interactive: arguments in, text or JSON out.
//! Logs go to stderr; stdout carries only command output.
//!
//! - `starhelm route` plans one or more routes between two positions.
//! - `starhelm direction` answers a compass-only query.
//! - `starhelm sky` lists what is visible from a position.

mod format;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::Timestamp;
use tracing::info;

use starhelm::{
    NavigationError, OptimizeFor, Position, export,
    geodesy::{direction, positions_equal},
    navigate::{AlternativeStrategy, RouteRequest, plan_routes},
    sky::{CatalogSky, Sky, Visibility},
};

use crate::config::Config;

use format::{format_direction, format_routes, format_sightings};

/// Start and target closer than this are the same place, km.
const MIN_SEPARATION_KM: f64 = 0.001;

/// Starhelm: navigate by the stars.
#[derive(Debug, Parser)]
#[command(name = "starhelm", version, after_long_help = USAGE_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const USAGE_HELP: &str = r"Examples:
  starhelm route --from 52.52,13.405 --to 52.75,13.6 --at 2024-06-21T22:00:00Z
  starhelm route --from 52.52,13.405 --to 52.75,13.6 --format gpx --out walk.gpx
  starhelm direction --from 0,0 --to 1,0
  starhelm sky --at 52.52,13.405 --max-magnitude 1.5

Positions are `lat,lon` or `lat,lon,alt` (degrees, meters).
Defaults come from ~/.starhelm/config.toml when present.";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan routes from one position to another using the visible sky.
    ///
    /// Routes are sorted by total distance; the first is always the
    /// shortest. gpx and geojson export only that first route.
    Route {
        /// Starting position, `lat,lon[,alt]`.
        #[arg(long, allow_hyphen_values = true)]
        from: Position,

        /// Target position, `lat,lon[,alt]`.
        #[arg(long, allow_hyphen_values = true)]
        to: Position,

        /// Observation time (RFC 3339). Defaults to now.
        #[arg(long)]
        at: Option<Timestamp>,

        /// Distance walked per step, km.
        #[arg(long)]
        step_size: Option<f64>,

        /// Legs allowed per route.
        #[arg(long)]
        max_iterations: Option<u32>,

        /// Number of alternative routes to return.
        #[arg(long)]
        routes: Option<usize>,

        /// Selection policy for the primary route.
        #[arg(long, value_enum, default_value_t = OptimizeForArg::Shortest)]
        optimize_for: OptimizeForArg,

        /// How alternative routes are generated.
        #[arg(long, value_enum)]
        alternatives: Option<StrategyArg>,

        /// Prefer planets, sun, moon, and navigational stars.
        #[arg(long)]
        prioritize_major: bool,

        /// Only follow sun, moon, and planets.
        #[arg(long)]
        planets_only: bool,

        #[arg(long, value_enum, default_value_t = FormatArg::Summary)]
        format: FormatArg,

        /// Write output to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Bearing and cardinal direction from one position to another.
    Direction {
        #[arg(long, allow_hyphen_values = true)]
        from: Position,

        #[arg(long, allow_hyphen_values = true)]
        to: Position,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List catalog objects visible from a position.
    Sky {
        /// Observer position, `lat,lon[,alt]`.
        #[arg(long, allow_hyphen_values = true)]
        at: Position,

        /// Observation time (RFC 3339). Defaults to now.
        #[arg(long)]
        time: Option<Timestamp>,

        /// Minimum altitude, degrees.
        #[arg(long, allow_hyphen_values = true)]
        min_altitude: Option<f64>,

        /// Faintest magnitude shown (exclusive).
        #[arg(long, allow_hyphen_values = true)]
        max_magnitude: Option<f64>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// CLI-facing selection policy, mapped to the domain `OptimizeFor`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OptimizeForArg {
    /// Closest bearing match.
    Shortest,
    /// Favor high objects that need fewer switches.
    LeastChanges,
    /// Only objects at least 20° above the horizon.
    Comfortable,
}

impl OptimizeForArg {
    fn to_domain(self) -> OptimizeFor {
        match self {
            Self::Shortest => OptimizeFor::Shortest,
            Self::LeastChanges => OptimizeFor::LeastChanges,
            Self::Comfortable => OptimizeFor::Comfortable,
        }
    }
}

/// CLI-facing alternative strategy, mapped to the domain `AlternativeStrategy`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Exclude the objects earlier routes led with.
    Exclusions,
    /// Add a comfortable route that keeps its label.
    Comfortable,
}

impl StrategyArg {
    fn to_domain(self) -> AlternativeStrategy {
        match self {
            Self::Exclusions => AlternativeStrategy::Exclusions,
            Self::Comfortable => AlternativeStrategy::Comfortable,
        }
    }
}

/// Output format for `route`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-readable table per route.
    Summary,
    /// All routes as JSON.
    Json,
    /// The shortest route as a GPX track.
    Gpx,
    /// The shortest route as a GeoJSON feature collection.
    Geojson,
}

/// Why a command failed.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Planning failed; infeasible plans get their own exit code.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// 2 for an infeasible plan, 1 for anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Navigation(e) if e.is_infeasible() => 2,
            Self::Navigation(_) | Self::Other(_) => 1,
        }
    }
}

impl From<String> for CliError {
    fn from(message: String) -> Self {
        Self::Other(message)
    }
}

impl From<&str> for CliError {
    fn from(message: &str) -> Self {
        Self::Other(message.to_string())
    }
}

/// Run the CLI.
pub fn run(config: &Config) -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            from,
            to,
            at,
            step_size,
            max_iterations,
            routes,
            optimize_for,
            alternatives,
            prioritize_major,
            planets_only,
            format,
            out,
        } => {
            let mut config = config.clone();
            if let Some(step) = step_size {
                config.step_size_km = step;
            }
            if let Some(max) = max_iterations {
                config.max_iterations = max;
            }
            if let Some(n) = routes {
                config.max_routes = n;
            }
            if let Some(strategy) = alternatives {
                config.alternatives = strategy.to_domain();
            }
            config.prioritize_major |= prioritize_major;
            config.validate()?;

            let mut request = route_request(&config, from, to, at.unwrap_or_else(Timestamp::now))?;
            request.optimize_for = optimize_for.to_domain();
            request.planets_only = planets_only;
            cmd_route(&config, &request, format, out)
        }
        Command::Direction { from, to, json } => cmd_direction(&from, &to, json),
        Command::Sky {
            at,
            time,
            min_altitude,
            max_magnitude,
            json,
        } => {
            let visibility = Visibility {
                min_altitude: min_altitude.unwrap_or(config.min_altitude),
                max_magnitude: max_magnitude.unwrap_or(config.max_magnitude),
            };
            cmd_sky(&at, time.unwrap_or_else(Timestamp::now), visibility, json)
        }
    }
}

/// Build a request from validated config values.
fn route_request(
    config: &Config,
    from: Position,
    to: Position,
    at: Timestamp,
) -> Result<RouteRequest, CliError> {
    if positions_equal(&from, &to, MIN_SEPARATION_KM) {
        return Err("start and target are the same position".into());
    }

    let mut request = RouteRequest::new(from, to, at);
    request.step_size_km = config.step_size_km;
    request.max_iterations = config.max_iterations;
    request.max_routes = config.max_routes;
    request.prioritize_major = config.prioritize_major;
    request.visibility = Visibility {
        min_altitude: config.min_altitude,
        max_magnitude: config.max_magnitude,
    };
    Ok(request)
}

fn cmd_route(
    config: &Config,
    request: &RouteRequest,
    format: FormatArg,
    out: Option<PathBuf>,
) -> Result<(), CliError> {
    let sky = CatalogSky::new();
    let routes = plan_routes(&sky, request, &config.alternatives.variants())?;
    info!(count = routes.len(), "routes planned");

    let shortest = routes.first().ok_or("no route found")?;
    let output = match format {
        FormatArg::Summary => format_routes(&routes),
        FormatArg::Json => serde_json::to_string_pretty(&routes)
            .map_err(|e| format!("failed to serialize routes: {e}"))?,
        FormatArg::Gpx => export::gpx(shortest, &shortest.label),
        FormatArg::Geojson => {
            serde_json::to_string_pretty(&export::geojson(shortest, &shortest.label))
                .map_err(|e| format!("failed to serialize GeoJSON: {e}"))?
        }
    };

    match out {
        Some(path) => {
            fs::write(&path, &output)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("Planned {} route(s) → {}", routes.len(), path.display());
        }
        None => print!("{output}"),
    }

    Ok(())
}

fn cmd_direction(from: &Position, to: &Position, json: bool) -> Result<(), CliError> {
    let answer = direction(from, to);
    if json {
        let json = serde_json::to_string_pretty(&answer)
            .map_err(|e| format!("failed to serialize direction: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", format_direction(&answer));
    }
    Ok(())
}

fn cmd_sky(
    at: &Position,
    time: Timestamp,
    visibility: Visibility,
    json: bool,
) -> Result<(), CliError> {
    let sky = CatalogSky::new();
    let sightings = sky
        .visible_objects(at, time, &HashSet::new(), visibility)
        .map_err(NavigationError::from)?;

    if json {
        let json = serde_json::to_string_pretty(&sightings)
            .map_err(|e| format!("failed to serialize sightings: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", format_sightings(&sightings));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use starhelm::SkyError;

    fn pos(lat: f64, lon: f64) -> Position {
        Position::new(lat, lon).unwrap()
    }

    #[test]
    fn exit_codes_separate_infeasible_from_faults() {
        let infeasible = CliError::from(NavigationError::NoSuitableReference);
        assert_eq!(infeasible.exit_code(), 2);

        let fault = CliError::from(NavigationError::from(SkyError::UnknownObject("X".into())));
        assert_eq!(fault.exit_code(), 1);

        assert_eq!(CliError::from("bad input").exit_code(), 1);
    }

    #[test]
    fn request_takes_config_values() {
        let config = Config {
            step_size_km: 2.0,
            max_iterations: 40,
            max_routes: 2,
            min_altitude: 5.0,
            max_magnitude: 3.0,
            prioritize_major: true,
            ..Config::default()
        };
        let at: Timestamp = "2024-06-21T22:00:00Z".parse().unwrap();

        let request = route_request(&config, pos(0.0, 0.0), pos(1.0, 0.0), at).unwrap();
        assert!((request.step_size_km - 2.0).abs() < 1e-12);
        assert_eq!(request.max_iterations, 40);
        assert_eq!(request.max_routes, 2);
        assert!(request.prioritize_major);
        assert!((request.visibility.min_altitude - 5.0).abs() < 1e-12);
        assert!((request.visibility.max_magnitude - 3.0).abs() < 1e-12);
        assert_eq!(request.observation_time, at);
    }

    #[test]
    fn rejects_identical_endpoints() {
        let err = route_request(
            &Config::default(),
            pos(10.0, 10.0),
            pos(10.0, 10.0),
            Timestamp::UNIX_EPOCH,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "start and target are the same position");
    }

    #[test]
    fn parses_route_arguments() {
        let cli = Cli::try_parse_from([
            "starhelm",
            "route",
            "--from",
            "-33.9,151.2",
            "--to",
            "-34.0,151.3",
            "--optimize-for",
            "least-changes",
            "--format",
            "geojson",
            "--at",
            "2024-06-21T22:00:00Z",
        ])
        .unwrap();

        let Command::Route {
            from,
            optimize_for,
            format,
            at,
            ..
        } = cli.command
        else {
            panic!("expected route command");
        };
        assert_eq!(from, pos(-33.9, 151.2));
        assert_eq!(optimize_for.to_domain(), OptimizeFor::LeastChanges);
        assert_eq!(format, FormatArg::Geojson);
        assert!(at.is_some());
    }

    #[test]
    fn rejects_invalid_position_argument() {
        let result = Cli::try_parse_from(["starhelm", "direction", "--from", "95,0", "--to", "0,0"]);
        assert!(result.is_err());
    }
}
