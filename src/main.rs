use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, reload};

use triangulation::api::{render, ReportFormat, RunReport};
use triangulation::processing::{
    cluster_centroids, ground_truth, load_observations, to_geodesic_points, ClusterLabel, ClusterLabeler,
    Observation, ScenarioSimulator,
};
use triangulation::{Centroid, Coordinate, ErrorReport, IntersectionMethod, TriangulationConfig};
use triangulation::utils::ConfigurationManager;

/// Radius of the simulated station arc around the emitter
const SIMULATED_BASELINE_M: f64 = 50_000.0;

/// Bearing-only emitter triangulation
#[derive(Parser)]
#[command(name = "triangulate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Locate emitters from angle-of-arrival observations", long_about = None)]
struct Cli {
    /// Configuration file (JSON)
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Override the configured intersection method
    #[arg(short, long, value_enum)]
    method: Option<MethodArg>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Cluster centroids (JSON array of coordinates) to score against ground truth
    #[arg(long)]
    centroids: Option<PathBuf>,

    /// Write the in-region intersection cloud (JSON) for external clustering
    #[arg(long)]
    cloud_out: Option<PathBuf>,

    /// Simulate this many emission events instead of reading observations
    #[arg(long)]
    simulate: Option<usize>,

    /// Simulation seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Simulated bearing noise, one standard deviation (degrees)
    #[arg(long, default_value_t = 1.0)]
    noise_deg: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    GreatCircle,
    Planar,
}

impl From<MethodArg> for IntersectionMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::GreatCircle => IntersectionMethod::GreatCircle,
            MethodArg::Planar => IntersectionMethod::Planar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Csv,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Csv => ReportFormat::Csv,
        }
    }
}

/// Treats every in-region intersection as one cluster; simulations have a
/// single emitter.
struct SingleEmitter;

impl ClusterLabeler for SingleEmitter {
    fn label(&self, points: &[Coordinate]) -> Vec<ClusterLabel> {
        vec![ClusterLabel::Cluster(0); points.len()]
    }
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

fn region_center(config: &TriangulationConfig) -> Coordinate {
    Coordinate::new(
        (config.axis_y[0] + config.axis_y[1]) / 2.0,
        (config.axis_x[0] + config.axis_x[1]) / 2.0,
    )
}

fn simulate(config: &TriangulationConfig, events: usize, seed: u64, noise_deg: f64) -> Result<Vec<Observation>, Box<dyn std::error::Error>> {
    let emitter = region_center(config);
    let stations = ScenarioSimulator::western_arc(emitter, config.number_of_receptors, SIMULATED_BASELINE_M);
    let mut simulator = ScenarioSimulator::new(stations, emitter, noise_deg, seed)?;
    info!(
        "Simulating {} events from {} stations around emitter {} (noise {} deg, seed {})",
        events,
        simulator.group_size(),
        emitter,
        noise_deg,
        seed
    );
    Ok(simulator.generate(events))
}

fn load_centroids(path: &Path) -> Result<Vec<Centroid>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let centroids: Vec<Centroid> = serde_json::from_str(&content)?;
    info!("Loaded {} centroids from {}", centroids.len(), path.display());
    Ok(centroids)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (filter, reload_handle) = reload::Layer::new(parse_level(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let manager = ConfigurationManager::from_file(&cli.config)?;
    let mut config = manager.get_config().clone();

    if config.debug_logging {
        reload_handle.modify(|filter| {
            if *filter < LevelFilter::DEBUG {
                *filter = LevelFilter::DEBUG;
            }
        })?;
    }
    if let Some(method) = cli.method {
        config.intersection_method = method.into();
    }

    let observations = match cli.simulate {
        Some(events) => simulate(&config, events, cli.seed, cli.noise_deg)?,
        None => {
            let path = config
                .observations_path
                .as_deref()
                .ok_or("configuration has no observations_path; pass --simulate to use synthetic data")?;
            load_observations(path)?
        }
    };

    let generator = config.generator()?;
    let result = generator.generate(&to_geodesic_points(&observations));

    if let Some(path) = &cli.cloud_out {
        fs::write(path, serde_json::to_string_pretty(&result.filtered_intersections)?)?;
        info!(
            "Wrote {} intersections to {}",
            result.filtered_intersections.len(),
            path.display()
        );
    }

    let centroids = match (&cli.centroids, cli.simulate) {
        (Some(path), _) => Some(load_centroids(path)?),
        (None, Some(_)) => Some(cluster_centroids(&SingleEmitter, &result.filtered_intersections)?),
        (None, None) => None,
    };

    let mut report = RunReport::new(config.intersection_method, &result, config.distance_unit);
    if let Some(centroids) = centroids {
        let emitters = ground_truth(&observations);
        if emitters.is_empty() {
            warn!("Observations carry no emitter locations; triangulation error not evaluated");
        } else {
            report = report.with_error_report(ErrorReport::evaluate(&emitters, &centroids));
        }
    }

    print!("{}", render(&report, cli.format.into())?);

    Ok(())
}
