use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use mortar_solver::{
    CalculatorConfig, CompassPoint, FiringSolution, LaunchPoint, MapPoint, SolutionCalculator,
    SolutionReport,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Mortar firing-solution calculator for the reference map"
)]
struct Cli {
    /// JSON calculator config (defaults to the built-in reference map)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the configured launch points
    List,
    /// Compute a firing solution for a target in map pixels
    Solve {
        /// Launch point id (defaults to the first configured point)
        #[arg(long)]
        launch: Option<String>,

        /// Target x [map px]
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        /// Target y [map px, growing downward]
        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        /// Print JSON instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the active configuration as JSON
    Config,
}

#[derive(Serialize)]
struct SolveOutput<'a> {
    launch_point: &'a LaunchPoint,
    target: MapPoint,
    compass: CompassPoint,
    solution: FiringSolution,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::List => {
            for p in &config.launch_points {
                println!("{:<6} {:<12} ({}, {})", p.id, p.name, p.x, p.y);
            }
        }
        Command::Config => {
            println!("{}", config.to_json_pretty()?);
        }
        Command::Solve { launch, x, y, json } => {
            if !(x.is_finite() && y.is_finite()) {
                bail!("target coordinates must be finite, got ({x}, {y})");
            }
            let calc = SolutionCalculator::new(config).context("invalid calculator config")?;
            let launch = match launch {
                Some(id) => id,
                None => calc
                    .default_launch_point()
                    .map(|p| p.id.clone())
                    .context("no launch points configured")?,
            };
            debug!(launch = %launch, x, y, "solving");

            let solution = calc.compute_solution(&launch, x, y)?;
            let launch_point = calc
                .registry()
                .find(&launch)
                .context("launch point vanished from registry")?;
            let target = MapPoint::new(x, y);

            if json {
                let out = SolveOutput {
                    launch_point,
                    target,
                    compass: solution.compass(),
                    solution,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let report = SolutionReport::new(&solution)
                    .with_launch(launch_point)
                    .with_target(target);
                println!("{report}");
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CalculatorConfig> {
    match path {
        Some(path) => CalculatorConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            info!("using built-in reference config");
            Ok(CalculatorConfig::default())
        }
    }
}
