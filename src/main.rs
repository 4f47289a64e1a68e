use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ballistic_sim::chart::{render_drop_chart, render_trajectory_chart};
use ballistic_sim::config::SimConfig;
use ballistic_sim::core::moa::{AdjustmentSource, BallisticTrajectoryData, drop_to_moa};
use ballistic_sim::core::trajectory::{
    SimulationParams, Termination, Trajectory, analytic_flight, compute_trajectory_with,
};
use ballistic_sim::export::{write_trajectory_csv_file, write_trajectory_json};
use ballistic_sim::logging;
use clap::{Args, Parser, Subcommand};
use log::{debug, info};

/// Projectile arc sampler and bullet-drop MOA converter
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file with launch, sampler and viewer defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Sample a launch and print range, max height and flight time
    Simulate(SimulateArgs),
    /// Convert a drop in inches at a distance in metres to MOA
    Moa {
        /// Drop in inches (negative below the bore line)
        #[arg(long, allow_hyphen_values = true)]
        drop: f64,
        /// Distance in metres
        #[arg(long, allow_hyphen_values = true)]
        distance: f64,
    },
    /// Summarise a weapon's drop table and optionally chart it
    DropChart {
        /// JSON file with distances, drops and moaAdjustments
        #[arg(long)]
        data: PathBuf,
        /// Weapon name used in the chart caption
        #[arg(long, default_value = "Unknown weapon")]
        weapon: String,
        /// Write an SVG chart (timestamped name when no path is given)
        #[arg(long)]
        chart: Option<Option<PathBuf>>,
    },
}

#[derive(Args)]
struct SimulateArgs {
    /// Initial velocity (m/s)
    #[arg(long)]
    velocity: Option<f64>,
    /// Launch angle (degrees)
    #[arg(long, allow_hyphen_values = true)]
    angle: Option<f64>,
    /// Launch height (m)
    #[arg(long)]
    height: Option<f64>,
    /// Gravity (m/s^2)
    #[arg(long)]
    gravity: Option<f64>,
    /// Write samples as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Print the samples as JSON on stdout
    #[arg(long)]
    json: bool,
    /// Write an SVG chart (timestamped name when no path is given)
    #[arg(long)]
    chart: Option<Option<PathBuf>>,
}

impl SimulateArgs {
    fn apply(&self, base: SimulationParams) -> SimulationParams {
        SimulationParams {
            velocity: self.velocity.unwrap_or(base.velocity),
            angle: self.angle.unwrap_or(base.angle),
            height: self.height.unwrap_or(base.height),
            gravity: self.gravity.unwrap_or(base.gravity),
        }
    }
}

fn read_f64(prompt: &str, default: f64) -> Result<f64> {
    loop {
        print!("{prompt} [{default}]: ");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        let bytes = io::stdin()
            .read_line(&mut line)
            .context("could not read input")?;

        if bytes == 0 {
            bail!("input ended unexpectedly (EOF)");
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("Please enter a valid number (e.g., 45 or 12.5)."),
        }
    }
}

fn params_from_user(defaults: SimulationParams) -> Result<SimulationParams> {
    Ok(SimulationParams {
        velocity: read_f64("Velocity (m/s)", defaults.velocity)?,
        angle: read_f64("Angle (degrees)", defaults.angle)?,
        height: read_f64("Height (m)", defaults.height)?,
        gravity: read_f64("Gravity (m/s^2)", defaults.gravity)?,
    })
}

fn timestamped_chart_path(prefix: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(format!("{prefix}-{stamp}.svg"))
}

fn chart_path(requested: &Option<Option<PathBuf>>, prefix: &str) -> Option<PathBuf> {
    requested
        .as_ref()
        .map(|path| path.clone().unwrap_or_else(|| timestamped_chart_path(prefix)))
}

fn termination_text(termination: Termination) -> &'static str {
    match termination {
        Termination::GroundImpact => "ground impact",
        Termination::SafetyBound => "time limit reached (still airborne)",
    }
}

fn print_readout(params: &SimulationParams, trajectory: &Trajectory) -> Result<()> {
    let summary = trajectory.summary();
    let exact = analytic_flight(params)?;

    println!();
    println!("Samples:      {}", trajectory.len());
    println!("Range:        {:.2} m", summary.max_range);
    println!("Max height:   {:.2} m", summary.max_height);
    println!("Flight time:  {:.2} s", summary.flight_time);
    println!("Ended by:     {}", termination_text(summary.termination));
    println!(
        "Closed form:  range {:.4} m, landing {:.4} s, apex {:.4} m at {:.4} s",
        exact.range_m, exact.landing_time_s, exact.apex_height_m, exact.apex_time_s
    );
    Ok(())
}

fn run_simulation(
    params: SimulationParams,
    config: &SimConfig,
    csv: Option<&Path>,
    json: bool,
    chart: Option<PathBuf>,
) -> Result<()> {
    let trajectory = compute_trajectory_with(params, config.sampler)
        .context("cannot sample trajectory")?;
    debug!("sampled trajectory for {params:?}");

    if json {
        let stdout = io::stdout();
        write_trajectory_json(&mut stdout.lock(), &trajectory)?;
    } else {
        print_readout(&params, &trajectory)?;
    }

    if let Some(path) = csv {
        write_trajectory_csv_file(path, &trajectory)
            .with_context(|| format!("cannot write {}", path.display()))?;
        info!("wrote {} samples to {}", trajectory.len(), path.display());
    }
    if let Some(path) = chart {
        render_trajectory_chart(&path, &trajectory, &params)
            .with_context(|| format!("cannot render {}", path.display()))?;
    }
    Ok(())
}

fn run_drop_chart(data_path: &Path, weapon: &str, chart: Option<PathBuf>) -> Result<()> {
    let text = fs::read_to_string(data_path)
        .with_context(|| format!("cannot read {}", data_path.display()))?;
    let data = BallisticTrajectoryData::from_json_str(&text)
        .with_context(|| format!("invalid drop data in {}", data_path.display()))?;

    let summary = data.summary();
    println!("{weapon}");
    println!("Max range:       {} m", summary.max_range_m);
    println!("Max drop:        {:.1}\"", summary.max_drop_in);
    println!("Wind drift:      {:.2}\"", summary.wind_drift_in);
    println!("Time to target:  {:.3} s", summary.time_to_target_s);
    println!();
    println!("{:>10} {:>10} {:>8}", "distance", "drop (in)", "MOA");
    for row in data.adjustment_table()? {
        let marker = match row.source {
            AdjustmentSource::Supplied => "",
            AdjustmentSource::Derived => " *",
        };
        let drop = row
            .drop_in
            .map_or_else(|| "-".to_string(), |d| format!("{d:.2}"));
        println!("{:>10} {drop:>10} {:>8.2}{marker}", row.label, row.moa);
    }
    println!("(* derived from the drop, no published value)");

    if let Some(path) = chart {
        render_drop_chart(&path, &data, weapon)
            .with_context(|| format!("cannot render {}", path.display()))?;
    }
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => SimConfig::default(),
    };

    match cli.command {
        None => {
            let params = params_from_user(config.launch)?;
            run_simulation(params, &config, None, false, None)
        }
        Some(Command::Simulate(args)) => {
            let params = args.apply(config.launch);
            let chart = chart_path(&args.chart, "trajectory");
            run_simulation(params, &config, args.csv.as_deref(), args.json, chart)
        }
        Some(Command::Moa { drop, distance }) => {
            let moa = drop_to_moa(drop, distance)?;
            println!("{moa:.4} MOA ({drop}\" at {distance} m)");
            Ok(())
        }
        Some(Command::DropChart {
            data,
            weapon,
            chart,
        }) => {
            let chart = chart_path(&chart, "drop-chart");
            run_drop_chart(&data, &weapon, chart)
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config_launch() {
        let cli = Cli::try_parse_from([
            "ballistic_sim",
            "simulate",
            "--velocity",
            "80",
            "--angle",
            "30",
        ])
        .expect("valid args");
        let Some(Command::Simulate(args)) = cli.command else {
            panic!("expected simulate");
        };
        let params = args.apply(SimulationParams {
            height: 5.0,
            ..SimulationParams::default()
        });
        assert_eq!(params.velocity, 80.0);
        assert_eq!(params.angle, 30.0);
        assert_eq!(params.height, 5.0);
        assert_eq!(params.gravity, 9.81);
    }

    #[test]
    fn bare_chart_flag_gets_timestamped_name() {
        let cli = Cli::try_parse_from(["ballistic_sim", "simulate", "--chart"]).expect("valid");
        let Some(Command::Simulate(args)) = cli.command else {
            panic!("expected simulate");
        };
        let path = chart_path(&args.chart, "trajectory").expect("chart requested");
        let name = path.to_string_lossy();
        assert!(name.starts_with("trajectory-"));
        assert!(name.ends_with(".svg"));
    }

    #[test]
    fn moa_accepts_negative_drop() {
        let cli = Cli::try_parse_from(["ballistic_sim", "moa", "--drop", "-12.5", "--distance", "300"])
            .expect("valid args");
        assert!(matches!(cli.command, Some(Command::Moa { drop, .. }) if drop == -12.5));
    }

    #[test]
    fn moa_distance_accepts_leading_hyphen() {
        let cli = Cli::try_parse_from(["ballistic_sim", "moa", "--drop", "1", "--distance", "-5"])
            .expect("value reaches the converter");
        let Some(Command::Moa { drop, distance }) = cli.command else {
            panic!("expected moa");
        };
        assert_eq!(distance, -5.0);
        assert!(matches!(
            drop_to_moa(drop, distance),
            Err(ballistic_sim::BallisticsError::InvalidArgument { name: "distance_m", .. })
        ));
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["ballistic_sim", "-v"]).expect("valid args");
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }
}
