//! Folio CLI
//!
//! Command-line previews for the portfolio's motion and calendar code:
//! - Spring trajectories frame by frame
//! - Lane assignment for a projects file
//! - Text month grids with per-day lanes

mod config;
mod projects;
mod render;
mod trajectory;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_animation::MotionPreference;
use folio_calendar::{compute_lanes_checked, LaneAssignment, MonthView, YearMonth};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::FolioConfig;
use crate::projects::ProjectsFile;
use crate::trajectory::Simulation;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - preview springs, project lanes, and month grids")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./folio.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a spring trajectory until it settles
    Spring {
        /// Starting value
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        from: f64,

        /// Target value
        #[arg(long, allow_hyphen_values = true)]
        to: f64,

        /// Spring preset (default, gentle, snappy, stiff, wobbly, button)
        #[arg(short, long)]
        preset: Option<String>,

        /// Maximum number of frames
        #[arg(long, default_value_t = 600)]
        steps: u32,

        /// Seconds between frames
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Behave as if the user prefers reduced motion
        #[arg(long)]
        reduced_motion: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Assign lanes to the projects in a file
    Lanes {
        /// Projects file ([[project]] tables)
        file: PathBuf,

        /// Previous assignment (JSON from `folio lanes --json`) to keep lanes stable
        #[arg(long)]
        previous: Option<PathBuf>,

        /// Print the assignment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a month grid with project lanes
    Month {
        /// Projects file ([[project]] tables)
        file: PathBuf,

        /// Year to show (defaults to the earliest project start)
        #[arg(long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to the earliest project start)
        #[arg(long)]
        month: Option<u32>,

        /// Previous assignment (JSON from `folio lanes --json`)
        #[arg(long)]
        previous: Option<PathBuf>,

        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = FolioConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Spring {
            from,
            to,
            preset,
            steps,
            dt,
            reduced_motion,
            json,
        } => cmd_spring(&config, from, to, preset.as_deref(), steps, dt, reduced_motion, json),
        Commands::Lanes {
            file,
            previous,
            json,
        } => cmd_lanes(&file, previous.as_deref(), json),
        Commands::Month {
            file,
            year,
            month,
            previous,
            json,
        } => cmd_month(&config, &file, year, month, previous.as_deref(), json),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_spring(
    config: &FolioConfig,
    from: f64,
    to: f64,
    preset: Option<&str>,
    steps: u32,
    dt: f64,
    reduced_motion: bool,
    json: bool,
) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 {
        anyhow::bail!("--dt must be a positive number of seconds, got {dt}");
    }
    if !from.is_finite() || !to.is_finite() {
        anyhow::bail!("--from and --to must be finite");
    }

    let spring = config.spring.resolve(preset)?;
    let preference = if reduced_motion {
        MotionPreference::Reduce
    } else {
        config.motion.preference()
    };

    tracing::info!(
        stiffness = spring.stiffness(),
        damping = spring.damping(),
        mass = spring.mass(),
        ratio = spring.damping_ratio(),
        %preference,
        "simulating spring"
    );

    let trajectory = trajectory::simulate(
        spring,
        &Simulation {
            from,
            to,
            dt,
            max_steps: steps,
            limits: config.frame,
            preference,
        },
    )?;

    if json {
        print_json(&trajectory)
    } else {
        println!("{}", trajectory::render(&trajectory));
        Ok(())
    }
}

fn load_previous(path: Option<&Path>) -> Result<LaneAssignment> {
    path.map_or_else(|| Ok(LaneAssignment::new()), projects::load_assignment)
}

fn cmd_lanes(file: &Path, previous: Option<&Path>, json: bool) -> Result<()> {
    let projects = ProjectsFile::load(file)?;
    let previous = load_previous(previous)?;
    let packed = compute_lanes_checked(&previous, &projects.projects);

    tracing::info!(
        placed = packed.assignment.len(),
        skipped = packed.rejected.len(),
        lanes = packed.assignment.lane_count(),
        "packed projects"
    );

    if json {
        print_json(&packed.assignment)
    } else {
        println!("{}", render::lane_table(&packed));
        Ok(())
    }
}

fn cmd_month(
    config: &FolioConfig,
    file: &Path,
    year: Option<i32>,
    month: Option<u32>,
    previous: Option<&Path>,
    json: bool,
) -> Result<()> {
    let projects = ProjectsFile::load(file)?;
    let previous = load_previous(previous)?;
    let packed = compute_lanes_checked(&previous, &projects.projects);

    let earliest = packed.ranges.iter().map(|r| r.start()).min().map(YearMonth::of);
    let shown = match (year, month, earliest) {
        (Some(year), Some(month), _) => YearMonth::new(year, month)?,
        (year, month, Some(earliest)) => {
            YearMonth::new(year.unwrap_or(earliest.year()), month.unwrap_or(earliest.month()))?
        }
        _ => anyhow::bail!("No projects to pick a month from; pass --year and --month"),
    };

    let max_visible = config.calendar.max_visible_lanes;
    let view = MonthView::build(shown, &packed.ranges, &packed.assignment, max_visible);

    if json {
        return print_json(&view);
    }

    let legend = render::Legend::new(&packed.ranges);
    println!("{}", render::month_grid(&view, &legend, max_visible));
    if !packed.ranges.is_empty() {
        println!();
        println!("{}", legend.render(&packed));
    }
    Ok(())
}
