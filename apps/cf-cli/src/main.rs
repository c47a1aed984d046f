use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use cf_app::{
    AppError, AppResult, CsvRenderer, JsonRenderer, Renderer, RunOptions, RunResponse,
    RunTimingSummary, Variable, extract_series, run_study, run_study_with_progress, summarize,
    write_series_csv,
};
use cf_project::{AngularSpeedDef, LinkageDef, SamplingDef, StudyDef, TimeBaseDef};
use cf_sim::SampleProgress;

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "CrankFlow CLI - Slider-crank kinematics tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate study file syntax and values
    Validate {
        /// Path to the study file (YAML or JSON)
        study_path: PathBuf,
    },
    /// Run a study and print a summary
    Run {
        /// Path to the study file (YAML or JSON)
        study_path: PathBuf,
        /// Compute frames in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Export every frame of a study
    Export {
        /// Path to the study file (YAML or JSON)
        study_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export one time series from a study
    Series {
        /// Path to the study file (YAML or JSON)
        study_path: PathBuf,
        /// Variable name (e.g., x_b, v_x_b, a_y_b, x_c)
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a linkage given on the command line
    Solve {
        /// Crank length |AB| in meters
        #[arg(long)]
        length_ab: f64,
        /// Coupler length |BC| in meters
        #[arg(long)]
        length_bc: f64,
        /// Crank speed in rad/s
        #[arg(long, conflicts_with = "rpm", required_unless_present = "rpm")]
        rad_per_sec: Option<f64>,
        /// Crank speed in revolutions per minute
        #[arg(long)]
        rpm: Option<f64>,
        /// Number of frames
        #[arg(long, default_value_t = 360)]
        frames: usize,
        /// Revolutions to cover
        #[arg(long, default_value_t = 2.0)]
        revolutions: f64,
        /// Treat revolutions as whole crank turns instead of 2π-second spans
        #[arg(long)]
        crank_period: bool,
        /// Compute frames in parallel
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { study_path } => cmd_validate(&study_path),
        Commands::Run {
            study_path,
            parallel,
        } => {
            let study = cf_project::load_study(&study_path)?;
            cmd_run(&study, parallel)
        }
        Commands::Export {
            study_path,
            format,
            pretty,
            output,
        } => cmd_export(&study_path, format, pretty, output.as_deref()),
        Commands::Series {
            study_path,
            variable,
            output,
        } => cmd_series(&study_path, &variable, output.as_deref()),
        Commands::Solve {
            length_ab,
            length_bc,
            rad_per_sec,
            rpm,
            frames,
            revolutions,
            crank_period,
            parallel,
        } => {
            let angular_speed = match (rad_per_sec, rpm) {
                (Some(value), _) => AngularSpeedDef::RadPerSec { value },
                (None, Some(value)) => AngularSpeedDef::Rpm { value },
                (None, None) => {
                    return Err(AppError::InvalidInput(
                        "one of --rad-per-sec or --rpm is required".to_string(),
                    ));
                }
            };
            let study = StudyDef {
                version: cf_project::LATEST_VERSION,
                name: "command line".to_string(),
                description: None,
                linkage: LinkageDef {
                    length_ab_m: length_ab,
                    length_bc_m: length_bc,
                    angular_speed,
                },
                sampling: SamplingDef {
                    frame_count: frames,
                    revolutions,
                    time_base: if crank_period {
                        TimeBaseDef::CrankPeriod
                    } else {
                        TimeBaseDef::Nominal
                    },
                    tangent_tol: None,
                },
            };
            cmd_run(&study, parallel)
        }
    }
}

fn cmd_validate(study_path: &Path) -> AppResult<()> {
    println!("Validating study: {}", study_path.display());
    let study = cf_project::load_study(study_path)?;
    let runtime = cf_app::compile_study(&study)?;
    if !runtime.geometry.always_reachable() {
        tracing::warn!(
            length_ab = runtime.geometry.length_ab(),
            length_bc = runtime.geometry.length_bc(),
            "coupler shorter than crank; sampling may hit an unreachable pose"
        );
    }
    println!("✓ Study is valid");
    Ok(())
}

fn cmd_run(study: &StudyDef, parallel: bool) -> AppResult<()> {
    println!("Running study: {}", study.name);

    let options = RunOptions {
        parallel,
        cancel: None,
    };

    let mut last_emit = Instant::now();
    let response = run_study_with_progress(
        study,
        &options,
        Some(&mut |progress: SampleProgress| {
            let done = progress.completed == progress.total;
            if done || last_emit.elapsed().as_millis() >= 100 {
                render_cli_progress(&progress);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    println!("✓ Study completed");
    print_run_summary(&response)?;
    print_timing_summary(&response.timing);
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(progress: &SampleProgress) {
    let width = 28usize;
    let fraction = progress.fraction_complete();
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  frame={}/{}",
        bar,
        fraction * 100.0,
        progress.completed,
        progress.total
    );
    let _ = io::stdout().flush();
}

fn print_run_summary(response: &RunResponse) -> AppResult<()> {
    let trajectory = &response.trajectory;
    let summary = summarize(trajectory)?;
    let geometry = trajectory.geometry();

    println!("\nLinkage:");
    println!("  |AB| = {:.4} m", geometry.length_ab());
    println!("  |BC| = {:.4} m", geometry.length_bc());
    println!("  w    = {:.4} rad/s", geometry.angular_speed());

    println!("\nTrajectory:");
    println!("  Frames: {}", summary.frame_count);
    println!(
        "  Time range: {:.3} - {:.3} s (dt = {:.4} s)",
        summary.time_range.0, summary.time_range.1, summary.dt
    );
    println!(
        "  Slider stroke: {:.4} - {:.4} m ({:.4} m)",
        summary.stroke.0,
        summary.stroke.1,
        summary.stroke_length()
    );
    println!("  Peak |v_B|: {:.4} m/s", summary.peak_b_speed);
    println!("  Peak |a_B|: {:.4} m/s^2", summary.peak_b_acceleration);
    if summary.degenerate_count > 0 {
        println!("  Tangent roots: {}", summary.degenerate_count);
        for d in trajectory.diagnostics() {
            println!("    frame {} at t = {:.4} s", d.index, d.t);
        }
    }
    Ok(())
}

fn print_timing_summary(timing: &RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let compile_pct = 100.0 * timing.compile_time_s / total;
    let sample_pct = 100.0 * timing.sample_time_s / total;

    println!("\nTiming summary:");
    println!(
        "  Compile: {:.3}s ({:.1}%)",
        timing.compile_time_s, compile_pct
    );
    println!("  Sample:  {:.3}s ({:.1}%)", timing.sample_time_s, sample_pct);
    println!("  Total:   {:.3}s", timing.total_time_s);
}

fn open_output(output: Option<&Path>) -> AppResult<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn cmd_export(
    study_path: &Path,
    format: ExportFormat,
    pretty: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let study = cf_project::load_study(study_path)?;
    let response = run_study(&study, &RunOptions::default())?;

    let out = open_output(output)?;
    match format {
        ExportFormat::Csv => CsvRenderer::new(out).render(&response.trajectory)?,
        ExportFormat::Json => JsonRenderer::new(out, pretty).render(&response.trajectory)?,
    }

    if let Some(path) = output {
        eprintln!(
            "✓ Exported {} frames to {}",
            response.trajectory.len(),
            path.display()
        );
    }
    Ok(())
}

fn cmd_series(study_path: &Path, variable: &str, output: Option<&Path>) -> AppResult<()> {
    let variable: Variable = variable.parse()?;
    let study = cf_project::load_study(study_path)?;
    let response = run_study(&study, &RunOptions::default())?;

    let series = extract_series(&response.trajectory, variable);
    write_series_csv(open_output(output)?, variable.name(), &series)?;

    if let Some(path) = output {
        eprintln!("✓ Exported {} points to {}", series.len(), path.display());
    }
    Ok(())
}
