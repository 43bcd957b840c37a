mod config;
mod error;
mod export;
mod lattice;
mod radius;
mod render;
mod rng;
mod settings;
mod simulation;
mod spawner;
mod summary;
mod walker;

use clap::Parser;
use config::RunConfig;
use error::DlaError;
use log::{debug, info};
use rng::{SeedStreams, WalkerRng};
use settings::{ConsoleView, ExecutionMode};
use simulation::DlaSimulation;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use summary::RunSummary;

#[derive(Parser, Debug)]
#[command(name = "dla-crystal", version)]
#[command(about = "Grow a diffusion-limited aggregation crystal and write it as a CSV grid")]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Side length of the square lattice (odd)
    grid_size: String,

    /// Number of particles to release
    num_particles: String,

    // === Execution ===
    /// Run walkers one at a time or on a worker pool
    #[arg(long, value_enum)]
    mode: Option<ExecutionMode>,

    /// Worker threads for parallel mode (default: hardware parallelism)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Generator seed; sequential runs with the same seed are identical
    #[arg(long)]
    seed: Option<u64>,

    // === Output ===
    /// Directory receiving <mode>_result.txt
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Print the finished crystal to stdout
    #[arg(long, value_enum)]
    print: Option<ConsoleView>,

    /// Also export the crystal as a grayscale PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write a JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,

    // === Configuration ===
    /// JSON config file (default: <config dir>/dla-crystal/config.json if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the effective configuration to a JSON file
    #[arg(long = "save-config")]
    save_config: Option<PathBuf>,
}

/// The two positional arguments after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridParams {
    grid_size: usize,
    num_particles: usize,
}

fn is_unsigned_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_grid_params(grid_size: &str, num_particles: &str) -> Result<GridParams, DlaError> {
    if !is_unsigned_integer(grid_size) || !is_unsigned_integer(num_particles) {
        return Err(DlaError::BadArgumentFormat);
    }

    let grid_size: i32 = grid_size.parse().map_err(|_| DlaError::BadArgumentFormat)?;
    let num_particles: usize = num_particles
        .parse()
        .map_err(|_| DlaError::BadArgumentFormat)?;

    if grid_size % 2 == 0 {
        return Err(DlaError::EvenGridSize);
    }

    Ok(GridParams {
        grid_size: grid_size as usize,
        num_particles,
    })
}

/// Config file values overridden by any flag given on the command line
fn resolve_config(args: &Args) -> Result<RunConfig, DlaError> {
    let mut config = RunConfig::load(args.config.as_deref())?;

    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if args.print.is_some() {
        config.console = args.print;
    }
    if args.png.is_some() {
        config.png = args.png.clone();
    }
    if args.summary.is_some() {
        config.summary = args.summary.clone();
    }

    Ok(config)
}

fn run(args: Args) -> Result<RunSummary, DlaError> {
    // Nothing is read or written before the positionals are known to be valid
    let params = parse_grid_params(&args.grid_size, &args.num_particles)?;
    let config = resolve_config(&args)?;

    if let Some(path) = &args.save_config {
        config.save_to_file(path)?;
        info!("Saved configuration to {}", path.display());
    }

    let seed = config.seed.unwrap_or_else(rng::entropy_seed);
    let threads = match config.mode {
        ExecutionMode::Sequential => 1,
        ExecutionMode::Parallel => config.worker_count(),
    };

    info!(
        "Growing crystal on a {n}x{n} lattice with up to {} particles ({}, {} thread(s))",
        params.num_particles,
        config.mode.name(),
        threads,
        n = params.grid_size,
    );

    let simulation = DlaSimulation::new(params.grid_size);
    let start = Instant::now();
    let tally = match config.mode {
        ExecutionMode::Sequential => {
            simulation.run_sequential(params.num_particles, &mut WalkerRng::seeded(seed))
        }
        ExecutionMode::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            simulation.run_parallel(params.num_particles, &pool, &SeedStreams::new(seed))
        }
    };
    let elapsed = start.elapsed();

    if simulation.is_saturated() && tally.released < params.num_particles {
        info!(
            "Crystal radius {} reached the spawn limit {}; stopped after {} of {} particles",
            simulation.radius(),
            simulation.radius_limit(),
            tally.released,
            params.num_particles
        );
    }
    info!("{:.3} s", elapsed.as_secs_f64());

    let lattice = simulation.lattice();
    let output = config.result_path();
    export::save_csv(lattice, &output)?;
    info!("Wrote {}", output.display());

    if let Some(view) = config.console {
        print!("{}", render::render(lattice, view));
    }
    if let Some(path) = &config.png {
        export::save_png(lattice, path)?;
        info!("Wrote {}", path.display());
    }

    let mut summary = RunSummary {
        grid_size: params.grid_size,
        num_particles: params.num_particles,
        mode: config.mode,
        threads,
        seed,
        released: 0,
        stuck: 0,
        lost: 0,
        total_steps: 0,
        final_radius: simulation.radius(),
        crystal_radius: lattice.crystal_radius(),
        stuck_cells: lattice.count_stuck(),
        saturated: simulation.is_saturated(),
        elapsed_secs: elapsed.as_secs_f64(),
        output,
    };
    summary.record_tally(tally);

    debug!(
        "released {} (stuck {}, lost {}), {} walk steps, {:.1} steps/particle, {} stuck cells",
        summary.released,
        summary.stuck,
        summary.lost,
        summary.total_steps,
        summary.mean_steps(),
        summary.stuck_cells
    );

    if let Some(path) = &config.summary {
        export::save_summary(&summary, path)?;
        info!("Wrote {}", path.display());
    }

    Ok(summary)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version are not failures
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprint!("{}", DlaError::Usage(err.render().to_string()));
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
