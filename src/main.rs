use clap::{Parser, Subcommand};
use nqueens::search::known_solution_count;
use nqueens::search::parallel::partition_columns;
use nqueens::{Aggregator, ParallelConfig, SearchHandle, start_with_sink};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "nqueens")]
#[command(about = "nqueens - parallel N-Queens enumerator")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate every solution for an N×N board
    Solve {
        /// Board size
        n: usize,
        /// Number of worker threads (defaults to the number of CPUs)
        #[arg(long, short = 'j')]
        cores: Option<usize>,
        /// Pause after every placement and removal, in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,
        /// Stop the search after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Print every solution found
        #[arg(long)]
        print: bool,
        /// Print worker progress at this interval, in milliseconds
        #[arg(long)]
        progress_ms: Option<u64>,
        /// Check every solution and the total against the known count
        #[arg(long)]
        verify: bool,
    },
    /// Show how the first-row columns are split between workers
    Partition {
        /// Board size
        n: usize,
        /// Number of worker threads (defaults to the number of CPUs)
        #[arg(long, short = 'j')]
        cores: Option<usize>,
    },
}

/// Options for the solve command
struct SolveOptions {
    print: bool,
    progress: Option<Duration>,
    verify: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(n: usize, cores: Option<usize>) -> ParallelConfig {
    let config = ParallelConfig::new(n);
    match cores {
        Some(cores) => config.with_workers(cores),
        None => config,
    }
}

// --- Solve ---

fn run_solve(
    config: &ParallelConfig,
    options: &SolveOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut handle = start_with_sink(config, Arc::new(Aggregator::new()))?;

    println!("Solving {}-queens", handle.board_size());
    println!("  Workers: {}", handle.worker_count());
    if !config.step_delay.is_zero() {
        println!("  Step delay: {:?}", config.step_delay);
    }
    if let Some(timeout) = config.timeout {
        println!("  Timeout: {:?}", timeout);
    }

    let report = match options.progress {
        Some(interval) => {
            watch_progress(&handle, interval, config.timeout);
            handle.wait_for_completion()
        }
        None => handle.wait(),
    };

    let aggregator = Arc::clone(handle.sink());
    if options.print {
        for solution in aggregator.all_solutions() {
            println!(
                "\nSolution (worker {}): {:?}",
                solution.worker_id,
                solution.columns()
            );
            print!("{}", solution.board);
        }
    }

    println!();
    print!("{}", report);
    println!("\nSearch Statistics:");
    print!("{}", report.total_statistics().format_summary());

    if options.verify {
        verify_results(handle.board_size(), &aggregator, report.was_cancelled())?;
        println!("Verification passed");
    }
    Ok(())
}

/// Print one progress line per worker until the search finishes, stopping
/// it once `timeout` has passed.
fn watch_progress(handle: &SearchHandle, interval: Duration, timeout: Option<Duration>) {
    let deadline = timeout.map(|t| Instant::now() + t);
    while handle.is_running() {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            handle.request_stop();
        }
        std::thread::sleep(interval);

        for worker_id in 0..handle.worker_count() {
            let state = handle
                .worker_state(worker_id)
                .map_or_else(|| "unknown".to_string(), |s| s.to_string());
            let solutions = handle.poll_solutions(worker_id).len();
            match handle.poll_state(worker_id) {
                Some(step) => println!(
                    "  worker {}: {}, {} solutions, last {} at ({}, {})",
                    worker_id, state, solutions, step.action, step.row, step.col
                ),
                None => println!("  worker {}: {}, {} solutions", worker_id, state, solutions),
            }
        }
        println!("  total: {} solutions", handle.total_solutions());
    }
}

fn verify_results(n: usize, aggregator: &Aggregator, cancelled: bool) -> Result<(), String> {
    let solutions = aggregator.all_solutions();
    if let Some(bad) = solutions.iter().find(|s| !s.board.is_valid_solution()) {
        return Err(format!(
            "invalid solution from worker {}:\n{}",
            bad.worker_id, bad.board
        ));
    }

    if cancelled {
        println!("Search was cancelled, skipping count check");
        return Ok(());
    }
    match known_solution_count(n) {
        Some(expected) if expected != solutions.len() as u64 => Err(format!(
            "expected {} solutions for n={}, found {}",
            expected,
            n,
            solutions.len()
        )),
        Some(_) => Ok(()),
        None => {
            println!("No known count for n={}, skipping count check", n);
            Ok(())
        }
    }
}

// --- Partition ---

fn run_partition(config: &ParallelConfig) -> Result<(), Box<dyn std::error::Error>> {
    let num_workers = config.validate()?;
    println!(
        "{} columns across {} workers:",
        config.board_size, num_workers
    );
    for (worker_id, range) in partition_columns(config.board_size, num_workers)
        .into_iter()
        .enumerate()
    {
        println!(
            "  worker {}: columns {}..{} ({} columns)",
            worker_id,
            range.start,
            range.end,
            range.len()
        );
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Solve {
            n,
            cores,
            delay_ms,
            timeout,
            print,
            progress_ms,
            verify,
        } => {
            let config = build_config(n, cores)
                .with_step_delay(Duration::from_millis(delay_ms))
                .with_timeout_option(timeout.map(Duration::from_secs));
            let options = SolveOptions {
                print,
                progress: progress_ms.map(Duration::from_millis),
                verify,
            };
            if let Err(e) = run_solve(&config, &options) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Partition { n, cores } => {
            if let Err(e) = run_partition(&build_config(n, cores)) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
