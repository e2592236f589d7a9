use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use pathviz_core::Grid;
use pathviz_lib::config::{Config, clamp_size};
use pathviz_lib::{AppError, Visualizer, solve, term};
use pathviz_search::{Movement, StrategyKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pathviz", version)]
#[command(about = "Step-by-step A*, Dijkstra, BFS and Theta* on a grid")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Edit a grid and watch searches run in the terminal
    Tui(TuiArgs),
    /// Solve a map file and print the marked map
    Solve(SolveArgs),
}

#[derive(Args)]
struct TuiArgs {
    /// Grid width, clamped to 2..=128
    #[arg(long, default_value_t = 15)]
    width: i32,
    /// Grid height, clamped to 2..=128
    #[arg(long, default_value_t = 15)]
    height: i32,
    /// Load the grid from a map file (`.` open, `#` wall, `S` start, `E` end)
    #[arg(long)]
    map: Option<PathBuf>,
    #[arg(long, default_value_t = StrategyKind::AStar)]
    algorithm: StrategyKind,
    #[arg(long, default_value_t = Movement::FourWay)]
    movement: Movement,
    /// Milliseconds between animation steps
    #[arg(long, default_value_t = 5)]
    interval_ms: u64,
    /// Seed for the random wall scatterer
    #[arg(long)]
    seed: Option<u64>,
    /// Where diagnostics go while the terminal is in use
    #[arg(long, default_value = "pathviz.log")]
    log_file: PathBuf,
}

#[derive(Args)]
struct SolveArgs {
    #[arg(long)]
    map: PathBuf,
    #[arg(long, default_value_t = StrategyKind::AStar)]
    algorithm: StrategyKind,
    #[arg(long, default_value_t = Movement::FourWay)]
    movement: Movement,
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Tui(args) => run_tui(args)?,
        Command::Solve(args) => run_solve(args)?,
    }
    Ok(())
}

fn run_tui(args: TuiArgs) -> Result<(), AppError> {
    let file = File::create(&args.log_file).map_err(AppError::Terminal)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    let config = Config {
        width: clamp_size(args.width),
        height: clamp_size(args.height),
        map: args.map,
        algorithm: args.algorithm,
        movement: args.movement,
        interval: Duration::from_millis(args.interval_ms),
        seed: args.seed,
        ..Config::default()
    };
    log::info!(
        "starting visualizer: {}x{}, {} with {} moves",
        config.width,
        config.height,
        config.algorithm,
        config.movement
    );
    let mut model = Visualizer::new(&config)?;
    term::run(&mut model, config.interval)
}

fn run_solve(args: SolveArgs) -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let text = std::fs::read_to_string(&args.map).map_err(|source| AppError::ReadMap {
        path: args.map.clone(),
        source,
    })?;
    let grid = Grid::parse(&text)?;
    let report = solve::solve_grid(grid, args.algorithm, args.movement)?;
    println!("{report}");
    Ok(())
}
