//! Command-line front end: builds a grid from the given dimensions and blocked cells, then
//! searches it for a route of the requested length.
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use grid_route::io::{parse_cell, read_blocked_cells_file};
use grid_route::solver::{recursive::RecursiveSolver, stack::StackSolver, RouteSolver};
use grid_route::{Coord, Grid, PathSearch, RoutePath, SearchError, DEFAULT_BATCH_SIZE};
use log::{error, warn};

#[derive(Parser, Debug)]
#[command(name = "path_finder")]
#[command(about = "Finds a contiguous route of an exact length through a grid with blocked cells")]
#[command(after_help = "Blocked cells files hold one row,col pair per line; \
                        lines starting with # are comments. Cells are 0-indexed.")]
struct Args {
    /// Number of grid rows
    #[arg(long)]
    rows: u16,

    /// Number of grid columns
    #[arg(long)]
    cols: u16,

    /// Number of cells the route has to visit
    #[arg(long, alias = "pathLength")]
    path_length: u32,

    /// Starting points tried per batch
    #[arg(long, alias = "maxStartingPoints", default_value_t = DEFAULT_BATCH_SIZE)]
    max_starting_points: usize,

    /// Blocked cells, each as {row,col} or row,col
    #[arg(long, alias = "blockedCells", num_args = 1.., value_parser = parse_cell_arg)]
    blocked_cells: Vec<Coord>,

    /// File with one blocked row,col pair per line
    #[arg(long, alias = "blockedCellsFile")]
    blocked_cells_file: Option<PathBuf>,

    /// Print the wall-clock time taken by the search
    #[arg(long, alias = "enableMeasurement")]
    enable_measurement: bool,

    /// Use the recursive solver instead of the explicit-stack one. Only suited to routes of up
    /// to a few thousand cells
    #[arg(long)]
    recursive: bool,

    /// Skip starting points whose connected region is smaller than the route
    #[arg(long)]
    prune_components: bool,

    /// Draw the grid with the route on it
    #[arg(long)]
    show_grid: bool,
}

fn parse_cell_arg(input: &str) -> Result<Coord, String> {
    parse_cell(input).map_err(|e| e.to_string())
}

fn build_grid(args: &Args) -> anyhow::Result<Grid> {
    let mut grid = Grid::new(args.rows, args.cols).context("Invalid grid dimensions")?;
    let mut blocked = args.blocked_cells.clone();
    if let Some(file) = &args.blocked_cells_file {
        let from_file = read_blocked_cells_file(file)
            .with_context(|| format!("Can not read blocked cells from {}", file.display()))?;
        blocked.extend(from_file);
    }
    if !grid.block_cells(&blocked) {
        warn!(
            "Some blocked cells lie outside the {}x{} grid and were ignored",
            args.rows, args.cols
        );
    }
    if args.prune_components {
        grid.update();
    }
    Ok(grid)
}

fn run_search<S: RouteSolver>(
    search: PathSearch<S>,
    grid: &Grid,
    path_length: u32,
) -> Result<(RoutePath, Duration), SearchError> {
    let started = Instant::now();
    let path = search.find_path(grid, path_length)?;
    Ok((path, started.elapsed()))
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if args.max_starting_points == 0 {
        error!("--max-starting-points must be greater than zero");
        return Ok(ExitCode::from(2));
    }

    let grid = build_grid(&args)?;
    let result = if args.recursive {
        let search = PathSearch::with_solver(RecursiveSolver);
        run_search(configure(search, &args), &grid, args.path_length)
    } else {
        let search = PathSearch::with_solver(StackSolver);
        run_search(configure(search, &args), &grid, args.path_length)
    };
    let (path, elapsed) = match result {
        Ok(found) => found,
        Err(e) => {
            error!("Search could not be run: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    if path.is_empty() {
        println!(
            "No route of length {} found in the {}x{} grid",
            args.path_length, args.rows, args.cols
        );
    } else {
        println!("Route: {}", path);
    }
    if args.show_grid {
        println!("{}", grid.render_route(&path));
    }
    if args.enable_measurement {
        println!("=== MEASURE SUMMARY ===");
        println!("Time taken(uS): {}", elapsed.as_micros());
        println!("=======================");
    }
    Ok(if path.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn configure<S: RouteSolver>(search: PathSearch<S>, args: &Args) -> PathSearch<S> {
    search
        .with_batch_size(args.max_starting_points)
        .with_component_pruning(args.prune_components)
}
