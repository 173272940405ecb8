use grid_route::io::{parse_blocked_cells, read_blocked_cells_file};
use grid_route::{Grid, PathSearch};

const BLOCKED: &str = "\
# Blocked cells coordinates for pathfinding tests
# Format: row,col (0-indexed)
1,1
1,2
{1,3}
3,0
3,1
3,2
";

// Reads blocked cells from the file given as the first argument, or from the inline list above,
// and looks for a route covering half of the open cells.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let blocked = match std::env::args().nth(1) {
        Some(file) => read_blocked_cells_file(file)?,
        None => parse_blocked_cells(BLOCKED.as_bytes())?,
    };

    let mut grid = Grid::new(5, 5)?;
    if !grid.block_cells(&blocked) {
        println!("Some blocked cells lie outside the 5x5 grid and were ignored");
    }
    grid.update();
    println!("{}", grid);

    let target = (grid.unblocked_count() / 2).max(1);
    let path = PathSearch::new()
        .with_component_pruning(true)
        .find_path(&grid, target)?;
    if path.is_empty() {
        println!("No route of length {} exists", target);
    } else {
        println!("Route of length {}: {}", target, path);
        println!("{}", grid.render_route(&path));
    }
    Ok(())
}
