use grid_route::{Coord, Grid, PathSearch};

// In this example a route of 8 cells is found on a grid with shape
//  ____
// |    |
// | ## |
// |  # |
// |    |
//  ____
fn main() {
    let mut grid = Grid::new(4, 4).unwrap();
    grid.block_cells(&[Coord::new(1, 1), Coord::new(1, 2), Coord::new(2, 2)]);
    println!("{}", grid);

    let path = PathSearch::new().find_path(&grid, 8).unwrap();
    if path.is_empty() {
        println!("No route of length 8 exists");
        return;
    }
    println!("A route has been found:");
    println!("{}", path);
    println!("{}", grid.render_route(&path));
}
