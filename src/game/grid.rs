//! Grid geometry helpers
//!
//! Pure functions mapping the pixel-sized board onto the discrete cell grid.
//! Every position produced here is aligned to a multiple of the cell size.

use rand::Rng;

use super::state::Position;

/// Number of cells along the horizontal axis
pub fn cols(width: i32, cell_size: i32) -> i32 {
    width / cell_size
}

/// Number of cells along the vertical axis
pub fn rows(height: i32, cell_size: i32) -> i32 {
    height / cell_size
}

/// Board center, snapped onto the cell grid
pub fn center(width: i32, height: i32, cell_size: i32) -> Position {
    Position::new(
        cols(width, cell_size) / 2 * cell_size,
        rows(height, cell_size) / 2 * cell_size,
    )
}

/// Uniformly random cell-aligned position on the board
pub fn random_cell<R: Rng>(rng: &mut R, width: i32, height: i32, cell_size: i32) -> Position {
    let x = rng.gen_range(0..=(width - cell_size) / cell_size) * cell_size;
    let y = rng.gen_range(0..=(height - cell_size) / cell_size) * cell_size;
    Position::new(x, y)
}

/// Whether a position lies inside `[0, dimension - cell_size]` on both axes
pub fn in_bounds(pos: Position, width: i32, height: i32, cell_size: i32) -> bool {
    pos.x >= 0 && pos.x <= width - cell_size && pos.y >= 0 && pos.y <= height - cell_size
}
