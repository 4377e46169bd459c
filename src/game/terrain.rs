//! Terrain Generation
//!
//! Flat ground plus trees scattered along the surface. All randomness comes
//! from the caller's `DeterministicRng`, so a seed reproduces the layout.

use tracing::debug;

use crate::core::rng::DeterministicRng;
use crate::game::grid::TileGrid;
use crate::game::tile::Tile;

/// Tree placement parameters.
#[derive(Clone, Debug)]
pub struct TreeParams {
    /// Chance per scanned column to attempt a tree
    pub chance: f32,
    /// Columns kept clear at each edge of the world
    pub margin: u32,
    /// Shortest trunk, in tiles
    pub min_trunk: i32,
    /// Tallest trunk, in tiles
    pub max_trunk: i32,
    /// Extra columns skipped after a tree is planted
    pub spacing: u32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            chance: 0.06,
            margin: 3,
            min_trunk: 4,
            max_trunk: 6,
            spacing: 3,
        }
    }
}

/// Canopy offsets: a 5x5 square with the corners cut (|dx| + |dy| <= 3).
const CANOPY_HALF: i32 = 2;
const CANOPY_MANHATTAN: i32 = 3;

/// Fill rows at or below `ground_row` with dirt and clear the rest.
pub fn fill_ground(grid: &mut TileGrid, ground_row: u32) {
    for y in 0..grid.height() as i32 {
        let tile = if y as u32 >= ground_row { Tile::Dirt } else { Tile::Empty };
        for x in 0..grid.width() as i32 {
            grid.set_tile(x, y, tile);
        }
    }
}

/// First row from the top holding dirt with air directly above it.
pub fn surface_row(grid: &TileGrid, x: i32) -> Option<i32> {
    (0..grid.height() as i32)
        .find(|&y| grid.tile_at(x, y) == Tile::Dirt && grid.tile_at(x, y - 1) == Tile::Empty)
}

/// Scan columns left to right and plant trees.
///
/// Returns the number of trees planted.
pub fn decorate_trees(
    grid: &mut TileGrid,
    ground_row: u32,
    rng: &mut DeterministicRng,
    params: &TreeParams,
) -> usize {
    let width = grid.width() as i32;
    let last = width - params.margin as i32;
    let mut planted = 0;
    let mut x = params.margin as i32;

    while x < last {
        if rng.next_chance(params.chance) && surface_row(grid, x).is_some() {
            let trunk = rng.next_int_range(params.min_trunk, params.max_trunk);
            plant_tree(grid, x, ground_row as i32, trunk);
            planted += 1;
            x += params.spacing as i32;
        }
        x += 1;
    }

    debug!(planted, "terrain decorated");
    planted
}

/// Write one tree: a trunk up from the ground row and a canopy around its top.
/// Only empty cells are written, so existing terrain is never overwritten.
fn plant_tree(grid: &mut TileGrid, x: i32, ground_row: i32, trunk: i32) {
    let top = (ground_row - trunk).max(1);

    let mut y = ground_row - 1;
    while y >= top {
        place_if_empty(grid, x, y, Tile::Wood);
        y -= 1;
    }

    for dy in -CANOPY_HALF..=CANOPY_HALF {
        for dx in -CANOPY_HALF..=CANOPY_HALF {
            if dx.abs() + dy.abs() <= CANOPY_MANHATTAN {
                place_if_empty(grid, x + dx, top + dy, Tile::Leaves);
            }
        }
    }
}

#[inline]
fn place_if_empty(grid: &mut TileGrid, x: i32, y: i32, tile: Tile) {
    if grid.in_bounds(x, y) && grid.tile_at(x, y).is_empty() {
        grid.set_tile(x, y, tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always() -> TreeParams {
        TreeParams { chance: 1.0, ..TreeParams::default() }
    }

    fn flat(width: u32, height: u32, ground_row: u32) -> TileGrid {
        let mut grid = TileGrid::new(width, height, 32);
        fill_ground(&mut grid, ground_row);
        grid
    }

    fn trunk_columns(grid: &TileGrid, ground_row: i32) -> Vec<i32> {
        (0..grid.width() as i32)
            .filter(|&x| grid.tile_at(x, ground_row - 1) == Tile::Wood)
            .collect()
    }

    #[test]
    fn test_surface_row() {
        let grid = flat(8, 10, 6);
        assert_eq!(surface_row(&grid, 3), Some(6));

        // Solid column all the way up has no exposed surface
        let full = flat(8, 10, 0);
        assert_eq!(surface_row(&full, 3), None);
    }

    #[test]
    fn test_forced_trees_respect_margin_and_spacing() {
        let mut grid = flat(30, 20, 12);
        let mut rng = DeterministicRng::new(1);

        let planted = decorate_trees(&mut grid, 12, &mut rng, &always());
        let columns = trunk_columns(&grid, 12);

        // Columns 3, 7, 11, ... while below width - 3
        assert_eq!(columns, vec![3, 7, 11, 15, 19, 23]);
        assert_eq!(planted, columns.len());
    }

    #[test]
    fn test_tree_shape() {
        let mut grid = flat(30, 20, 12);
        let mut rng = DeterministicRng::new(2);
        decorate_trees(&mut grid, 12, &mut rng, &always());

        let x = 3;
        // Trunk runs from the ground up to the topmost wood cell
        let top = (0..12).find(|&y| grid.tile_at(x, y) == Tile::Wood).unwrap();
        let trunk = 12 - top;
        assert!((4..=6).contains(&trunk), "trunk height {}", trunk);
        for y in top..12 {
            assert_eq!(grid.tile_at(x, y), Tile::Wood);
        }

        // Canopy diamond, corners excluded
        assert_eq!(grid.tile_at(x - 2, top - 1), Tile::Leaves);
        assert_eq!(grid.tile_at(x + 1, top - 2), Tile::Leaves);
        assert_eq!(grid.tile_at(x - 2, top - 2), Tile::Empty);
        assert_eq!(grid.tile_at(x, top - 3), Tile::Empty);
    }

    #[test]
    fn test_trees_never_overwrite_ground() {
        let mut grid = flat(30, 20, 12);
        let dirt_before = grid.count(Tile::Dirt);
        decorate_trees(&mut grid, 12, &mut DeterministicRng::new(3), &always());
        assert_eq!(grid.count(Tile::Dirt), dirt_before);
    }

    #[test]
    fn test_canopy_top_clamped_to_row_one() {
        // Ground at row 3: every trunk is taller than the space above it
        let mut grid = flat(12, 8, 3);
        decorate_trees(&mut grid, 3, &mut DeterministicRng::new(4), &always());

        assert_eq!(grid.tile_at(3, 2), Tile::Wood);
        assert_eq!(grid.tile_at(3, 1), Tile::Wood);
        assert_eq!(grid.tile_at(3, 0), Tile::Leaves);
    }

    #[test]
    fn test_zero_chance_plants_nothing() {
        let mut grid = flat(30, 20, 12);
        let before = grid.clone();
        let params = TreeParams { chance: 0.0, ..TreeParams::default() };

        assert_eq!(decorate_trees(&mut grid, 12, &mut DeterministicRng::new(5), &params), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let mut a = flat(100, 50, 36);
        let mut b = flat(100, 50, 36);
        let params = TreeParams { chance: 0.3, ..TreeParams::default() };

        decorate_trees(&mut a, 36, &mut DeterministicRng::new(77), &params);
        decorate_trees(&mut b, 36, &mut DeterministicRng::new(77), &params);
        assert_eq!(a, b);
    }
}
