//! Tile Grid
//!
//! Fixed-size block storage indexed by integer column/row. Dimensions never
//! change after construction. Anything outside the grid reads as `Dirt`, so
//! the world edge behaves like a solid wall for every body.

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::terrain::{self, TreeParams};
use crate::game::tile::Tile;

/// Row-major grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create an all-empty grid.
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: vec![Tile::Empty; width as usize * height as usize],
        }
    }

    /// Generate terrain: rows at or below `ground_row` are dirt, everything
    /// above is air, then trees are scattered along the surface.
    pub fn generate(
        width: u32,
        height: u32,
        ground_row: u32,
        tile_size: u32,
        trees: &TreeParams,
        rng: &mut DeterministicRng,
    ) -> Self {
        let mut grid = Self::new(width, height, tile_size);
        terrain::fill_ground(&mut grid, ground_row);
        terrain::decorate_trees(&mut grid, ground_row, rng, trees);
        grid
    }

    /// Width in tiles.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tile edge length in pixels.
    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Tile edge length in pixels, as a float.
    #[inline]
    pub fn tile_px(&self) -> f32 {
        self.tile_size as f32
    }

    /// Row-major tile storage (for rendering).
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Is the tile coordinate inside the grid?
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Tile at (x, y); `Dirt` outside the grid.
    #[inline]
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        match self.index(x, y) {
            Some(i) => self.tiles[i],
            None => Tile::Dirt,
        }
    }

    /// Write a tile. Out-of-bounds writes are ignored and return `false`.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Tile coordinate containing a world pixel (floor division).
    #[inline]
    pub fn pixel_to_tile(&self, px: f32, py: f32) -> (i32, i32) {
        let size = self.tile_px();
        ((px / size).floor() as i32, (py / size).floor() as i32)
    }

    /// Is the tile under this world pixel solid?
    #[inline]
    pub fn is_solid_at_pixel(&self, px: f32, py: f32) -> bool {
        let (tx, ty) = self.pixel_to_tile(px, py);
        self.tile_at(tx, ty).is_solid()
    }

    /// Top-left pixel of a tile.
    #[inline]
    pub fn tile_origin_px(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32 * self.tile_px(), y as f32 * self.tile_px())
    }

    /// Center pixel of a tile.
    #[inline]
    pub fn tile_center_px(&self, x: i32, y: i32) -> Vec2 {
        let half = self.tile_px() / 2.0;
        let origin = self.tile_origin_px(x, y);
        Vec2::new(origin.x + half, origin.y + half)
    }

    /// Count tiles of a kind (debugging/tests).
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Hash grid contents for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.width);
        hasher.update_u32(self.height);
        hasher.update_u32(self.tile_size);
        for tile in &self.tiles {
            hasher.update_u8(*tile as u8);
        }
    }
}
