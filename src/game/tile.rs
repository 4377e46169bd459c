//! Tile and Item Kinds
//!
//! Block kinds stored in the grid and the item kinds they turn into when
//! mined. Tile semantics (solidity, what drops) are queried through methods
//! so they stay in one place.

use serde::{Serialize, Deserialize};

/// One grid cell's block kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    /// Air
    #[default]
    Empty = 0,
    /// Ground; also what the world reports outside its bounds
    Dirt = 1,
    /// Tree trunk
    Wood = 2,
    /// Tree canopy, passable
    Leaves = 3,
}

impl Tile {
    /// Does this tile block movement?
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Dirt | Tile::Wood)
    }

    /// Is this an empty cell?
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }

    /// Item produced when this tile is mined.
    pub fn drop_item(self) -> Option<ItemKind> {
        match self {
            Tile::Empty => None,
            Tile::Dirt => Some(ItemKind::Dirt),
            Tile::Wood => Some(ItemKind::Wood),
            Tile::Leaves => Some(ItemKind::Leaves),
        }
    }

    /// Get from raw id.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Tile::Empty),
            1 => Some(Tile::Dirt),
            2 => Some(Tile::Wood),
            3 => Some(Tile::Leaves),
            _ => None,
        }
    }
}

/// Kind of item held in inventory slots and carried by drops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ItemKind {
    /// Dirt block item
    Dirt = 1,
    /// Wood block item
    Wood = 2,
    /// Leaves block item
    Leaves = 3,
}

impl ItemKind {
    /// Tile written to the grid when this item is placed.
    ///
    /// Every modeled item is placeable today; the `Option` keeps the place
    /// path honest if non-block items are added.
    pub fn placed_tile(self) -> Option<Tile> {
        match self {
            ItemKind::Dirt => Some(Tile::Dirt),
            ItemKind::Wood => Some(Tile::Wood),
            ItemKind::Leaves => Some(Tile::Leaves),
        }
    }

    /// Stable lowercase name, as used in config files.
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Dirt => "dirt",
            ItemKind::Wood => "wood",
            ItemKind::Leaves => "leaves",
        }
    }
}
