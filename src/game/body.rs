//! Moving Body
//!
//! The axis-aligned box shared by the player and drops. Position is the
//! top-left corner in world pixels; y grows downwards.

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;
use crate::core::vec2::Vec2;

/// Axis-aligned moving box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    /// Box width in pixels
    pub width: f32,
    /// Box height in pixels
    pub height: f32,
}

impl Body {
    /// Create a body at rest.
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
        }
    }

    /// Create a body of the given size centered on a point.
    pub fn centered_at(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(center.x - width / 2.0, center.y - height / 2.0), width, height)
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.position.x + self.width / 2.0, self.position.y + self.height / 2.0)
    }

    /// The four pixels sampled for collision: the box's corner pixels,
    /// inclusive of the last row/column it covers.
    #[inline]
    pub fn corners(&self) -> [Vec2; 4] {
        let left = self.position.x;
        let top = self.position.y;
        let right = left + self.width - 1.0;
        let bottom = top + self.height - 1.0;
        [
            Vec2::new(left, top),
            Vec2::new(right, top),
            Vec2::new(left, bottom),
            Vec2::new(right, bottom),
        ]
    }

    /// Does the box overlap the half-open rectangle [x, x+w) x [y, y+h)?
    /// Touching edges do not count.
    #[inline]
    pub fn intersects_rect(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        !(x + w <= self.position.x
            || x >= self.position.x + self.width
            || y + h <= self.position.y
            || y >= self.position.y + self.height)
    }

    /// Hash this body for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_f32(self.width);
        hasher.update_f32(self.height);
    }
}
