//! Collision Resolution
//!
//! Axis-separated box-vs-grid movement shared by every body. Each axis is
//! integrated and pushed out on its own, one pixel at a time, which avoids
//! ambiguous corner cases. The push-out is bounded by one tile: config
//! validation keeps every speed below a tile, so the bound is never the thing
//! that stops the loop for a body that started the frame clear.

use crate::game::body::Body;
use crate::game::grid::TileGrid;

/// Movement axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal
    X,
    /// Vertical
    Y,
}

/// What happened on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOutcome {
    /// Moved without touching anything
    Free,
    /// Hit a solid tile while moving toward -axis (left / up)
    HitNegative,
    /// Hit a solid tile while moving toward +axis (right / down)
    HitPositive,
}

impl AxisOutcome {
    /// Was movement blocked?
    #[inline]
    pub fn hit(self) -> bool {
        self != AxisOutcome::Free
    }
}

/// Result of a full two-axis move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveResult {
    /// Horizontal outcome
    pub x: AxisOutcome,
    /// Vertical outcome
    pub y: AxisOutcome,
}

impl MoveResult {
    /// Landed on something this frame (downward correction).
    #[inline]
    pub fn grounded(&self) -> bool {
        self.y == AxisOutcome::HitPositive
    }
}

/// Does any corner of the body sit in a solid tile?
#[inline]
pub fn collides(grid: &TileGrid, body: &Body) -> bool {
    body.corners()
        .iter()
        .any(|c| grid.is_solid_at_pixel(c.x, c.y))
}

/// Integrate one axis and push the body back out of solid tiles.
///
/// On a hit the velocity component is zeroed. A zero velocity never enters
/// the correction loop, so a body resting in place cannot spin here.
pub fn resolve_axis(grid: &TileGrid, body: &mut Body, axis: Axis) -> AxisOutcome {
    let v = match axis {
        Axis::X => body.velocity.x,
        Axis::Y => body.velocity.y,
    };
    if v == 0.0 {
        return AxisOutcome::Free;
    }

    match axis {
        Axis::X => body.position.x += v,
        Axis::Y => body.position.y += v,
    }

    if !collides(grid, body) {
        return AxisOutcome::Free;
    }

    let sign = v.signum();
    let max_steps = grid.tile_size();
    let mut steps = 0;
    while collides(grid, body) && steps < max_steps {
        match axis {
            Axis::X => body.position.x -= sign,
            Axis::Y => body.position.y -= sign,
        }
        steps += 1;
    }

    #[cfg(feature = "debug-tracing")]
    if collides(grid, body) {
        tracing::trace!(?axis, position = %body.position, "push-out bound reached while embedded");
    }

    match axis {
        Axis::X => body.velocity.x = 0.0,
        Axis::Y => body.velocity.y = 0.0,
    }

    if sign > 0.0 {
        AxisOutcome::HitPositive
    } else {
        AxisOutcome::HitNegative
    }
}

/// Move a body one frame: X first, then Y.
pub fn move_and_collide(grid: &TileGrid, body: &mut Body) -> MoveResult {
    let x = resolve_axis(grid, body, Axis::X);
    let y = resolve_axis(grid, body, Axis::Y);
    MoveResult { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::tile::Tile;

    const T: f32 = 32.0;

    fn open_grid() -> TileGrid {
        TileGrid::new(10, 10, 32)
    }

    fn body_at(tx: f32, ty: f32, vx: f32, vy: f32) -> Body {
        let mut body = Body::new(Vec2::new(tx * T, ty * T), T, T);
        body.velocity = Vec2::new(vx, vy);
        body
    }

    #[test]
    fn test_free_move() {
        let grid = open_grid();
        let mut body = body_at(4.0, 4.0, 3.0, -2.5);

        let result = move_and_collide(&grid, &mut body);

        assert_eq!(result.x, AxisOutcome::Free);
        assert_eq!(result.y, AxisOutcome::Free);
        assert!(!result.grounded());
        assert_eq!(body.position, Vec2::new(131.0, 125.5));
        assert_eq!(body.velocity, Vec2::new(3.0, -2.5));
    }

    #[test]
    fn test_hit_wall_right() {
        let mut grid = open_grid();
        grid.set_tile(5, 4, Tile::Dirt);
        // Flush against the wall, moving into it
        let mut body = body_at(4.0, 4.0, 5.0, 0.0);

        let result = move_and_collide(&grid, &mut body);

        assert_eq!(result.x, AxisOutcome::HitPositive);
        assert_eq!(body.velocity.x, 0.0);
        assert_eq!(body.position.x, 4.0 * T);
        assert!(!collides(&grid, &body));
    }

    #[test]
    fn test_hit_wall_left_fractional() {
        let mut grid = open_grid();
        grid.set_tile(3, 4, Tile::Dirt);
        let mut body = body_at(4.0, 4.0, 0.0, 0.0);
        body.position.x += 2.25;
        body.velocity.x = -3.5;

        move_and_collide(&grid, &mut body);

        assert_eq!(body.velocity.x, 0.0);
        assert!(!collides(&grid, &body));
        assert!(body.position.x >= 4.0 * T && body.position.x < 4.0 * T + 1.0);
    }

    #[test]
    fn test_landing_sets_grounded() {
        let mut grid = open_grid();
        grid.set_tile(4, 5, Tile::Dirt);
        let mut body = body_at(4.0, 4.0, 0.0, 7.0);
        body.position.y -= 3.0;

        let result = move_and_collide(&grid, &mut body);

        assert!(result.grounded());
        assert_eq!(body.velocity.y, 0.0);
        assert!(!collides(&grid, &body));
        // Bottom pixel row ends just above the dirt
        assert!(body.position.y + T - 1.0 < 5.0 * T);
    }

    #[test]
    fn test_ceiling_is_not_grounded() {
        let mut grid = open_grid();
        grid.set_tile(4, 3, Tile::Dirt);
        let mut body = body_at(4.0, 4.0, 0.0, -6.0);

        let result = move_and_collide(&grid, &mut body);

        assert_eq!(result.y, AxisOutcome::HitNegative);
        assert!(!result.grounded());
        assert_eq!(body.position.y, 4.0 * T);
    }

    #[test]
    fn test_zero_velocity_does_not_move() {
        let mut grid = open_grid();
        grid.set_tile(5, 4, Tile::Dirt);
        let mut body = body_at(4.0, 4.0, 0.0, 0.0);
        let before = body;

        let result = move_and_collide(&grid, &mut body);

        assert_eq!(result.x, AxisOutcome::Free);
        assert_eq!(result.y, AxisOutcome::Free);
        assert_eq!(body, before);
    }

    #[test]
    fn test_embedded_body_with_zero_velocity_is_left_alone() {
        let mut grid = open_grid();
        grid.set_tile(4, 4, Tile::Dirt);
        let mut body = body_at(4.0, 4.0, 0.0, 0.0);

        let result = move_and_collide(&grid, &mut body);

        assert!(!result.x.hit());
        assert_eq!(body.position, Vec2::new(4.0 * T, 4.0 * T));
    }

    #[test]
    fn test_world_edge_is_a_wall() {
        let grid = open_grid();
        let mut body = body_at(0.0, 4.0, -4.0, 0.0);

        let result = move_and_collide(&grid, &mut body);

        assert_eq!(result.x, AxisOutcome::HitNegative);
        assert_eq!(body.position.x, 0.0);
    }

    #[test]
    fn test_leaves_do_not_block() {
        let mut grid = open_grid();
        grid.set_tile(5, 4, Tile::Leaves);
        let mut body = body_at(4.0, 4.0, 5.0, 0.0);

        let result = move_and_collide(&grid, &mut body);

        assert_eq!(result.x, AxisOutcome::Free);
        assert_eq!(body.position.x, 4.0 * T + 5.0);
    }
}
