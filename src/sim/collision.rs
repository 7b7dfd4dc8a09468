//! Axis-aligned collision detection
//!
//! Everything in the runner is a box: y grows downward and every rectangle
//! is anchored at its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Separating-axis overlap test with strict inequalities.
///
/// Rectangles that only share an edge do not collide.
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_identical() {
        let a = Rect::new(80.0, 220.0, 40.0, 40.0);
        assert!(aabb_overlap(&a, &a));
    }

    #[test]
    fn test_overlap_partial() {
        let player = Rect::new(80.0, 220.0, 40.0, 40.0);
        let obstacle = Rect::new(110.0, 230.0, 30.0, 30.0);
        assert!(aabb_overlap(&player, &obstacle));
        assert!(aabb_overlap(&obstacle, &player));
    }

    #[test]
    fn test_edge_touch_is_not_collision() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Right edge of a == left edge of b
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &b));
        // Bottom edge of a == top edge of c
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &c));
        // Corner touch
        let d = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!aabb_overlap(&a, &d));
    }

    #[test]
    fn test_player_above_obstacle() {
        // Player cleared the obstacle vertically
        let player = Rect::new(80.0, 150.0, 40.0, 40.0);
        let obstacle = Rect::new(90.0, 200.0, 30.0, 60.0);
        assert!(!aabb_overlap(&player, &obstacle));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(aabb_overlap(&a, &b), aabb_overlap(&b, &a));
        }

        #[test]
        fn prop_adjacent_never_collide(
            x in -500i32..500, y in -500i32..500, w in 1i32..100, h in 1i32..100, bw in 1i32..100,
        ) {
            // Integer-valued coordinates keep x + w exact in f32
            let a = Rect::new(x as f32, y as f32, w as f32, h as f32);
            let b = Rect::new((x + w) as f32, y as f32, bw as f32, h as f32);
            prop_assert!(!aabb_overlap(&a, &b));
        }
    }
}
