//! Axis-aligned rectangle geometry and velocity integration
//!
//! Screen-space convention: origin top-left, y grows downward. A rectangle is
//! its top-left corner plus size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Open horizontal overlap only (used for platform support)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}

/// Advance a position by one tick of velocity
#[inline]
pub fn integrate(pos: &mut Vec2, vel: Vec2) {
    *pos += vel;
}

/// Apply one tick of downward acceleration
#[inline]
pub fn apply_gravity(vel: &mut Vec2, gravity: f32) {
    vel.y += gravity;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_edge_touch_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_zero_size_never_overlaps_outside() {
        let goal = Rect::new(-200.0, -200.0, 0.0, 0.0);
        let field = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert!(!goal.overlaps(&field));
    }

    #[test]
    fn test_integrate_and_gravity() {
        let mut pos = Vec2::new(1.0, 2.0);
        let mut vel = Vec2::new(3.0, 0.0);
        apply_gravity(&mut vel, 0.5);
        integrate(&mut pos, vel);
        assert_eq!(vel, Vec2::new(3.0, 0.5));
        assert_eq!(pos, Vec2::new(4.0, 2.5));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(600.0, 350.0, 180.0, 180.0);
        assert_eq!(r.center(), Vec2::new(690.0, 440.0));
    }
}
