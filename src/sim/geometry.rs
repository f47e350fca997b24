//! Axis-aligned boxes for sprites, beams and the playfield
//!
//! Screen space: origin at the top-left, +y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// A box with no area never collides with anything
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Strict overlap test: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Shrink by `inset` on every side (negative grows the box)
    ///
    /// An inset larger than half the size yields an empty box.
    pub fn deflate(&self, inset: f32) -> Aabb {
        let d = Vec2::splat(inset);
        Aabb {
            min: self.min + d,
            max: self.max - d,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.min += delta;
        self.max += delta;
    }

    /// True when the box lies completely past any edge of `[0,w]x[0,h]`
    pub fn is_outside(&self, width: f32, height: f32) -> bool {
        self.max.x < 0.0 || self.min.x > width || self.min.y > height || self.max.y < 0.0
    }

    /// Move the box (per axis) so it sits fully inside `[0,w]x[0,h]`
    pub fn clamp_within(&self, width: f32, height: f32) -> Aabb {
        let size = self.size();
        let min = Vec2::new(
            self.min.x.clamp(0.0, (width - size.x).max(0.0)),
            self.min.y.clamp(0.0, (height - size.y).max(0.0)),
        );
        Aabb::from_top_left(min, size)
    }

    /// True when the box is fully within `[0,w]x[0,h]`
    pub fn is_within(&self, width: f32, height: f32) -> bool {
        self.min.x >= 0.0 && self.min.y >= 0.0 && self.max.x <= width && self.max.y <= height
    }
}
