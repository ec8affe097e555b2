/// Axis-aligned bounds of the object being baked
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAlignedBounds {
    pub center: Vec3,
    /// Half-sizes, never negative.
    pub extents: Vec3,
}

impl AxisAlignedBounds {
    /// Create bounds from a centre and half-sizes; negative extents are folded to positive
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            extents: extents.abs(),
        }
    }

    /// Zero-size box at a point, used when an object has nothing to render
    pub fn point(origin: Vec3) -> Self {
        Self::new(origin, Vec3::ZERO)
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let lo = min.min(max);
        let hi = min.max(max);
        Self::new((lo + hi) * 0.5, (hi - lo) * 0.5)
    }

    /// Union of every renderable part. An object without parts collapses to
    /// a zero-size box at its origin.
    pub fn from_parts(origin: Vec3, parts: &[AxisAlignedBounds]) -> Self {
        match parts.split_first() {
            Some((first, rest)) => rest.iter().fold(*first, |mut acc, part| {
                acc.encapsulate(part);
                acc
            }),
            None => Self::point(origin),
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Full world space dimensions
    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }

    /// Grow to enclose another box
    pub fn encapsulate(&mut self, other: &AxisAlignedBounds) {
        *self = Self::from_min_max(self.min().min(other.min()), self.max().max(other.max()));
    }

    /// The 8 corners, ordered by sign of (x, y, z) with z varying fastest.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        let mut i = 0;
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    corners[i] = self.center + self.extents * Vec3::new(sx, sy, sz);
                    i += 1;
                }
            }
        }
        corners
    }

    pub fn is_degenerate(&self) -> bool {
        self.extents.cmple(Vec3::ZERO).any()
    }
}
