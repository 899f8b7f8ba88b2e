//! 2D geometry core: polygon clipping, circle rasterization and the
//! pixel <-> normalized device coordinate mapping.
//!
//! Everything in here is pure. Callers pass every input explicitly and get a
//! fresh value back; nothing reads window state.

mod circle;
mod clip;
mod ndc;
mod polygon;

pub use circle::{dedup_points, rasterize_circle, RasterError, MAX_RADIUS};
pub use clip::{clip_polygon, ClipRect};
pub use ndc::{to_normalized, Viewport};
pub use polygon::Polygon;

use serde::{Deserialize, Serialize};

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Componentwise minimum
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Componentwise maximum
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Approximate equality check for floating point comparison
    #[cfg(test)]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}
