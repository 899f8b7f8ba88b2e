//! Sutherland-Hodgman polygon clipping against an axis-aligned rectangle.
//!
//! The polygon is clipped against one half-plane at a time, in the fixed
//! order left, right, bottom, top, feeding each result into the next pass.
//! Non-convex input can come back as a non-simple loop (overlapping edges
//! along the rectangle border); that is how the per-edge method behaves.

use super::{Point, Polygon};
use serde::{Deserialize, Serialize};

/// Axis-aligned clip rectangle. `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub min: Point,
    pub max: Point,
}

impl ClipRect {
    /// Build from already-normalized bounds. Not validated.
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Build from two arbitrary opposite corners (any click order)
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Corners in loop order: (min.x, min.y), (max.x, min.y), max, (min.x, max.y)
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }
}

/// One of the four half-planes bounding a [`ClipRect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Left,
    Right,
    Bottom,
    Top,
}

impl Boundary {
    /// Clipping order
    pub const ALL: [Boundary; 4] = [
        Boundary::Left,
        Boundary::Right,
        Boundary::Bottom,
        Boundary::Top,
    ];

    /// Points on the boundary line count as inside.
    #[inline]
    pub fn inside(self, p: Point, rect: &ClipRect) -> bool {
        match self {
            Boundary::Left => p.x >= rect.min.x,
            Boundary::Right => p.x <= rect.max.x,
            Boundary::Bottom => p.y >= rect.min.y,
            Boundary::Top => p.y <= rect.max.y,
        }
    }

    /// Where segment `s -> e` crosses this boundary line.
    ///
    /// Returns `None` when the segment has no extent along the solved axis
    /// (it runs parallel to the boundary), so no NaN or infinity escapes.
    pub fn intersect(self, s: Point, e: Point, rect: &ClipRect) -> Option<Point> {
        let dx = e.x - s.x;
        let dy = e.y - s.y;

        match self {
            Boundary::Left | Boundary::Right => {
                let bx = if self == Boundary::Left {
                    rect.min.x
                } else {
                    rect.max.x
                };
                let t = crossing(bx - s.x, dx)?;
                Some(Point::new(bx, s.y + dy * t))
            },
            Boundary::Bottom | Boundary::Top => {
                let by = if self == Boundary::Bottom {
                    rect.min.y
                } else {
                    rect.max.y
                };
                let t = crossing(by - s.y, dy)?;
                Some(Point::new(s.x + dx * t, by))
            },
        }
    }
}

/// Interpolation parameter along an edge, or `None` for a zero-length axis
#[inline]
fn crossing(num: f32, delta: f32) -> Option<f32> {
    if delta == 0.0 {
        return None;
    }
    let t = num / delta;
    if t.is_finite() {
        // Rounding can push t a hair outside the edge
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Clip `input` against a single half-plane
fn clip_against(input: &[Point], boundary: Boundary, rect: &ClipRect) -> Vec<Point> {
    let mut output = Vec::with_capacity(input.len() + 2);
    let Some(&last) = input.last() else {
        return output;
    };

    let mut s = last;
    for &e in input {
        let e_in = boundary.inside(e, rect);
        let s_in = boundary.inside(s, rect);

        if e_in {
            if !s_in {
                output.extend(boundary.intersect(s, e, rect));
            }
            output.push(e);
        } else if s_in {
            output.extend(boundary.intersect(s, e, rect));
        }
        s = e;
    }

    output
}

/// Clip `polygon` to `rect` (Sutherland-Hodgman).
///
/// `rect` must already be normalized; use [`ClipRect::from_corners`] for raw
/// corners. An empty result means the polygon lies entirely outside.
pub fn clip_polygon(polygon: &Polygon, rect: &ClipRect) -> Polygon {
    let mut current = polygon.vertices.clone();

    for boundary in Boundary::ALL {
        current = clip_against(&current, boundary, rect);
        if current.is_empty() {
            break;
        }
    }

    Polygon::from_vertices(current)
}
