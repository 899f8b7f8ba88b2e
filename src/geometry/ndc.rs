//! Pixel space <-> normalized device coordinates.
//!
//! Pixel space has its origin at the top-left corner with y growing down.
//! NDC spans [-1, 1] on both axes with the origin at the window center and
//! y growing up. No aspect correction is applied, so a circle in pixel space
//! stays a circle on screen only while the window is square.

use super::Point;

/// Window dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Zero dimensions (a minimized window) are treated as 1 pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel -> NDC
    #[inline]
    pub fn to_ndc(&self, p: Point) -> Point {
        Point::new(
            2.0 * p.x / self.width as f32 - 1.0,
            1.0 - 2.0 * p.y / self.height as f32,
        )
    }

    /// NDC -> pixel
    #[inline]
    pub fn to_pixel(&self, p: Point) -> Point {
        Point::new(
            (p.x + 1.0) * self.width as f32 / 2.0,
            (1.0 - p.y) * self.height as f32 / 2.0,
        )
    }

    /// Mouse position (integer pixel) -> NDC
    #[inline]
    pub fn mouse_to_ndc(&self, x: i32, y: i32) -> Point {
        self.to_ndc(Point::new(x as f32, y as f32))
    }

    pub fn to_pixels(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.to_pixel(p)).collect()
    }
}

/// Map pixel-space points to NDC for a `width` x `height` window
pub fn to_normalized(points: &[Point], width: u32, height: u32) -> Vec<Point> {
    let viewport = Viewport::new(width, height);
    points.iter().map(|&p| viewport.to_ndc(p)).collect()
}
