//! Midpoint circle rasterization shown as large points.
//!
//! Points are generated in pixel space, normalized to NDC and mapped back to
//! pixels when drawn, the same path a GPU point list would take.

use crate::display::{InputEvent, MouseButtonKind, PixelBuffer};
use crate::geometry::{
    dedup_points, rasterize_circle, to_normalized, Point, RasterError, Viewport, MAX_RADIUS,
};
use sdl2::keyboard::Keycode;

use super::Demo;

const BACKGROUND: (u8, u8, u8) = (51, 76, 76);
const POINT_COLOR: (u8, u8, u8) = (255, 255, 255);
const RADIUS_STEP: i32 = 5;

pub struct CircleDemo {
    radius: i32,
    point_size: u32,
    /// Pixel center; None follows the window center
    center: Option<(i32, i32)>,
    viewport: Viewport,
    points: Vec<Point>,
}

impl CircleDemo {
    pub fn new(viewport: Viewport, radius: i32, point_size: u32) -> Self {
        let mut demo = Self {
            radius: radius.clamp(0, MAX_RADIUS),
            point_size: point_size.max(1),
            center: None,
            viewport,
            points: Vec::new(),
        };
        demo.recompute();
        demo
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn center(&self) -> (i32, i32) {
        self.center.unwrap_or((
            self.viewport.width() as i32 / 2,
            self.viewport.height() as i32 / 2,
        ))
    }

    /// Current point list in NDC
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn recompute(&mut self) {
        let raster = match rasterize_circle(self.center(), self.radius) {
            Ok(points) => points,
            Err(e @ RasterError::CenterOutOfRange { .. }) => {
                log::warn!("{}", e);
                Vec::new()
            },
            Err(e) => {
                log::error!("{}", e);
                Vec::new()
            },
        };

        log::debug!("circle points (x, y): {:?}", raster);
        log::info!(
            "circle r={} at {:?}: {} points ({} distinct)",
            self.radius,
            self.center(),
            raster.len(),
            dedup_points(&raster).len()
        );

        let pixels: Vec<Point> = raster
            .iter()
            .map(|&(x, y)| Point::new(x as f32, y as f32))
            .collect();
        self.points = to_normalized(&pixels, self.viewport.width(), self.viewport.height());
    }

    fn set_radius(&mut self, radius: i32) {
        let radius = radius.clamp(0, MAX_RADIUS);
        if radius != self.radius {
            self.radius = radius;
            self.recompute();
        }
    }
}

impl Demo for CircleDemo {
    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(Keycode::Up) => self.set_radius(self.radius + RADIUS_STEP),
            InputEvent::KeyDown(Keycode::Down) => self.set_radius(self.radius - RADIUS_STEP),
            InputEvent::MouseDown {
                x,
                y,
                button: MouseButtonKind::Left,
            } => {
                self.center = Some((*x, *y));
                self.recompute();
            },
            _ => {},
        }
    }

    fn update(&mut self, _dt: f32) {}

    fn render(&self, buffer: &mut PixelBuffer) {
        buffer.clear(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2);
        let (r, g, b) = POINT_COLOR;
        for &p in &self.points {
            let s = self.viewport.to_pixel(p);
            buffer.draw_point(s.x.round() as i32, s.y.round() as i32, self.point_size, r, g, b);
        }
    }

    fn name(&self) -> &str {
        "Midpoint Circle"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_center_is_window_center() {
        let demo = CircleDemo::new(Viewport::new(600, 400), 100, 4);
        assert_eq!(demo.center(), (300, 200));
        // r = 100 emits 8 points per step, one step per x in 0..=70
        assert_eq!(demo.points().len(), 8 * 71);
    }

    #[test]
    fn test_points_are_ndc() {
        let demo = CircleDemo::new(Viewport::new(600, 600), 100, 4);
        let top = Point::new(0.0, 100.0 / 300.0);
        assert!(demo.points().iter().any(|p| p.approx_eq(&top, 1e-5)));
        for p in demo.points() {
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_radius_keys_floor_at_zero() {
        let mut demo = CircleDemo::new(Viewport::new(100, 100), 5, 1);
        demo.handle_event(&InputEvent::KeyDown(Keycode::Up));
        assert_eq!(demo.radius(), 10);
        for _ in 0..4 {
            demo.handle_event(&InputEvent::KeyDown(Keycode::Down));
        }
        assert_eq!(demo.radius(), 0);
        assert_eq!(demo.points().len(), 8);
    }

    #[test]
    fn test_radius_is_capped() {
        let mut demo = CircleDemo::new(Viewport::new(100, 100), i32::MAX, 1);
        assert_eq!(demo.radius(), MAX_RADIUS);
        demo.handle_event(&InputEvent::KeyDown(Keycode::Up));
        assert_eq!(demo.radius(), MAX_RADIUS);
        assert!(!demo.points().is_empty());
    }

    #[test]
    fn test_click_moves_center() {
        let mut demo = CircleDemo::new(Viewport::new(100, 100), 10, 1);
        demo.handle_event(&InputEvent::MouseDown {
            x: 20,
            y: 30,
            button: MouseButtonKind::Left,
        });
        assert_eq!(demo.center(), (20, 30));

        let mut buffer = PixelBuffer::with_size(100, 100);
        demo.render(&mut buffer);
        assert_eq!(buffer.get_pixel(30, 30), Some(POINT_COLOR));
        assert_eq!(buffer.get_pixel(20, 30), Some(BACKGROUND));
    }

    #[test]
    fn test_render_point_size() {
        let demo = CircleDemo::new(Viewport::new(100, 100), 20, 4);
        let mut buffer = PixelBuffer::with_size(100, 100);
        demo.render(&mut buffer);
        // Rightmost point (70, 50) drawn as a 4x4 square starting 2 pixels left/up
        assert_eq!(buffer.get_pixel(71, 51), Some(POINT_COLOR));
        assert_eq!(buffer.get_pixel(68, 48), Some(POINT_COLOR));
        assert_eq!(buffer.get_pixel(50, 50), Some(BACKGROUND));
    }
}
