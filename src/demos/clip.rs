//! Interactive polygon clipping.
//!
//! Left clicks pick the two rectangle corners, then polygon vertices; a right
//! click closes the polygon and clips it. Selection state is kept in NDC so
//! the shapes follow the window when it is resized.

use crate::display::{InputEvent, MouseButtonKind, PixelBuffer};
use crate::geometry::{ClipRect, Point, Polygon, Viewport};
use crate::selection::{Selection, SelectionState, Session};
use sdl2::keyboard::Keycode;
use std::path::PathBuf;

use super::Demo;

const BACKGROUND: (u8, u8, u8) = (51, 76, 76);
const RECT_COLOR: (u8, u8, u8) = (255, 0, 0);
const POLYGON_COLOR: (u8, u8, u8) = (0, 0, 255);
const CLIPPED_COLOR: (u8, u8, u8) = (0, 255, 0);
const GUIDE_COLOR: (u8, u8, u8) = (90, 90, 90);
const HANDLE_SIZE: u32 = 5;

pub struct ClipDemo {
    selection: Selection,
    viewport: Viewport,
    /// Last mouse position in NDC, for the rubber-band guides
    mouse: Option<Point>,
    session_path: PathBuf,
}

impl ClipDemo {
    pub fn new(viewport: Viewport, session_path: PathBuf) -> Self {
        Self {
            selection: Selection::new(),
            viewport,
            mouse: None,
            session_path,
        }
    }

    #[cfg(test)]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn on_left_click(&mut self, x: i32, y: i32) {
        let p = self.viewport.mouse_to_ndc(x, y);
        if self.selection.clipped().is_some() {
            log::debug!("click ignored, press R to start over");
            return;
        }
        self.selection.click(p);
    }

    fn on_right_click(&mut self) {
        if let Err(e) = self.selection.finish() {
            log::warn!("cannot clip yet: {}", e);
        }
    }

    fn save_session(&self) {
        match self.selection.to_session().save(&self.session_path) {
            Ok(()) => log::info!("session saved to {}", self.session_path.display()),
            Err(e) => log::error!("failed to save {}: {}", self.session_path.display(), e),
        }
    }

    fn load_session(&mut self) {
        match Session::load(&self.session_path) {
            Ok(session) => {
                self.selection = Selection::from_session(session);
                log::info!("session loaded from {}", self.session_path.display());
            },
            Err(e) => log::warn!("failed to load {}: {}", self.session_path.display(), e),
        }
    }

    fn to_screen(&self, polygon: &Polygon) -> Vec<(f32, f32)> {
        Polygon::from(self.viewport.to_pixels(&polygon.vertices)).as_tuples()
    }

    fn draw_rect_outline(&self, buffer: &mut PixelBuffer, rect: &ClipRect, color: (u8, u8, u8)) {
        let outline = Polygon::from_vertices(rect.corners().to_vec());
        buffer.line_loop(&self.to_screen(&outline), color.0, color.1, color.2);
    }

    fn draw_open_polygon(&self, buffer: &mut PixelBuffer, polygon: &Polygon) {
        if polygon.is_empty() {
            return;
        }
        let screen = self.to_screen(polygon);
        if polygon.is_closed() {
            buffer.fill_polygon(&screen, POLYGON_COLOR.0, POLYGON_COLOR.1, POLYGON_COLOR.2);
        }
        for pair in screen.windows(2) {
            buffer.line(
                pair[0].0.round() as i32,
                pair[0].1.round() as i32,
                pair[1].0.round() as i32,
                pair[1].1.round() as i32,
                POLYGON_COLOR.0,
                POLYGON_COLOR.1,
                POLYGON_COLOR.2,
            );
        }
        for &(x, y) in &screen {
            buffer.draw_point(x.round() as i32, y.round() as i32, HANDLE_SIZE, 255, 255, 255);
        }

        // Rubber band from the last vertex back to the first through the cursor
        if let (Some(&(lx, ly)), Some(&(fx, fy)), Some(mouse)) =
            (screen.last(), screen.first(), self.mouse)
        {
            let m = self.viewport.to_pixel(mouse);
            let (r, g, b) = GUIDE_COLOR;
            buffer.line(lx as i32, ly as i32, m.x as i32, m.y as i32, r, g, b);
            buffer.line(m.x as i32, m.y as i32, fx as i32, fy as i32, r, g, b);
        }
    }
}

impl Demo for ClipDemo {
    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::MouseMove { x, y } => {
                self.mouse = Some(self.viewport.mouse_to_ndc(*x, *y));
            },
            InputEvent::MouseDown { x, y, button } => match button {
                MouseButtonKind::Left => self.on_left_click(*x, *y),
                MouseButtonKind::Right => self.on_right_click(),
                MouseButtonKind::Middle => {},
            },
            InputEvent::KeyDown(key) => match *key {
                Keycode::R => {
                    self.selection.reset();
                    log::info!("selection reset");
                },
                Keycode::Backspace => self.selection.undo(),
                Keycode::S => self.save_session(),
                Keycode::L => self.load_session(),
                _ => {},
            },
            _ => {},
        }
    }

    fn update(&mut self, _dt: f32) {}

    fn render(&self, buffer: &mut PixelBuffer) {
        buffer.clear(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2);

        match self.selection.state() {
            SelectionState::AwaitingRectangle { first } => {
                if let (Some(a), Some(b)) = (*first, self.mouse) {
                    self.draw_rect_outline(buffer, &ClipRect::from_corners(a, b), GUIDE_COLOR);
                }
            },
            SelectionState::AwaitingPolygon { rect, vertices } => {
                self.draw_open_polygon(buffer, vertices);
                self.draw_rect_outline(buffer, rect, RECT_COLOR);
            },
            SelectionState::Clipped {
                rect,
                polygon,
                clipped,
            } => {
                let (r, g, b) = POLYGON_COLOR;
                buffer.fill_polygon(&self.to_screen(polygon), r, g, b);
                let (r, g, b) = CLIPPED_COLOR;
                buffer.fill_polygon(&self.to_screen(clipped), r, g, b);
                self.draw_rect_outline(buffer, rect, RECT_COLOR);
            },
        }
    }

    fn name(&self) -> &str {
        "Polygon Clipping"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(demo: &mut ClipDemo, x: i32, y: i32, button: MouseButtonKind) {
        demo.handle_event(&InputEvent::MouseDown { x, y, button });
    }

    fn demo() -> ClipDemo {
        let path = std::env::temp_dir().join(format!(
            "rasterlab_clip_demo_{}.json",
            std::process::id()
        ));
        ClipDemo::new(Viewport::new(200, 200), path)
    }

    /// Rectangle 50..150 both ways, triangle poking out of its left side
    fn clipped_demo() -> ClipDemo {
        let mut demo = demo();
        click(&mut demo, 50, 50, MouseButtonKind::Left);
        click(&mut demo, 150, 150, MouseButtonKind::Left);
        click(&mut demo, 0, 100, MouseButtonKind::Left);
        click(&mut demo, 100, 60, MouseButtonKind::Left);
        click(&mut demo, 100, 140, MouseButtonKind::Left);
        click(&mut demo, 0, 0, MouseButtonKind::Right);
        demo
    }

    #[test]
    fn test_clicks_are_converted_to_ndc() {
        let mut demo = demo();
        click(&mut demo, 50, 50, MouseButtonKind::Left);
        click(&mut demo, 150, 150, MouseButtonKind::Left);
        let rect = demo.selection().rect().copied().unwrap();
        assert!(rect.min.approx_eq(&Point::new(-0.5, -0.5), 1e-6));
        assert!(rect.max.approx_eq(&Point::new(0.5, 0.5), 1e-6));
    }

    #[test]
    fn test_right_click_clips() {
        let demo = clipped_demo();
        let clipped = demo.selection().clipped().unwrap();
        assert!(clipped.len() >= 3);
        for p in &clipped.vertices {
            assert!(p.x >= -0.5 - 1e-5 && p.x <= 0.5 + 1e-5);
            assert!(p.y >= -0.5 - 1e-5 && p.y <= 0.5 + 1e-5);
        }
    }

    #[test]
    fn test_right_click_too_early_keeps_state() {
        let mut demo = demo();
        click(&mut demo, 50, 50, MouseButtonKind::Left);
        click(&mut demo, 150, 150, MouseButtonKind::Left);
        click(&mut demo, 60, 60, MouseButtonKind::Left);
        click(&mut demo, 0, 0, MouseButtonKind::Right);
        assert!(matches!(
            demo.selection().state(),
            SelectionState::AwaitingPolygon { .. }
        ));
    }

    #[test]
    fn test_render_colors() {
        let demo = clipped_demo();
        let mut buffer = PixelBuffer::with_size(200, 200);
        demo.render(&mut buffer);

        // Inside rect and triangle: clipped (green)
        assert_eq!(buffer.get_pixel(80, 100), Some(CLIPPED_COLOR));
        // Triangle outside the rect: unclipped polygon (blue)
        assert_eq!(buffer.get_pixel(30, 100), Some(POLYGON_COLOR));
        // Rectangle outline (red) away from the polygon
        assert_eq!(buffer.get_pixel(150, 60), Some(RECT_COLOR));
        // Empty corner
        assert_eq!(buffer.get_pixel(190, 10), Some(BACKGROUND));
    }

    #[test]
    fn test_background_matches_other_demos() {
        let demo = demo();
        let mut buffer = PixelBuffer::with_size(200, 200);
        demo.render(&mut buffer);
        assert_eq!(BACKGROUND, (51, 76, 76));
        for (x, y) in [(0, 0), (199, 0), (100, 100), (0, 199)] {
            assert_eq!(buffer.get_pixel(x, y), Some((51, 76, 76)));
        }
    }

    #[test]
    fn test_rubber_band_rect_follows_mouse() {
        let mut demo = demo();
        click(&mut demo, 150, 150, MouseButtonKind::Left);
        demo.handle_event(&InputEvent::MouseMove { x: 50, y: 50 });
        let mut buffer = PixelBuffer::with_size(200, 200);
        demo.render(&mut buffer);
        // Outline from the corners in either click order
        assert_eq!(buffer.get_pixel(100, 50), Some(GUIDE_COLOR));
        assert_eq!(buffer.get_pixel(150, 100), Some(GUIDE_COLOR));
        assert_eq!(buffer.get_pixel(100, 100), Some(BACKGROUND));
    }

    #[test]
    fn test_reset_key() {
        let mut demo = clipped_demo();
        demo.handle_event(&InputEvent::KeyDown(Keycode::R));
        assert_eq!(demo.selection(), &Selection::new());
    }

    #[test]
    fn test_save_then_load_session() {
        let mut demo = clipped_demo();
        demo.handle_event(&InputEvent::KeyDown(Keycode::S));
        let saved = demo.selection().clone();

        demo.handle_event(&InputEvent::KeyDown(Keycode::R));
        demo.handle_event(&InputEvent::KeyDown(Keycode::L));
        let _ = std::fs::remove_file(&demo.session_path);
        assert_eq!(demo.selection(), &saved);
    }

    #[test]
    fn test_resize_keeps_ndc_shapes() {
        let mut demo = clipped_demo();
        demo.resize(Viewport::new(400, 400));
        let mut buffer = PixelBuffer::with_size(400, 400);
        demo.render(&mut buffer);
        assert_eq!(buffer.get_pixel(160, 200), Some(CLIPPED_COLOR));
    }
}
