//! Textured, Phong-lit cube
//!
//! A unit cube tilted by Rx(10°)·Ry(-30°), pushed 5 units down -Z and viewed
//! through a 45° perspective frustum. Triangles go through the depth buffer
//! with perspective-correct texture coordinates.

use crate::display::{InputEvent, PixelBuffer};
use crate::geometry::Viewport;
use crate::math3d::{Perspective, Projected, Vec3};
use crate::texture::Texture;
use sdl2::keyboard::Keycode;
use std::path::Path;

use super::Demo;

const BACKGROUND: (u8, u8, u8) = (51, 76, 76);

const TILT_X_DEG: f32 = 10.0;
const TILT_Y_DEG: f32 = -30.0;
const CAMERA_DISTANCE: f32 = 5.0;
const FOVY_DEG: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;
/// Spin speed around Y in radians per second
const SPIN_SPEED: f32 = 0.8;

/// View-space light position (up, right and slightly in front of the camera)
const LIGHT_POS: Vec3 = Vec3::new(2.0, 2.0, 1.0);
const AMBIENT: f32 = 0.2;
const SPECULAR_STRENGTH: f32 = 0.5;
const SHININESS: i32 = 32;

#[derive(Debug, Clone, Copy)]
struct Vertex {
    pos: Vec3,
    color: (f32, f32, f32),
    uv: (f32, f32),
}

const fn vtx(x: f32, y: f32, z: f32, r: f32, g: f32, b: f32, u: f32, v: f32) -> Vertex {
    Vertex {
        pos: Vec3::new(x, y, z),
        color: (r, g, b),
        uv: (u, v),
    }
}

/// 6 faces x 2 triangles
#[rustfmt::skip]
const CUBE: [Vertex; 36] = [
    // Front
    vtx(-0.5, -0.5,  0.5, 1.0, 0.0, 0.0, 0.0, 0.0),
    vtx( 0.5, -0.5,  0.5, 0.0, 1.0, 0.0, 1.0, 0.0),
    vtx( 0.5,  0.5,  0.5, 0.0, 0.0, 1.0, 1.0, 1.0),
    vtx( 0.5,  0.5,  0.5, 0.0, 0.0, 1.0, 1.0, 1.0),
    vtx(-0.5,  0.5,  0.5, 1.0, 1.0, 0.0, 0.0, 1.0),
    vtx(-0.5, -0.5,  0.5, 1.0, 0.0, 0.0, 0.0, 0.0),
    // Back
    vtx(-0.5, -0.5, -0.5, 1.0, 0.0, 1.0, 0.0, 0.0),
    vtx( 0.5, -0.5, -0.5, 0.0, 1.0, 1.0, 1.0, 0.0),
    vtx( 0.5,  0.5, -0.5, 0.0, 0.0, 0.0, 1.0, 1.0),
    vtx( 0.5,  0.5, -0.5, 0.0, 0.0, 0.0, 1.0, 1.0),
    vtx(-0.5,  0.5, -0.5, 1.0, 1.0, 1.0, 0.0, 1.0),
    vtx(-0.5, -0.5, -0.5, 1.0, 0.0, 1.0, 0.0, 0.0),
    // Left
    vtx(-0.5,  0.5,  0.5, 1.0, 1.0, 0.0, 1.0, 0.0),
    vtx(-0.5,  0.5, -0.5, 1.0, 0.0, 0.0, 1.0, 1.0),
    vtx(-0.5, -0.5, -0.5, 0.0, 1.0, 0.0, 0.0, 1.0),
    vtx(-0.5, -0.5, -0.5, 0.0, 1.0, 0.0, 0.0, 1.0),
    vtx(-0.5, -0.5,  0.5, 0.0, 0.0, 1.0, 0.0, 0.0),
    vtx(-0.5,  0.5,  0.5, 1.0, 1.0, 0.0, 1.0, 0.0),
    // Right
    vtx( 0.5,  0.5,  0.5, 1.0, 1.0, 1.0, 1.0, 0.0),
    vtx( 0.5,  0.5, -0.5, 0.0, 1.0, 1.0, 1.0, 1.0),
    vtx( 0.5, -0.5, -0.5, 1.0, 0.0, 1.0, 0.0, 1.0),
    vtx( 0.5, -0.5, -0.5, 1.0, 0.0, 1.0, 0.0, 1.0),
    vtx( 0.5, -0.5,  0.5, 1.0, 1.0, 0.0, 0.0, 0.0),
    vtx( 0.5,  0.5,  0.5, 1.0, 1.0, 1.0, 1.0, 0.0),
    // Bottom
    vtx(-0.5, -0.5, -0.5, 0.0, 0.0, 0.0, 0.0, 1.0),
    vtx( 0.5, -0.5, -0.5, 1.0, 0.0, 0.0, 1.0, 1.0),
    vtx( 0.5, -0.5,  0.5, 0.0, 1.0, 0.0, 1.0, 0.0),
    vtx( 0.5, -0.5,  0.5, 0.0, 1.0, 0.0, 1.0, 0.0),
    vtx(-0.5, -0.5,  0.5, 0.0, 0.0, 1.0, 0.0, 0.0),
    vtx(-0.5, -0.5, -0.5, 0.0, 0.0, 0.0, 0.0, 1.0),
    // Top
    vtx(-0.5,  0.5, -0.5, 1.0, 1.0, 0.0, 0.0, 1.0),
    vtx( 0.5,  0.5, -0.5, 0.0, 1.0, 1.0, 1.0, 1.0),
    vtx( 0.5,  0.5,  0.5, 1.0, 0.0, 1.0, 1.0, 0.0),
    vtx( 0.5,  0.5,  0.5, 1.0, 0.0, 1.0, 1.0, 0.0),
    vtx(-0.5,  0.5,  0.5, 1.0, 1.0, 1.0, 0.0, 0.0),
    vtx(-0.5,  0.5, -0.5, 1.0, 1.0, 0.0, 0.0, 1.0),
];

/// Base color source for the lit surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Textured,
    VertexColor,
}

/// A cube vertex after the model-view transform and projection
#[derive(Debug, Clone, Copy)]
struct ViewVertex {
    view: Vec3,
    projected: Projected,
}

pub struct CubeDemo {
    texture: Texture,
    viewport: Viewport,
    perspective: Perspective,
    spin: f32,
    spinning: bool,
    surface: Surface,
}

/// Load the cube texture, falling back to a checkerboard
pub fn load_texture(path: Option<&Path>) -> Texture {
    let fallback = || Texture::checkerboard(256, 32, (200, 160, 90), (90, 60, 30));
    match path {
        Some(path) => match Texture::load(path) {
            Ok(texture) => {
                log::info!(
                    "using texture {} ({}x{})",
                    path.display(),
                    texture.width(),
                    texture.height()
                );
                texture
            },
            Err(e) => {
                log::error!("failed to load texture {}: {}", path.display(), e);
                fallback()
            },
        },
        None => {
            log::info!("no --texture given, using a checkerboard");
            fallback()
        },
    }
}

impl CubeDemo {
    pub fn new(viewport: Viewport, texture: Texture) -> Self {
        Self {
            texture,
            viewport,
            perspective: Perspective::for_viewport(FOVY_DEG, &viewport, Z_NEAR, Z_FAR),
            spin: 0.0,
            spinning: false,
            surface: Surface::Textured,
        }
    }

    /// Model then view transform: Ry first, then Rx, then the camera offset
    fn to_view(&self, p: Vec3) -> Vec3 {
        p.rotate_y(TILT_Y_DEG.to_radians() + self.spin)
            .rotate_x(TILT_X_DEG.to_radians())
            + Vec3::new(0.0, 0.0, -CAMERA_DISTANCE)
    }

    fn transform(&self, v: &Vertex) -> Option<ViewVertex> {
        let view = self.to_view(v.pos);
        let projected = self.perspective.project(view, &self.viewport)?;
        Some(ViewVertex { view, projected })
    }

    /// Outward face normal in view space
    fn face_normal(&self, tri: &[Vertex]) -> Vec3 {
        let a = self.to_view(tri[0].pos);
        let b = self.to_view(tri[1].pos);
        let c = self.to_view(tri[2].pos);
        let n = (b - a).cross(&(c - a)).normalize();
        // The cube is centered on the model origin
        let center = self.to_view(Vec3::zero());
        let centroid = (a + b + c) * (1.0 / 3.0);
        if n.dot(&(centroid - center)) < 0.0 {
            -n
        } else {
            n
        }
    }

    fn draw_triangle(&self, buffer: &mut PixelBuffer, tri: &[Vertex]) {
        let mut verts = [None; 3];
        for (slot, v) in verts.iter_mut().zip(tri) {
            *slot = self.transform(v);
        }
        let [Some(v0), Some(v1), Some(v2)] = verts else {
            return;
        };
        let normal = self.face_normal(tri);
        let view = [v0, v1, v2];

        let screen = view.map(|v| {
            (
                v.projected.screen.x,
                v.projected.screen.y,
                v.projected.depth,
            )
        });

        buffer.fill_triangle_shaded(screen, |w| {
            // Screen-space weights -> perspective-correct weights
            let pw = [
                w[0] * view[0].projected.inv_w,
                w[1] * view[1].projected.inv_w,
                w[2] * view[2].projected.inv_w,
            ];
            let sum = pw[0] + pw[1] + pw[2];
            let pw = if sum > 0.0 {
                [pw[0] / sum, pw[1] / sum, pw[2] / sum]
            } else {
                w
            };

            let pos = view[0].view * pw[0] + view[1].view * pw[1] + view[2].view * pw[2];
            let base = match self.surface {
                Surface::Textured => {
                    let u = tri[0].uv.0 * pw[0] + tri[1].uv.0 * pw[1] + tri[2].uv.0 * pw[2];
                    let v = tri[0].uv.1 * pw[0] + tri[1].uv.1 * pw[1] + tri[2].uv.1 * pw[2];
                    let (r, g, b) = self.texture.sample_bilinear(u, v);
                    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
                },
                Surface::VertexColor => (
                    tri[0].color.0 * pw[0] + tri[1].color.0 * pw[1] + tri[2].color.0 * pw[2],
                    tri[0].color.1 * pw[0] + tri[1].color.1 * pw[1] + tri[2].color.1 * pw[2],
                    tri[0].color.2 * pw[0] + tri[1].color.2 * pw[1] + tri[2].color.2 * pw[2],
                ),
            };
            phong(base, normal, pos)
        });
    }
}

/// Ambient + diffuse + specular with a white light. The camera sits at the
/// view-space origin.
fn phong(base: (f32, f32, f32), normal: Vec3, pos: Vec3) -> (u8, u8, u8) {
    let to_light = (LIGHT_POS - pos).normalize();
    let diffuse = normal.dot(&to_light).max(0.0);

    // No highlight on faces turned away from the light
    let specular = if diffuse > 0.0 {
        let to_eye = (-pos).normalize();
        let reflected = (-to_light).reflect(&normal);
        SPECULAR_STRENGTH * to_eye.dot(&reflected).max(0.0).powi(SHININESS)
    } else {
        0.0
    };

    let light = AMBIENT + diffuse;
    let channel = |c: f32| ((c * light + specular) * 255.0).clamp(0.0, 255.0) as u8;
    (channel(base.0), channel(base.1), channel(base.2))
}

impl Demo for CubeDemo {
    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(Keycode::Space) => {
                self.spinning = !self.spinning;
                log::debug!("cube spin {}", if self.spinning { "on" } else { "off" });
            },
            InputEvent::KeyDown(Keycode::T) => {
                self.surface = match self.surface {
                    Surface::Textured => Surface::VertexColor,
                    Surface::VertexColor => Surface::Textured,
                };
            },
            _ => {},
        }
    }

    fn update(&mut self, dt: f32) {
        if self.spinning {
            self.spin = (self.spin + SPIN_SPEED * dt) % std::f32::consts::TAU;
        }
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        buffer.clear_all(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2);
        for tri in CUBE.chunks_exact(3) {
            self.draw_triangle(buffer, tri);
        }
    }

    fn name(&self) -> &str {
        "Textured Cube"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.perspective = Perspective::for_viewport(FOVY_DEG, &viewport, Z_NEAR, Z_FAR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo(size: u32) -> CubeDemo {
        let texture = Texture::checkerboard(8, 4, (255, 255, 255), (255, 255, 255));
        CubeDemo::new(Viewport::new(size, size), texture)
    }

    #[test]
    fn test_face_normals_point_outward() {
        let demo = demo(100);
        let center = demo.to_view(Vec3::zero());
        for tri in CUBE.chunks_exact(3) {
            let n = demo.face_normal(tri);
            assert!((n.length() - 1.0).abs() < 1e-4);
            let a = demo.to_view(tri[0].pos);
            assert!(n.dot(&(a - center)) > 0.0);
        }
    }

    #[test]
    fn test_render_covers_center_only() {
        let demo = demo(200);
        let mut buffer = PixelBuffer::with_depth(200, 200);
        demo.render(&mut buffer);

        assert_ne!(buffer.get_pixel(100, 100), Some(BACKGROUND));
        assert!(buffer.depth_at(100, 100).unwrap() < 1.0);
        assert_eq!(buffer.get_pixel(2, 2), Some(BACKGROUND));
        assert_eq!(buffer.get_pixel(197, 197), Some(BACKGROUND));
        assert_eq!(buffer.depth_at(2, 2), Some(f32::INFINITY));
    }

    #[test]
    fn test_front_face_is_lit() {
        // White texture: brightness comes from lighting alone
        let demo = demo(200);
        let mut buffer = PixelBuffer::with_depth(200, 200);
        demo.render(&mut buffer);
        let (r, g, b) = buffer.get_pixel(100, 100).unwrap();
        assert_eq!((r, g), (g, b));
        assert!(r as f32 > AMBIENT * 255.0);
    }

    #[test]
    fn test_space_toggles_spin() {
        let mut demo = demo(100);
        demo.update(1.0);
        assert_eq!(demo.spin, 0.0);

        demo.handle_event(&InputEvent::KeyDown(Keycode::Space));
        assert!(demo.spinning);
        demo.update(0.5);
        assert!((demo.spin - SPIN_SPEED * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_surface_toggle_changes_output() {
        let mut demo = demo(100);
        let mut textured = PixelBuffer::with_depth(100, 100);
        demo.render(&mut textured);

        demo.handle_event(&InputEvent::KeyDown(Keycode::T));
        assert_eq!(demo.surface, Surface::VertexColor);
        let mut colored = PixelBuffer::with_depth(100, 100);
        demo.render(&mut colored);
        assert_ne!(textured.get_pixel(50, 50), colored.get_pixel(50, 50));
    }

    #[test]
    fn test_phong_back_lit_is_ambient() {
        let base = (1.0, 1.0, 1.0);
        let pos = Vec3::new(0.0, 0.0, -5.0);
        // Normal facing away from both light and eye
        let (r, _, _) = phong(base, Vec3::new(0.0, 0.0, -1.0), pos);
        assert_eq!(r, (AMBIENT * 255.0) as u8);
    }

    #[test]
    fn test_missing_texture_falls_back() {
        let texture = load_texture(Some(Path::new("/nonexistent/rasterlab/container.jpg")));
        assert_eq!((texture.width(), texture.height()), (256, 256));
    }
}
