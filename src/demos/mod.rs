mod circle;
mod clip;
mod cube;

pub use circle::CircleDemo;
pub use clip::ClipDemo;
pub use cube::{load_texture, CubeDemo};

use crate::display::{InputEvent, PixelBuffer};
use crate::geometry::Viewport;

/// Interactive scene driven by the main loop
pub trait Demo {
    /// React to one input event (already filtered of global keys)
    fn handle_event(&mut self, event: &InputEvent);

    /// Advance animation state
    /// - dt: delta time in seconds
    fn update(&mut self, dt: f32);

    /// Draw into the pixel buffer, which matches the current viewport
    fn render(&self, buffer: &mut PixelBuffer);

    /// Demo name for the window title and logs
    fn name(&self) -> &str;

    /// Window size changed
    fn resize(&mut self, viewport: Viewport);
}
