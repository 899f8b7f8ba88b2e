//! RGBA textures for the cube demo
//!
//! Row 0 is the bottom of the image (GL convention), so `v = 0` samples the
//! bottom edge. Images loaded from disk are flipped on load to match.

use std::path::Path;

/// A texture stored as RGBA pixels
#[derive(Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA format, 4 bytes per pixel
}

impl Texture {
    /// Create a new empty texture
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Decode an image file (png or jpeg)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, image::ImageError> {
        let img = image::open(path.as_ref())?.flipv().to_rgba8();
        let (width, height) = img.dimensions();
        log::debug!(
            "loaded texture {} ({}x{})",
            path.as_ref().display(),
            width,
            height
        );
        Ok(Self {
            width,
            height,
            pixels: img.into_raw(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set a pixel in the texture
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        if x < self.width && y < self.height {
            let idx = ((y * self.width + x) * 4) as usize;
            self.pixels[idx] = r;
            self.pixels[idx + 1] = g;
            self.pixels[idx + 2] = b;
            self.pixels[idx + 3] = a;
        }
    }

    #[inline]
    fn texel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = ((y * self.width + x) * 4) as usize;
        (self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Sample with bilinear interpolation (GL_LINEAR with GL_REPEAT)
    pub fn sample_bilinear(&self, u: f32, v: f32) -> (u8, u8, u8) {
        // rem_euclid keeps negative coordinates repeating; texel centers sit
        // at half-integer positions
        let u = u.rem_euclid(1.0) * self.width as f32 - 0.5;
        let v = v.rem_euclid(1.0) * self.height as f32 - 0.5;

        let x0 = u.floor().rem_euclid(self.width as f32) as u32 % self.width;
        let y0 = v.floor().rem_euclid(self.height as f32) as u32 % self.height;
        let x1 = (x0 + 1) % self.width;
        let y1 = (y0 + 1) % self.height;

        let fx = u - u.floor();
        let fy = v - v.floor();

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x1, y0);
        let c01 = self.texel(x0, y1);
        let c11 = self.texel(x1, y1);

        let lerp = |a: u8, b: u8, t: f32| -> u8 {
            let result = a as f32 + (b as f32 - a as f32) * t;
            result.clamp(0.0, 255.0) as u8
        };

        (
            lerp(lerp(c00.0, c10.0, fx), lerp(c01.0, c11.0, fx), fy),
            lerp(lerp(c00.1, c10.1, fx), lerp(c01.1, c11.1, fx), fy),
            lerp(lerp(c00.2, c10.2, fx), lerp(c01.2, c11.2, fx), fy),
        )
    }

    /// Generate a checkerboard pattern
    pub fn checkerboard(size: u32, tile_size: u32, c1: (u8, u8, u8), c2: (u8, u8, u8)) -> Self {
        let tile_size = tile_size.max(1);
        let mut tex = Self::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let checker = ((x / tile_size) + (y / tile_size)) % 2 == 0;
                let (r, g, b) = if checker { c1 } else { c2 };
                tex.set_pixel(x, y, r, g, b, 255);
            }
        }
        tex
    }
}
