// ============================================================================
// Utility Functions
// ============================================================================

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], r: u8, g: u8, b: u8) {
    dest[0] = 255; // A
    dest[1] = b; // B
    dest[2] = g; // G
    dest[3] = r; // R
}

/// Twice the signed area of triangle (a, b, p); sign tells the side of p
#[inline]
fn edge_function(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering.
/// Every demo draws into one of these; `Display::present` uploads it.
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    depth: Option<Vec<f32>>,
}

impl PixelBuffer {
    /// Create a new pixel buffer with custom resolution
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
            depth: None,
        }
    }

    /// Create a pixel buffer with an attached depth buffer (initialized to infinity)
    pub fn with_depth(width: u32, height: u32) -> Self {
        Self {
            depth: Some(vec![f32::INFINITY; (width * height) as usize]),
            ..Self::with_size(width, height)
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

    /// Reallocate for a new window size. Contents are cleared to black.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        let pixel_count = (width * height) as usize;
        self.width = width;
        self.height = height;
        self.pixels = vec![0; pixel_count * 4];
        if self.depth.is_some() {
            self.depth = Some(vec![f32::INFINITY; pixel_count]);
        }
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Clear to a solid color
    /// Optimized: uses u32 fill for maximum speed
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        // Create ABGR u32 pattern
        let pixel = u32::from_ne_bytes([255, b, g, r]);

        // Safety: pixels.len() is always divisible by 4 (width * height * 4).
        // We use write_unaligned to avoid assuming alignment of Vec<u8>.
        let ptr = self.pixels.as_mut_ptr() as *mut u32;
        let len = self.pixels.len() / 4;

        for i in 0..len {
            // Safety: i < len keeps us within the allocation
            unsafe {
                ptr.add(i).write_unaligned(pixel);
            }
        }
    }

    // ========================================================================
    // Depth Buffer
    // ========================================================================

    /// Reset depth buffer to infinity. No-op if no depth buffer.
    pub fn clear_depth(&mut self) {
        if let Some(ref mut d) = self.depth {
            d.fill(f32::INFINITY);
        }
    }

    /// Clear color and depth in one call
    pub fn clear_all(&mut self, r: u8, g: u8, b: u8) {
        self.clear(r, g, b);
        self.clear_depth();
    }

    /// Read depth value at (x, y). Returns None if out of bounds or no depth buffer.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.depth
            .as_ref()
            .map(|d| d[(y as u32 * self.width + x as u32) as usize])
    }

    /// Depth-tested pixel write: writes only if z < current depth, then updates depth.
    /// Always writes color when no depth buffer is attached.
    #[inline]
    pub fn set_pixel_z(&mut self, x: i32, y: i32, z: f32, r: u8, g: u8, b: u8) {
        if !self.in_bounds(x, y) {
            return;
        }
        let pi = (y as u32 * self.width + x as u32) as usize;
        if let Some(ref mut d) = self.depth {
            if z >= d[pi] {
                return;
            }
            d[pi] = z;
        }
        let idx = pi * 4;
        write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
    }

    // ========================================================================
    // Pixels
    // ========================================================================

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
        }
    }

    /// Fast unchecked pixel set - use when you've already bounds-checked
    #[inline]
    unsafe fn set_pixel_unchecked(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        let idx = self.pixel_index(x, y);
        *self.pixels.get_unchecked_mut(idx) = 255;
        *self.pixels.get_unchecked_mut(idx + 1) = b;
        *self.pixels.get_unchecked_mut(idx + 2) = g;
        *self.pixels.get_unchecked_mut(idx + 3) = r;
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[cfg(test)]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((
                self.pixels[idx + 3], // R
                self.pixels[idx + 2], // G
                self.pixels[idx + 1], // B
            ))
        } else {
            None
        }
    }

    /// Draw a square point centered on (x, y), like a GL point of `size` pixels
    pub fn draw_point(&mut self, x: i32, y: i32, size: u32, r: u8, g: u8, b: u8) {
        if size <= 1 {
            self.set_pixel(x, y, r, g, b);
            return;
        }
        let half = (size / 2) as i32;
        self.fill_rect(x - half, y - half, size, size, r, g, b);
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Draw a horizontal line
    /// Optimized: computes starting index once, then increments by 4
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }

        let mut idx = self.pixel_index(start as u32, y as u32);
        let count = (end - start + 1) as usize;
        for _ in 0..count {
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
            idx += 4;
        }
    }

    /// Draw a line using Bresenham's algorithm with Cohen-Sutherland clipping
    ///
    /// Clips to screen bounds first, then draws without per-pixel bounds checks.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, r: u8, g: u8, b: u8) {
        let Some((cx0, cy0, cx1, cy1)) = self.clip_line(x0, y0, x1, y1) else {
            return;
        };

        let dx = (cx1 - cx0).abs();
        let dy = -((cy1 - cy0).abs());
        let sx = if cx0 < cx1 { 1i32 } else { -1i32 };
        let sy = if cy0 < cy1 { 1i32 } else { -1i32 };
        let mut err = dx + dy;
        let mut x = cx0;
        let mut y = cy0;

        loop {
            // Safety: coordinates are clipped to valid range
            unsafe {
                self.set_pixel_unchecked(x as u32, y as u32, r, g, b);
            }
            if x == cx1 && y == cy1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Cohen-Sutherland line clipping against the buffer bounds.
    /// Returns the clipped endpoints, or None when nothing is visible.
    fn clip_line(
        &self,
        mut x0: i32,
        mut y0: i32,
        mut x1: i32,
        mut y1: i32,
    ) -> Option<(i32, i32, i32, i32)> {
        const INSIDE: u8 = 0;
        const LEFT: u8 = 1;
        const RIGHT: u8 = 2;
        const BOTTOM: u8 = 4;
        const TOP: u8 = 8;
        // Converges in at most 4 iterations for valid input
        const MAX_ITERATIONS: u32 = 16;

        let w = self.width as i32;
        let h = self.height as i32;
        if w == 0 || h == 0 {
            return None;
        }

        let outcode = |x: i32, y: i32| -> u8 {
            let mut code = INSIDE;
            if x < 0 {
                code |= LEFT;
            } else if x >= w {
                code |= RIGHT;
            }
            if y < 0 {
                code |= TOP;
            } else if y >= h {
                code |= BOTTOM;
            }
            code
        };

        let mut code0 = outcode(x0, y0);
        let mut code1 = outcode(x1, y1);

        for _ in 0..MAX_ITERATIONS {
            if (code0 | code1) == 0 {
                return Some((x0, y0, x1, y1));
            }
            if (code0 & code1) != 0 {
                return None;
            }

            let code_out = if code0 != 0 { code0 } else { code1 };
            let dy = y1 - y0;
            let dx = x1 - x0;

            // Widen to i64: dx * dy overflows i32 for far off-screen endpoints
            let (x, y) = if (code_out & BOTTOM) != 0 {
                if dy == 0 {
                    return None;
                }
                let x = x0 as i64 + dx as i64 * (h - 1 - y0) as i64 / dy as i64;
                (x as i32, h - 1)
            } else if (code_out & TOP) != 0 {
                if dy == 0 {
                    return None;
                }
                let x = x0 as i64 + dx as i64 * (-y0) as i64 / dy as i64;
                (x as i32, 0)
            } else if (code_out & RIGHT) != 0 {
                if dx == 0 {
                    return None;
                }
                let y = y0 as i64 + dy as i64 * (w - 1 - x0) as i64 / dx as i64;
                (w - 1, y as i32)
            } else {
                if dx == 0 {
                    return None;
                }
                let y = y0 as i64 + dy as i64 * (-x0) as i64 / dx as i64;
                (0, y as i32)
            };

            if code_out == code0 {
                x0 = x;
                y0 = y;
                code0 = outcode(x0, y0);
            } else {
                x1 = x;
                y1 = y;
                code1 = outcode(x1, y1);
            }
        }

        None
    }

    /// Draw a closed outline through `vertices` (GL_LINE_LOOP)
    pub fn line_loop(&mut self, vertices: &[(f32, f32)], r: u8, g: u8, b: u8) {
        let n = vertices.len();
        if n == 0 {
            return;
        }
        if n == 1 {
            let (x, y) = vertices[0];
            self.set_pixel(x.round() as i32, y.round() as i32, r, g, b);
            return;
        }
        for i in 0..n {
            let (x0, y0) = vertices[i];
            let (x1, y1) = vertices[(i + 1) % n];
            self.line(
                x0.round() as i32,
                y0.round() as i32,
                x1.round() as i32,
                y1.round() as i32,
                r,
                g,
                b,
            );
        }
    }

    // ========================================================================
    // Filled shapes
    // ========================================================================

    /// Fill a rectangle
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, r: u8, g: u8, b: u8) {
        for row in 0..h as i32 {
            self.hline(x, x + w as i32 - 1, y + row, r, g, b);
        }
    }

    /// Scanline spans of a polygon (even-odd rule), one callback per span
    fn polygon_spans(&self, vertices: &[(f32, f32)], mut span: impl FnMut(i32, i32, i32)) {
        if vertices.len() < 3 || self.height == 0 {
            return;
        }

        // Find bounding box
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for (_, y) in vertices {
            min_y = min_y.min(*y);
            max_y = max_y.max(*y);
        }

        let min_y = (min_y as i32).max(0);
        let max_y = (max_y as i32).min(self.height as i32 - 1);

        // Preallocate intersection buffer (reused per scanline)
        let mut intersections = Vec::with_capacity(vertices.len());
        let n = vertices.len();

        for y in min_y..=max_y {
            intersections.clear();
            let yf = y as f32 + 0.5;

            for i in 0..n {
                let (x1, y1) = vertices[i];
                let (x2, y2) = vertices[(i + 1) % n];

                // Check if edge crosses this scanline
                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    let x = x1 + (yf - y1) / (y2 - y1) * (x2 - x1);
                    intersections.push(x as i32);
                }
            }

            intersections.sort_unstable();
            for pair in intersections.chunks_exact(2) {
                span(pair[0], pair[1], y);
            }
        }
    }

    /// Fill a polygon using scanline algorithm
    pub fn fill_polygon(&mut self, vertices: &[(f32, f32)], r: u8, g: u8, b: u8) {
        let mut spans = Vec::new();
        self.polygon_spans(vertices, |x1, x2, y| spans.push((x1, x2, y)));
        for (x1, x2, y) in spans {
            self.hline(x1, x2, y, r, g, b);
        }
    }

    /// Depth-tested triangle fill with a per-pixel shader.
    ///
    /// Vertices are `(screen_x, screen_y, depth)`. `shade` receives the
    /// barycentric weights of the pixel center and returns its color.
    /// Both windings are accepted; degenerate triangles draw nothing.
    pub fn fill_triangle_shaded(
        &mut self,
        v: [(f32, f32, f32); 3],
        mut shade: impl FnMut([f32; 3]) -> (u8, u8, u8),
    ) {
        let p0 = (v[0].0, v[0].1);
        let p1 = (v[1].0, v[1].1);
        let p2 = (v[2].0, v[2].1);

        let area = edge_function(p0, p1, p2);
        if area.abs() < f32::EPSILON {
            return;
        }

        let min_x = (p0.0.min(p1.0).min(p2.0).floor() as i32).max(0);
        let max_x = (p0.0.max(p1.0).max(p2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (p0.1.min(p1.1).min(p2.1).floor() as i32).max(0);
        let max_y = (p0.1.max(p1.1).max(p2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge_function(p1, p2, p) / area;
                let w1 = edge_function(p2, p0, p) / area;
                let w2 = edge_function(p0, p1, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * v[0].2 + w1 * v[1].2 + w2 * v[2].2;
                if let Some(current) = self.depth_at(x, y) {
                    if z >= current {
                        continue;
                    }
                }
                let (r, g, b) = shade([w0, w1, w2]);
                self.set_pixel_z(x, y, z, r, g, b);
            }
        }
    }

    // ========================================================================
    // Buffer Operations
    // ========================================================================

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_pixel() {
        let mut buffer = PixelBuffer::with_size(8, 8);
        buffer.set_pixel(3, 4, 10, 20, 30);
        assert_eq!(buffer.get_pixel(3, 4), Some((10, 20, 30)));
        assert_eq!(buffer.get_pixel(8, 0), None);
        // Out of range writes are ignored
        buffer.set_pixel(-1, 2, 255, 255, 255);
    }

    #[test]
    fn test_line_hits_both_endpoints() {
        let mut buffer = PixelBuffer::with_size(32, 32);
        buffer.line(2, 3, 20, 11, 255, 0, 0);
        assert_eq!(buffer.get_pixel(2, 3), Some((255, 0, 0)));
        assert_eq!(buffer.get_pixel(20, 11), Some((255, 0, 0)));
    }

    #[test]
    fn test_line_clipped_to_buffer() {
        let mut buffer = PixelBuffer::with_size(16, 16);
        buffer.line(-100, 8, 100, 8, 0, 255, 0);
        for x in 0..16 {
            assert_eq!(buffer.get_pixel(x, 8), Some((0, 255, 0)));
        }
        // Fully outside: nothing drawn, no panic
        buffer.line(-10, -10, -5, -1, 0, 0, 255);
        buffer.line(i32::MIN / 2, 0, i32::MAX / 2, 15, 0, 0, 255);
    }

    #[test]
    fn test_fill_polygon_covers_interior_only() {
        let mut buffer = PixelBuffer::with_size(20, 20);
        buffer.fill_polygon(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)], 0, 0, 255);
        assert_eq!(buffer.get_pixel(10, 10), Some((0, 0, 255)));
        assert_eq!(buffer.get_pixel(2, 2), Some((0, 0, 0)));
        assert_eq!(buffer.get_pixel(17, 10), Some((0, 0, 0)));
    }

    #[test]
    fn test_draw_point_size() {
        let mut buffer = PixelBuffer::with_size(10, 10);
        buffer.draw_point(5, 5, 4, 255, 255, 255);
        let lit = (0..10)
            .flat_map(|y| (0..10).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer.get_pixel(x, y) == Some((255, 255, 255)))
            .count();
        assert_eq!(lit, 16);
    }

    #[test]
    fn test_depth_test_keeps_nearest() {
        let mut buffer = PixelBuffer::with_depth(4, 4);
        buffer.set_pixel_z(1, 1, 0.5, 255, 0, 0);
        buffer.set_pixel_z(1, 1, 0.9, 0, 255, 0);
        assert_eq!(buffer.get_pixel(1, 1), Some((255, 0, 0)));
        buffer.set_pixel_z(1, 1, 0.1, 0, 0, 255);
        assert_eq!(buffer.get_pixel(1, 1), Some((0, 0, 255)));
        assert_eq!(buffer.depth_at(1, 1), Some(0.1));

        buffer.clear_all(0, 0, 0);
        assert_eq!(buffer.depth_at(1, 1), Some(f32::INFINITY));
    }

    #[test]
    fn test_fill_triangle_shaded_weights_sum_to_one() {
        let mut buffer = PixelBuffer::with_depth(16, 16);
        let mut calls = 0;
        buffer.fill_triangle_shaded([(0.0, 0.0, 1.0), (16.0, 0.0, 1.0), (0.0, 16.0, 1.0)], |w| {
            calls += 1;
            assert!((w[0] + w[1] + w[2] - 1.0).abs() < 1e-4);
            (200, 100, 50)
        });
        assert!(calls > 100);
        assert_eq!(buffer.get_pixel(2, 2), Some((200, 100, 50)));
        assert_eq!(buffer.get_pixel(15, 15), Some((0, 0, 0)));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut buffer = PixelBuffer::with_depth(4, 4);
        buffer.resize(8, 2);
        assert_eq!((buffer.width(), buffer.height()), (8, 2));
        assert_eq!(buffer.as_bytes().len(), 8 * 2 * 4);
        // Depth plane follows the new size
        assert_eq!(buffer.depth_at(7, 1), Some(f32::INFINITY));
        assert_eq!(buffer.depth_at(0, 2), None);
    }
}
