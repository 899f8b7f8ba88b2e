//! 3D math for the cube demo
//!
//! Vectors, axis rotations and a GL-style perspective projection. View space
//! is right-handed with the camera looking down -Z.

use crate::geometry::{Point, Viewport};
use std::ops::{Add, Mul, Neg, Sub};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            *self
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Reflect this (incoming) direction about `normal`
    #[inline]
    pub fn reflect(&self, normal: &Self) -> Self {
        *self - *normal * (2.0 * self.dot(normal))
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    #[cfg(test)]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    /// Rotate around X axis
    #[inline]
    pub fn rotate_x(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Rotate around Y axis
    #[inline]
    pub fn rotate_y(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

// ============================================================================
// Projection
// ============================================================================

/// A view-space point after projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Pixel position
    pub screen: Point,
    /// NDC depth in [-1, 1], affine in screen space
    pub depth: f32,
    /// 1 / view distance, for perspective-correct attribute interpolation
    pub inv_w: f32,
}

/// Symmetric perspective frustum (the glm::perspective parameters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Perspective {
    pub fn new(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fovy: fovy_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// Frustum for a viewport, keeping its aspect ratio
    pub fn for_viewport(fovy_degrees: f32, viewport: &Viewport, near: f32, far: f32) -> Self {
        let aspect = viewport.width() as f32 / viewport.height() as f32;
        Self::new(fovy_degrees, aspect, near, far)
    }

    /// Project a view-space point to pixels.
    ///
    /// Returns None when the point is not in front of the near plane.
    pub fn project(&self, p: Vec3, viewport: &Viewport) -> Option<Projected> {
        let w = -p.z;
        if w < self.near {
            return None;
        }
        let f = 1.0 / (self.fovy / 2.0).tan();
        let ndc_x = f / self.aspect * p.x / w;
        let ndc_y = f * p.y / w;
        let ndc_z = ((self.far + self.near) / (self.near - self.far) * p.z
            + 2.0 * self.far * self.near / (self.near - self.far))
            / w;

        Some(Projected {
            screen: viewport.to_pixel(Point::new(ndc_x, ndc_y)),
            depth: ndc_z,
            inv_w: 1.0 / w,
        })
    }
}
