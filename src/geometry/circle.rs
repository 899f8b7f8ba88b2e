//! Bresenham / midpoint circle rasterization.

use std::collections::HashSet;
use std::fmt;

/// Largest radius [`rasterize_circle`] accepts. Keeps the decision term and
/// the output allocation well inside `i32` and memory limits.
pub const MAX_RADIUS: i32 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterError {
    /// The radius was below zero
    NegativeRadius(i32),
    /// The radius was above [`MAX_RADIUS`]
    RadiusTooLarge { radius: i32, max: i32 },
    /// `center ± radius` does not fit in `i32`
    CenterOutOfRange { center: (i32, i32), radius: i32 },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::NegativeRadius(r) => {
                write!(f, "circle radius must be non-negative, got {}", r)
            },
            RasterError::RadiusTooLarge { radius, max } => {
                write!(f, "circle radius {} exceeds the maximum of {}", radius, max)
            },
            RasterError::CenterOutOfRange { center, radius } => write!(
                f,
                "circle of radius {} around {:?} leaves the i32 range",
                radius, center
            ),
        }
    }
}

impl std::error::Error for RasterError {}

/// Rasterize a circle outline with the midpoint algorithm.
///
/// Points come back in emission order: for every step the eight octant
/// reflections `(±x, ±y)` and `(±y, ±x)` around `center`. Reflections that
/// coincide (on the axes and the diagonals) are emitted more than once;
/// run [`dedup_points`] when a set is needed. Radius 0 yields the center
/// eight times.
///
/// Fails for a negative radius, a radius above [`MAX_RADIUS`], or a circle
/// whose extent `center ± radius` overflows `i32`.
pub fn rasterize_circle(center: (i32, i32), radius: i32) -> Result<Vec<(i32, i32)>, RasterError> {
    if radius < 0 {
        return Err(RasterError::NegativeRadius(radius));
    }
    if radius > MAX_RADIUS {
        return Err(RasterError::RadiusTooLarge {
            radius,
            max: MAX_RADIUS,
        });
    }

    let (xc, yc) = center;
    // Every emitted coordinate lies within center ± radius
    let in_range = xc.checked_add(radius).is_some()
        && xc.checked_sub(radius).is_some()
        && yc.checked_add(radius).is_some()
        && yc.checked_sub(radius).is_some();
    if !in_range {
        return Err(RasterError::CenterOutOfRange { center, radius });
    }

    let mut x = 0;
    let mut y = radius;
    let mut d = 3 - 2 * radius;

    // Roughly r / sqrt(2) steps, eight points each
    let mut points = Vec::with_capacity(radius as usize * 6 + 8);

    while x <= y {
        points.extend_from_slice(&[
            (xc + x, yc + y),
            (xc - x, yc + y),
            (xc + x, yc - y),
            (xc - x, yc - y),
            (xc + y, yc + x),
            (xc - y, yc + x),
            (xc + y, yc - x),
            (xc - y, yc - x),
        ]);

        if d < 0 {
            d += 4 * x + 6;
        } else {
            d += 4 * (x - y) + 10;
            y -= 1;
        }
        x += 1;
    }

    Ok(points)
}

/// Drop repeated points, keeping first-emission order
pub fn dedup_points(points: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut seen = HashSet::with_capacity(points.len());
    points.iter().copied().filter(|p| seen.insert(*p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_five_reference_output() {
        let points = rasterize_circle((0, 0), 5).unwrap();
        // Steps at (0,5), (1,5), (2,5), (3,4)
        assert_eq!(points.len(), 32);
        assert_eq!(dedup_points(&points).len(), 28);

        for axis in [(5, 0), (0, 5), (-5, 0), (0, -5)] {
            assert!(points.contains(&axis), "missing {:?}", axis);
        }

        let mut expected: Vec<(i32, i32)> = Vec::new();
        for (x, y) in [(0, 5), (1, 5), (2, 5), (3, 4)] {
            for (sx, sy) in [(1, 1), (-1, 1), (1, -1), (-1, -1)] {
                expected.push((sx * x, sy * y));
                expected.push((sx * y, sy * x));
            }
        }
        let mut got = dedup_points(&points);
        let mut expected = dedup_points(&expected);
        got.sort_unstable();
        expected.sort_unstable();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_emission_order_first_step() {
        let points = rasterize_circle((10, 20), 3).unwrap();
        assert_eq!(
            &points[..8],
            &[
                (10, 23),
                (10, 23),
                (10, 17),
                (10, 17),
                (13, 20),
                (7, 20),
                (13, 20),
                (7, 20)
            ]
        );
    }

    #[test]
    fn test_eight_way_symmetry() {
        for radius in [1, 2, 7, 13, 100] {
            let center = (40, -12);
            let points = rasterize_circle(center, radius).unwrap();
            let set: HashSet<_> = points.iter().copied().collect();
            for &(px, py) in &points {
                let (x, y) = (px - center.0, py - center.1);
                for (rx, ry) in [
                    (x, y),
                    (-x, y),
                    (x, -y),
                    (-x, -y),
                    (y, x),
                    (-y, x),
                    (y, -x),
                    (-y, -x),
                ] {
                    assert!(
                        set.contains(&(center.0 + rx, center.1 + ry)),
                        "r={} missing reflection of {:?}",
                        radius,
                        (x, y)
                    );
                }
            }
        }
    }

    #[test]
    fn test_points_near_true_radius() {
        let r = 50;
        for (x, y) in rasterize_circle((0, 0), r).unwrap() {
            let dist = ((x * x + y * y) as f32).sqrt();
            assert!((dist - r as f32).abs() <= 1.0, "({}, {}) at {}", x, y, dist);
        }
    }

    #[test]
    fn test_zero_radius_collapses_to_center() {
        let points = rasterize_circle((3, 4), 0).unwrap();
        assert_eq!(points.len(), 8);
        assert_eq!(dedup_points(&points), vec![(3, 4)]);
    }

    #[test]
    fn test_negative_radius_rejected() {
        assert_eq!(
            rasterize_circle((0, 0), -1),
            Err(RasterError::NegativeRadius(-1))
        );
    }

    #[test]
    fn test_huge_radius_is_rejected() {
        let radius = i32::MAX / 2 + 10;
        assert_eq!(
            rasterize_circle((0, 0), radius),
            Err(RasterError::RadiusTooLarge {
                radius,
                max: MAX_RADIUS
            })
        );
        assert!(rasterize_circle((0, 0), i32::MAX).is_err());
    }

    #[test]
    fn test_max_radius_is_accepted() {
        let points = rasterize_circle((0, 0), MAX_RADIUS).unwrap();
        assert!(points.contains(&(MAX_RADIUS, 0)));
        assert!(points.contains(&(0, -MAX_RADIUS)));
    }

    #[test]
    fn test_center_near_i32_limit_is_rejected() {
        for center in [(i32::MAX - 2, 0), (0, i32::MIN + 2)] {
            assert_eq!(
                rasterize_circle(center, 5),
                Err(RasterError::CenterOutOfRange { center, radius: 5 })
            );
        }
        // Touching the limit exactly is fine
        let points = rasterize_circle((i32::MAX - 5, i32::MIN + 5), 5).unwrap();
        assert!(points.contains(&(i32::MAX, i32::MIN + 5)));
        assert!(points.contains(&(i32::MAX - 5, i32::MIN)));
    }

    #[test]
    fn test_deterministic() {
        let a = rasterize_circle((5, 5), 21).unwrap();
        let b = rasterize_circle((5, 5), 21).unwrap();
        assert_eq!(a, b);
    }
}
