use super::Point;
use serde::{Deserialize, Serialize};

/// An ordered vertex loop; the last vertex implicitly connects to the first.
///
/// No convexity or simplicity is enforced and fewer than three vertices is
/// allowed (it just doesn't enclose anything).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn from_vertices(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn add_vertex(&mut self, p: Point) {
        self.vertices.push(p);
    }

    pub fn pop_vertex(&mut self) -> Option<Point> {
        self.vertices.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// At least three vertices, so the loop can enclose an area
    pub fn is_closed(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Convert vertices to tuple format for the fill_polygon API
    pub fn as_tuples(&self) -> Vec<(f32, f32)> {
        self.vertices.iter().map(|v| (v.x, v.y)).collect()
    }

    /// Same loop, same orientation, any starting vertex
    #[cfg(test)]
    pub fn same_loop(&self, other: &Polygon, epsilon: f32) -> bool {
        let n = self.vertices.len();
        if n != other.vertices.len() {
            return false;
        }
        if n == 0 {
            return true;
        }
        (0..n).any(|shift| {
            (0..n).all(|i| {
                self.vertices[i].approx_eq(&other.vertices[(i + shift) % n], epsilon)
            })
        })
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::from_vertices(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::from_vertices(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn test_as_tuples_keeps_order() {
        assert_eq!(
            square().as_tuples(),
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        );
    }

    #[test]
    fn test_same_loop_ignores_start_vertex() {
        let mut rotated = square();
        rotated.vertices.rotate_left(2);
        assert!(square().same_loop(&rotated, 1e-6));

        let mut reversed = square();
        reversed.vertices.reverse();
        assert!(!square().same_loop(&reversed, 1e-6));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&square()).unwrap();
        assert!(json.starts_with("[{"));
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, square());
    }
}
