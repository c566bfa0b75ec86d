use super::Point;
use serde::{Deserialize, Serialize};

/// A simple polygon given as a single outer ring
///
/// The last vertex is implicitly connected back to the first. Simplicity
/// (no self-intersections) is the caller's guarantee and is not validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
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

    /// Build a ring from raw coordinate pairs
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self {
            vertices: coords.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    pub fn add_vertex(&mut self, x: f64, y: f64) {
        self.vertices.push(Point::new(x, y));
    }

    /// A ring needs at least 3 vertices to enclose area
    pub fn is_closed(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Point-in-polygon test using ray casting algorithm
    ///
    /// Points exactly on the boundary are not reliably classified; callers
    /// that care use an explicit boundary test alongside this.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }

        let mut inside = false;
        let n = self.vertices.len();

        let mut j = n - 1;
        for i in 0..n {
            let vi = &self.vertices[i];
            let vj = &self.vertices[j];

            if ((vi.y > y) != (vj.y > y)) && (x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// Get edges as vertex pairs, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Signed ring area via the shoelace formula (negative for clockwise rings)
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut a = 0.0;
        for i in 0..n {
            let p = &self.vertices[i];
            let q = &self.vertices[(i + 1) % n];
            a += p.x * q.y - q.x * p.y;
        }
        a / 2.0
    }

    /// Absolute enclosed area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Calculate the centroid (vertex average) of the polygon
    /// Returns None if the polygon is empty
    pub fn centroid(&self) -> Option<Point> {
        if self.vertices.is_empty() {
            return None;
        }

        let n = self.vertices.len() as f64;
        let sum_x: f64 = self.vertices.iter().map(|v| v.x).sum();
        let sum_y: f64 = self.vertices.iter().map(|v| v.y).sum();

        Some(Point::new(sum_x / n, sum_y / n))
    }
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_contains_center() {
        assert!(unit_square().contains(0.5, 0.5));
    }

    #[test]
    fn test_contains_outside() {
        assert!(!unit_square().contains(1.5, 0.5));
        assert!(!unit_square().contains(0.5, -0.5));
    }

    #[test]
    fn test_area_square() {
        assert!((unit_square().area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_signed_area_orientation() {
        // Counter-clockwise ring has positive signed area
        assert!(unit_square().signed_area() > 0.0);
        let cw = Polygon::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(cw.signed_area() < 0.0);
    }

    #[test]
    fn test_area_degenerate() {
        let line = Polygon::from_coords(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(line.area(), 0.0);
        assert!(!line.is_closed());
    }

    #[test]
    fn test_edges_close_ring() {
        let square = unit_square();
        let edges: Vec<_> = square.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].1, &square.vertices[0]);
    }
}
