use crate::zones::Polygon;
use serde::{Deserialize, Serialize};

/// Smallest axis-aligned rectangle containing a polygon
///
/// Derived once, never mutated. Used as a cheap pre-filter before exact
/// clipping, and as the overlap region itself in bounding-box fidelity mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Compute the bounding box of a polygon's vertices, O(n).
    /// Returns None for an empty polygon.
    pub fn of(polygon: &Polygon) -> Option<Self> {
        if polygon.vertices.is_empty() {
            return None;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for v in &polygon.vertices {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }

        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True iff the boxes overlap with positive area on both axes.
    ///
    /// Strict inequalities: boxes sharing only an edge or corner do NOT
    /// overlap, so adjacent zones are never flagged.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// The overlapping rectangle of two boxes, or None when they don't overlap
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            min_x: self.min_x.max(other.min_x),
            max_x: self.max_x.min(other.max_x),
            min_y: self.min_y.max(other.min_y),
            max_y: self.max_y.min(other.max_y),
        })
    }

    /// The box as a four-corner ring: (min,min), (max,min), (max,max), (min,max)
    pub fn to_polygon(&self) -> Polygon {
        Polygon::from_coords(&[
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ])
    }
}
