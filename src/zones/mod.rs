mod polygon;
mod scene;

pub use polygon::Polygon;
pub use scene::{ZoneError, ZoneGeometry, ZoneRecord, ZoneSet};

use serde::{Deserialize, Serialize};

/// A point in 2D space
///
/// No units are assumed: the same engine works whether inputs are
/// geographic degrees or planar meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A named areal zone supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub polygon: Polygon,
}

impl Zone {
    pub fn new(name: impl Into<String>, polygon: Polygon) -> Self {
        Self {
            name: name.into(),
            polygon,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.polygon.contains(x, y)
    }
}
