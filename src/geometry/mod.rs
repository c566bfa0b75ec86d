//! The geometry engine: coordinate normalization, bounding boxes,
//! polygon clipping, and pairwise overlap detection.
//!
//! All entry points are pure functions over immutable inputs; the engine
//! holds no state between calls and produces no side effects.

mod bbox;
mod clip;
mod normalize;
mod overlap;

pub use bbox::BoundingBox;
pub use clip::intersect;
pub use normalize::{normalize, Viewport};
pub use overlap::{find_overlaps, intersection_of, FidelityMode, OverlapOptions, OverlapPair};

use crate::zones::Polygon;
use thiserror::Error;

/// Default area threshold below which an intersection counts as empty,
/// in input coordinate units squared.
pub const DEFAULT_AREA_EPSILON: f64 = 1e-4;

/// Errors from the geometry engine. All are deterministic functions of
/// the input; none are transient.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The combined extent of the input collapses to zero width or height,
    /// so the viewport transform would divide by zero.
    #[error("degenerate extent: input spans {width} x {height}")]
    DegenerateExtent { width: f64, height: f64 },

    /// A polygon with fewer than 3 vertices was supplied.
    #[error("invalid polygon: {count} vertices, need at least 3")]
    InvalidPolygon { count: usize },
}

/// Reject rings that cannot enclose area before any computation
pub(crate) fn ensure_ring(polygon: &Polygon) -> Result<(), GeometryError> {
    if polygon.vertices.len() < 3 {
        return Err(GeometryError::InvalidPolygon {
            count: polygon.vertices.len(),
        });
    }
    Ok(())
}
