use super::{BoundingBox, GeometryError};
use crate::zones::{Point, Polygon};

/// Target pixel viewport for coordinate normalization
///
/// Margins are per-axis so callers can tune horizontal and vertical padding
/// independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl Viewport {
    /// A viewport with the same margin on both axes
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin_x: margin,
            margin_y: margin,
        }
    }

    pub fn with_margins(width: f64, height: f64, margin_x: f64, margin_y: f64) -> Self {
        Self {
            width,
            height,
            margin_x,
            margin_y,
        }
    }

    /// Usable drawing width inside the margins
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.margin_x
    }

    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.margin_y
    }
}

/// Affine-map a batch of polygons from their native coordinate space into
/// the viewport, preserving relative shape.
///
/// The scale is computed from the combined bounding box over ALL input
/// polygons, so shapes stay spatially comparable after the transform. The
/// vertical axis is inverted: the source's Y (e.g. latitude) grows upward
/// while screen Y grows downward.
///
/// Output preserves polygon count and per-polygon vertex count and order.
/// Fails with `DegenerateExtent` when all input points share an X or Y
/// value, rather than emitting NaN or infinite coordinates.
pub fn normalize(polygons: &[Polygon], viewport: &Viewport) -> Result<Vec<Polygon>, GeometryError> {
    for polygon in polygons {
        super::ensure_ring(polygon)?;
    }

    let extent = combined_extent(polygons).ok_or(GeometryError::DegenerateExtent {
        width: 0.0,
        height: 0.0,
    })?;

    let span_x = extent.width();
    let span_y = extent.height();
    if span_x == 0.0 || span_y == 0.0 {
        return Err(GeometryError::DegenerateExtent {
            width: span_x,
            height: span_y,
        });
    }

    let out = polygons
        .iter()
        .map(|polygon| {
            let vertices = polygon
                .vertices
                .iter()
                .map(|p| {
                    Point::new(
                        (p.x - extent.min_x) / span_x * viewport.inner_width() + viewport.margin_x,
                        (extent.max_y - p.y) / span_y * viewport.inner_height()
                            + viewport.margin_y,
                    )
                })
                .collect();
            Polygon::from_vertices(vertices)
        })
        .collect();

    Ok(out)
}

/// Combined bounding box over every vertex of every polygon
pub(crate) fn combined_extent(polygons: &[Polygon]) -> Option<BoundingBox> {
    let mut boxes = polygons.iter().filter_map(BoundingBox::of);
    let first = boxes.next()?;
    Some(boxes.fold(first, |acc, bb| BoundingBox {
        min_x: acc.min_x.min(bb.min_x),
        max_x: acc.max_x.max(bb.max_x),
        min_y: acc.min_y.min(bb.min_y),
        max_y: acc.max_y.max(bb.max_y),
    }))
}
