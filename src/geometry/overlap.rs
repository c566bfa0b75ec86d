use super::{ensure_ring, intersect, BoundingBox, GeometryError, DEFAULT_AREA_EPSILON};
use crate::zones::{Polygon, Zone};

/// How overlap regions are computed.
///
/// The approximate mode exists for callers that only need the overlap
/// rectangle; it overstates the overlap area for non-rectangular shapes, so
/// it must be selected explicitly and is never silently substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FidelityMode {
    /// Approximate the overlap as the bounding-box overlap rectangle
    BoundingBox,
    /// Exact polygon clipping
    Exact,
}

/// Options for overlap detection and intersection queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapOptions {
    pub mode: FidelityMode,
    /// Intersections with area at or below this (input units squared) are
    /// treated as no-overlap, suppressing floating-point edge slivers.
    pub area_epsilon: f64,
}

impl Default for OverlapOptions {
    fn default() -> Self {
        Self {
            mode: FidelityMode::Exact,
            area_epsilon: DEFAULT_AREA_EPSILON,
        }
    }
}

impl OverlapOptions {
    pub fn bounding_box() -> Self {
        Self {
            mode: FidelityMode::BoundingBox,
            ..Self::default()
        }
    }

    pub fn with_area_epsilon(mut self, area_epsilon: f64) -> Self {
        self.area_epsilon = area_epsilon;
        self
    }
}

/// An unordered pair of overlapping zones; `zone_a` is the one appearing
/// first in the caller's input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapPair {
    pub zone_a: String,
    pub zone_b: String,
}

/// Find every pair of zones whose polygons overlap in area.
///
/// Enumerates all unordered pairs `(i, j)` with `i < j` in input order, and
/// emits pairs in that same order, so the output is stable and reproducible
/// for identical input. Bounding boxes reject non-candidates before any
/// clipping work; the box check is the seam where a spatial index would go
/// if zone counts ever warrant one.
pub fn find_overlaps(
    zones: &[Zone],
    options: &OverlapOptions,
) -> Result<Vec<OverlapPair>, GeometryError> {
    let mut boxes = Vec::with_capacity(zones.len());
    for zone in zones {
        ensure_ring(&zone.polygon)?;
        boxes.push(
            BoundingBox::of(&zone.polygon)
                .ok_or(GeometryError::InvalidPolygon { count: 0 })?,
        );
    }

    let mut pairs = Vec::new();
    for i in 0..zones.len() {
        for j in (i + 1)..zones.len() {
            if !boxes[i].overlaps(&boxes[j]) {
                continue;
            }

            let overlapping = match options.mode {
                FidelityMode::BoundingBox => true,
                FidelityMode::Exact => {
                    intersect(&zones[i].polygon, &zones[j].polygon, options.area_epsilon)?
                        .is_some()
                }
            };

            if overlapping {
                log::debug!("overlap: '{}' and '{}'", zones[i].name, zones[j].name);
                pairs.push(OverlapPair {
                    zone_a: zones[i].name.clone(),
                    zone_b: zones[j].name.clone(),
                });
            }
        }
    }

    Ok(pairs)
}

/// The overlap region of a single pair, for detail views that recompute one
/// intersection independently of the batch detector.
///
/// Bounding-box mode yields the four corners of the overlapping box; exact
/// mode the clipped polygon. `None` when the polygons do not overlap.
pub fn intersection_of(
    a: &Polygon,
    b: &Polygon,
    options: &OverlapOptions,
) -> Result<Option<Polygon>, GeometryError> {
    match options.mode {
        FidelityMode::BoundingBox => {
            ensure_ring(a)?;
            ensure_ring(b)?;
            let (Some(bb_a), Some(bb_b)) = (BoundingBox::of(a), BoundingBox::of(b)) else {
                return Ok(None);
            };
            Ok(bb_a.intersection(&bb_b).map(|bb| bb.to_polygon()))
        }
        FidelityMode::Exact => intersect(a, b, options.area_epsilon),
    }
}
