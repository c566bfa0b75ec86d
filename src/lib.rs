//! zonemap: overlap detection and canvas-style rendering for named
//! polygonal zones.
//!
//! The geometry engine (normalization, bounding boxes, exact clipping,
//! pairwise overlap detection) is a set of pure functions with no shared
//! state and no side effects; drawing goes through the [`render::Renderer`]
//! collaborator trait.

pub mod geometry;
pub mod render;
pub mod zones;

pub use geometry::{
    find_overlaps, intersect, intersection_of, normalize, BoundingBox, FidelityMode,
    GeometryError, OverlapOptions, OverlapPair, Viewport, DEFAULT_AREA_EPSILON,
};
pub use render::{
    draw_overlap_detail, draw_zones, overlap_report, DetailStyle, Renderer, Style, SvgCanvas,
};
pub use zones::{Point, Polygon, Zone, ZoneError, ZoneRecord, ZoneSet};
