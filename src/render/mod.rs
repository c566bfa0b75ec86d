//! The rendering collaborator: the engine hands over normalized polygon
//! coordinate sequences and overlap pairs as plain data, and everything
//! that touches an output surface lives behind the `Renderer` trait.

mod svg;

pub use svg::SvgCanvas;

use crate::geometry::{intersection_of, normalize, GeometryError, OverlapOptions, Viewport};
use crate::zones::{Polygon, Zone};

/// Stroke/fill styling for one drawn polygon
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub stroke_width: f64,
}

impl Style {
    /// Outline-only style
    pub fn stroke(color: impl Into<String>) -> Self {
        Self {
            stroke: Some(color.into()),
            fill: None,
            stroke_width: 1.0,
        }
    }

    /// Filled style
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            stroke: None,
            fill: Some(color.into()),
            stroke_width: 1.0,
        }
    }
}

/// Anything that can draw a polygon in screen coordinates.
/// The geometry engine never draws; it only feeds implementations of this.
pub trait Renderer {
    fn draw(&mut self, polygon: &Polygon, style: &Style);
}

/// Styles for the overlap detail view
#[derive(Debug, Clone)]
pub struct DetailStyle {
    pub zone_a: Style,
    pub zone_b: Style,
    pub overlap: Style,
}

impl Default for DetailStyle {
    fn default() -> Self {
        Self {
            zone_a: Style::stroke("blue"),
            zone_b: Style::stroke("red"),
            overlap: Style::fill("yellow"),
        }
    }
}

/// Draw every zone into the viewport with one shared scale
pub fn draw_zones(
    renderer: &mut impl Renderer,
    zones: &[Zone],
    viewport: &Viewport,
    style: &Style,
) -> Result<(), GeometryError> {
    let polygons: Vec<Polygon> = zones.iter().map(|z| z.polygon.clone()).collect();
    for polygon in &normalize(&polygons, viewport)? {
        renderer.draw(polygon, style);
    }
    Ok(())
}

/// Draw one zone pair and highlight their overlap region.
///
/// The two zones and the intersection are normalized together, so the
/// highlight lands exactly where the zones overlap on screen. (Adding the
/// intersection to the batch cannot change the combined extent, since it
/// is contained in both zones.)
pub fn draw_overlap_detail(
    renderer: &mut impl Renderer,
    zone_a: &Zone,
    zone_b: &Zone,
    viewport: &Viewport,
    options: &OverlapOptions,
    styles: &DetailStyle,
) -> Result<(), GeometryError> {
    let overlap = intersection_of(&zone_a.polygon, &zone_b.polygon, options)?;

    let mut batch = vec![zone_a.polygon.clone(), zone_b.polygon.clone()];
    if let Some(region) = overlap {
        batch.push(region);
    }
    let normalized = normalize(&batch, viewport)?;

    renderer.draw(&normalized[0], &styles.zone_a);
    renderer.draw(&normalized[1], &styles.zone_b);
    if let Some(region) = normalized.get(2) {
        renderer.draw(region, &styles.overlap);
    }
    Ok(())
}

/// Human-readable overlap report lines, in detector order, for the
/// link-building collaborator.
pub fn overlap_report(
    zones: &[Zone],
    options: &OverlapOptions,
) -> Result<Vec<String>, GeometryError> {
    let pairs = crate::geometry::find_overlaps(zones, options)?;
    Ok(pairs
        .iter()
        .map(|p| format!("{} overlaps with {}", p.zone_a, p.zone_b))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draw calls instead of producing output
    struct RecordingRenderer {
        calls: Vec<(Polygon, Style)>,
    }

    impl RecordingRenderer {
        fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl Renderer for RecordingRenderer {
        fn draw(&mut self, polygon: &Polygon, style: &Style) {
            self.calls.push((polygon.clone(), style.clone()));
        }
    }

    fn square_zone(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Zone {
        Zone::new(
            name,
            Polygon::from_coords(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)]),
        )
    }

    #[test]
    fn test_draw_zones_one_call_per_zone() {
        let zones = [
            square_zone("a", 0.0, 0.0, 4.0, 4.0),
            square_zone("b", 2.0, 2.0, 6.0, 6.0),
        ];
        let mut renderer = RecordingRenderer::new();
        draw_zones(
            &mut renderer,
            &zones,
            &Viewport::new(640.0, 480.0, 50.0),
            &Style::stroke("blue"),
        )
        .unwrap();

        assert_eq!(renderer.calls.len(), 2);
        // All screen coordinates stay inside the viewport
        for (polygon, _) in &renderer.calls {
            for v in &polygon.vertices {
                assert!(v.x >= 50.0 && v.x <= 590.0);
                assert!(v.y >= 50.0 && v.y <= 430.0);
            }
        }
    }

    #[test]
    fn test_detail_draws_both_zones_and_overlap() {
        let a = square_zone("Z1", 0.0, 0.0, 4.0, 4.0);
        let b = square_zone("Z2", 2.0, 2.0, 6.0, 6.0);
        let mut renderer = RecordingRenderer::new();
        draw_overlap_detail(
            &mut renderer,
            &a,
            &b,
            &Viewport::new(600.0, 600.0, 50.0),
            &OverlapOptions::default(),
            &DetailStyle::default(),
        )
        .unwrap();

        assert_eq!(renderer.calls.len(), 3);
        assert_eq!(renderer.calls[2].1, Style::fill("yellow"));

        // The highlight is normalized in the shared extent (0..6 on both
        // axes into a 500px inner area), not re-fit to the canvas on its
        // own: source (2,2) lands at (216.67, 383.33), (4,4) at its mirror.
        let overlap = &renderer.calls[2].0;
        assert_eq!(overlap.vertices.len(), 4);
        let has_near = |x: f64, y: f64| {
            overlap
                .vertices
                .iter()
                .any(|v| (v.x - x).abs() < 1e-3 && (v.y - y).abs() < 1e-3)
        };
        assert!(has_near(50.0 + 2.0 / 6.0 * 500.0, 50.0 + 4.0 / 6.0 * 500.0));
        assert!(has_near(50.0 + 4.0 / 6.0 * 500.0, 50.0 + 2.0 / 6.0 * 500.0));
    }

    #[test]
    fn test_detail_without_overlap_draws_two() {
        let a = square_zone("a", 0.0, 0.0, 1.0, 1.0);
        let b = square_zone("b", 10.0, 10.0, 11.0, 11.0);
        let mut renderer = RecordingRenderer::new();
        draw_overlap_detail(
            &mut renderer,
            &a,
            &b,
            &Viewport::new(600.0, 600.0, 50.0),
            &OverlapOptions::default(),
            &DetailStyle::default(),
        )
        .unwrap();
        assert_eq!(renderer.calls.len(), 2);
    }

    #[test]
    fn test_overlap_report_lines() {
        let zones = [
            square_zone("Z1", 0.0, 0.0, 4.0, 4.0),
            square_zone("Z2", 2.0, 2.0, 6.0, 6.0),
            square_zone("Z3", 100.0, 100.0, 101.0, 101.0),
        ];
        let lines = overlap_report(&zones, &OverlapOptions::default()).unwrap();
        assert_eq!(lines, vec!["Z1 overlaps with Z2".to_string()]);
    }
}
