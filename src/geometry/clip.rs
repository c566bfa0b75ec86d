use super::{ensure_ring, BoundingBox, GeometryError};
use crate::zones::{Point, Polygon};
use std::cmp::Ordering;

/// Parametric tolerance: a crossing counts as proper only when it falls
/// strictly inside both edges.
const PARAM_EPS: f64 = 1e-9;

/// Distance tolerance for the point-on-boundary test
const BOUNDARY_EPS: f64 = 1e-9;

/// Compute the exact intersection region of two simple polygons.
///
/// General clipping in the Greiner-Hormann style: proper edge crossings are
/// inserted into both rings, marked entry/exit by alternation, and the
/// result rings traced by switching rings at each crossing. Non-convex
/// operands are handled; holes are not (single outer ring per polygon).
///
/// Returns `None` when the polygons do not overlap, or when every resulting
/// region has area at or below `area_epsilon` (in input coordinate units
/// squared) — edge-touching slivers are not overlaps. If the intersection
/// has several disjoint components, the largest one is returned.
pub fn intersect(
    a: &Polygon,
    b: &Polygon,
    area_epsilon: f64,
) -> Result<Option<Polygon>, GeometryError> {
    ensure_ring(a)?;
    ensure_ring(b)?;

    // Cheap rejection: disjoint boxes cannot intersect
    let (Some(bb_a), Some(bb_b)) = (BoundingBox::of(a), BoundingBox::of(b)) else {
        return Ok(None);
    };
    if !bb_a.overlaps(&bb_b) {
        return Ok(None);
    }

    let crossings = find_proper_crossings(a, b);

    // No proper crossings: either one ring fully contains the other, or the
    // contact is boundary-only. An odd count means a grazing degeneracy the
    // alternation cannot classify; fall back to the same containment test.
    if crossings.is_empty() || crossings.len() % 2 != 0 {
        if crossings.len() % 2 != 0 {
            log::debug!(
                "odd crossing count ({}), falling back to containment test",
                crossings.len()
            );
        }
        if ring_within(a, b) {
            return Ok(above_epsilon(a.clone(), area_epsilon));
        }
        if ring_within(b, a) {
            return Ok(above_epsilon(b.clone(), area_epsilon));
        }
        return Ok(None);
    }

    let rings = trace_rings(a, b, &crossings);
    let best = rings
        .into_iter()
        .filter(|ring| ring.area() > area_epsilon)
        .max_by(|p, q| p.area().partial_cmp(&q.area()).unwrap_or(Ordering::Equal));
    Ok(best)
}

fn above_epsilon(polygon: Polygon, area_epsilon: f64) -> Option<Polygon> {
    (polygon.area() > area_epsilon).then_some(polygon)
}

/// A proper crossing between edge `a_edge` of the subject ring and edge
/// `b_edge` of the clip ring, with parametric positions along each.
struct Crossing {
    point: Point,
    a_edge: usize,
    t: f64,
    b_edge: usize,
    u: f64,
}

/// Parametric segment-segment intersection.
/// Returns the intersection point and the parameters along both segments,
/// or None for parallel or non-intersecting segments.
fn segment_intersection(a1: &Point, a2: &Point, b1: &Point, b2: &Point) -> Option<(Point, f64, f64)> {
    let dx1 = a2.x - a1.x;
    let dy1 = a2.y - a1.y;
    let dx2 = b2.x - b1.x;
    let dy2 = b2.y - b1.y;

    let cross = dx1 * dy2 - dy1 * dx2;

    // Parallel lines
    if cross.abs() < 1e-12 {
        return None;
    }

    let dx3 = b1.x - a1.x;
    let dy3 = b1.y - a1.y;

    let t = (dx3 * dy2 - dy3 * dx2) / cross;
    let u = (dx3 * dy1 - dy3 * dx1) / cross;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((Point::new(a1.x + t * dx1, a1.y + t * dy1), t, u))
    } else {
        None
    }
}

fn find_proper_crossings(a: &Polygon, b: &Polygon) -> Vec<Crossing> {
    let mut crossings = Vec::new();
    let na = a.vertices.len();
    let nb = b.vertices.len();

    for i in 0..na {
        let a1 = &a.vertices[i];
        let a2 = &a.vertices[(i + 1) % na];
        for j in 0..nb {
            let b1 = &b.vertices[j];
            let b2 = &b.vertices[(j + 1) % nb];

            if let Some((point, t, u)) = segment_intersection(a1, a2, b1, b2) {
                // Endpoint grazes are handled by the containment fallback
                let proper = t > PARAM_EPS
                    && t < 1.0 - PARAM_EPS
                    && u > PARAM_EPS
                    && u < 1.0 - PARAM_EPS;
                if proper {
                    crossings.push(Crossing {
                        point,
                        a_edge: i,
                        t,
                        b_edge: j,
                        u,
                    });
                }
            }
        }
    }

    crossings
}

/// Distance from a point to a segment (projection clamped to the segment)
fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let ex = b.x - a.x;
    let ey = b.y - a.y;
    let len_sq = ex * ex + ey * ey;
    if len_sq < 1e-18 {
        return p.distance_to(a);
    }

    let t = ((p.x - a.x) * ex + (p.y - a.y) * ey) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let near = Point::new(a.x + t * ex, a.y + t * ey);
    p.distance_to(&near)
}

fn on_boundary(polygon: &Polygon, p: &Point) -> bool {
    polygon
        .edges()
        .any(|(a, b)| distance_to_segment(p, a, b) < BOUNDARY_EPS)
}

/// True iff every vertex of `inner` lies inside or on the boundary of `outer`
fn ring_within(inner: &Polygon, outer: &Polygon) -> bool {
    inner
        .vertices
        .iter()
        .all(|p| outer.contains(p.x, p.y) || on_boundary(outer, p))
}

/// One vertex of an augmented ring: an original polygon vertex, or an
/// inserted crossing carrying the crossing id shared by both rings.
struct AugVertex {
    point: Point,
    xing: Option<usize>,
}

/// Build the augmented ring for one polygon: original vertices in ring
/// order, with the crossings on each edge inserted sorted by edge parameter.
fn augment(
    polygon: &Polygon,
    crossings: &[Crossing],
    edge_of: impl Fn(&Crossing) -> usize,
    param_of: impl Fn(&Crossing) -> f64,
) -> (Vec<AugVertex>, Vec<usize>) {
    let n = polygon.vertices.len();
    let mut ring = Vec::with_capacity(n + crossings.len());
    let mut position = vec![0usize; crossings.len()];

    for i in 0..n {
        ring.push(AugVertex {
            point: polygon.vertices[i],
            xing: None,
        });

        let mut on_edge: Vec<usize> = (0..crossings.len())
            .filter(|&c| edge_of(&crossings[c]) == i)
            .collect();
        on_edge.sort_by(|&p, &q| {
            param_of(&crossings[p])
                .partial_cmp(&param_of(&crossings[q]))
                .unwrap_or(Ordering::Equal)
        });

        for c in on_edge {
            position[c] = ring.len();
            ring.push(AugVertex {
                point: crossings[c].point,
                xing: Some(c),
            });
        }
    }

    (ring, position)
}

/// Mark each crossing as an entry into (or exit out of) `other`, walking the
/// augmented ring and alternating from the inside-ness of its first vertex.
fn mark_entries(ring: &[AugVertex], other: &Polygon, count: usize) -> Vec<bool> {
    let mut entry = vec![false; count];
    let start = &ring[0].point;
    let mut inside = other.contains(start.x, start.y);

    for v in ring {
        if let Some(c) = v.xing {
            entry[c] = !inside;
            inside = !inside;
        }
    }

    entry
}

/// Trace the intersection rings: start at an unvisited crossing, walk
/// forward after an entry and backward after an exit, and switch to the
/// other ring at every crossing, until the start crossing comes around.
fn trace_rings(a: &Polygon, b: &Polygon, crossings: &[Crossing]) -> Vec<Polygon> {
    let (ring_a, pos_a) = augment(a, crossings, |c| c.a_edge, |c| c.t);
    let (ring_b, pos_b) = augment(b, crossings, |c| c.b_edge, |c| c.u);

    let entry_a = mark_entries(&ring_a, b, crossings.len());
    let entry_b = mark_entries(&ring_b, a, crossings.len());

    let mut visited = vec![false; crossings.len()];
    let mut results = Vec::new();

    for start in 0..crossings.len() {
        if visited[start] {
            continue;
        }

        let mut points: Vec<Point> = Vec::new();
        let mut on_a = true;
        let mut idx = pos_a[start];
        // Guard against pathological inputs that never close the ring
        let mut steps = 0usize;
        let budget = 2 * (ring_a.len() + ring_b.len());

        loop {
            let (ring, entry) = if on_a {
                (&ring_a, &entry_a)
            } else {
                (&ring_b, &entry_b)
            };
            let Some(xing) = ring[idx].xing else { break };

            if xing == start && !points.is_empty() {
                break;
            }
            visited[xing] = true;
            points.push(ring[idx].point);
            steps += 1;
            if steps > budget {
                log::debug!("clip traversal exceeded step budget, dropping ring");
                points.clear();
                break;
            }

            let forward = entry[xing];
            let len = ring.len();
            loop {
                idx = if forward {
                    (idx + 1) % len
                } else {
                    (idx + len - 1) % len
                };
                if ring[idx].xing.is_some() {
                    break;
                }
                points.push(ring[idx].point);
                steps += 1;
                if steps > budget {
                    log::debug!("clip traversal exceeded step budget, dropping ring");
                    points.clear();
                    break;
                }
            }
            if points.is_empty() {
                break;
            }

            // Jump to the same crossing on the other ring
            let Some(xing) = ring[idx].xing else { break };
            idx = if on_a { pos_b[xing] } else { pos_a[xing] };
            on_a = !on_a;
        }

        dedup_ring(&mut points);
        if points.len() >= 3 {
            results.push(Polygon::from_vertices(points));
        }
    }

    results
}

/// Drop consecutive duplicate points, including a duplicated closing point
fn dedup_ring(points: &mut Vec<Point>) {
    points.dedup_by(|p, q| p.distance_to(q) < BOUNDARY_EPS);
    while points.len() > 1 && points[0].distance_to(&points[points.len() - 1]) < BOUNDARY_EPS {
        points.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_AREA_EPSILON;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::from_coords(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
    }

    fn has_vertex(polygon: &Polygon, x: f64, y: f64) -> bool {
        polygon
            .vertices
            .iter()
            .any(|v| (v.x - x).abs() < 1e-9 && (v.y - y).abs() < 1e-9)
    }

    #[test]
    fn test_overlapping_squares() {
        // The canonical zone scenario: 4x4 square at the origin against a
        // 4x4 square shifted by (2,2); the overlap is the 2x2 square between.
        let z1 = square(0.0, 0.0, 4.0, 4.0);
        let z2 = square(2.0, 2.0, 6.0, 6.0);

        let hit = intersect(&z1, &z2, DEFAULT_AREA_EPSILON).unwrap().unwrap();
        assert_eq!(hit.vertices.len(), 4);
        assert!((hit.area() - 4.0).abs() < 1e-9);
        for (x, y) in [(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)] {
            assert!(has_vertex(&hit, x, y), "missing corner ({x}, {y})");
        }
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let z1 = square(0.0, 0.0, 4.0, 4.0);
        let z2 = square(2.0, 2.0, 6.0, 6.0);
        let ab = intersect(&z1, &z2, DEFAULT_AREA_EPSILON).unwrap().unwrap();
        let ba = intersect(&z2, &z1, DEFAULT_AREA_EPSILON).unwrap().unwrap();
        assert!((ab.area() - ba.area()).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_squares() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(10.0, 10.0, 11.0, 11.0);
        assert!(intersect(&a, &b, DEFAULT_AREA_EPSILON).unwrap().is_none());
    }

    #[test]
    fn test_identical_polygons() {
        let a = square(1.0, 1.0, 5.0, 3.0);
        let hit = intersect(&a, &a.clone(), DEFAULT_AREA_EPSILON)
            .unwrap()
            .unwrap();
        assert!((hit.area() - a.area()).abs() < DEFAULT_AREA_EPSILON);
    }

    #[test]
    fn test_contained_polygon() {
        let outer = square(0.0, 0.0, 10.0, 10.0);
        let inner = square(2.0, 2.0, 3.0, 3.0);
        let hit = intersect(&outer, &inner, DEFAULT_AREA_EPSILON)
            .unwrap()
            .unwrap();
        assert!((hit.area() - 1.0).abs() < 1e-9);

        let hit = intersect(&inner, &outer, DEFAULT_AREA_EPSILON)
            .unwrap()
            .unwrap();
        assert!((hit.area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_touching_squares_do_not_intersect() {
        // Shared edge, zero-area contact
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(1.0, 0.0, 2.0, 1.0);
        assert!(intersect(&a, &b, DEFAULT_AREA_EPSILON).unwrap().is_none());
    }

    #[test]
    fn test_nonconvex_clip() {
        // L-shape (bottom strip + left strip of a 4x4 cell) against a square
        // straddling the notch; the overlap is itself L-shaped, area 3.
        let ell = Polygon::from_coords(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ]);
        let sq = square(1.0, 1.0, 3.0, 3.0);

        let hit = intersect(&ell, &sq, DEFAULT_AREA_EPSILON).unwrap().unwrap();
        assert!((hit.area() - 3.0).abs() < 1e-9);
        assert!(has_vertex(&hit, 3.0, 2.0));
        assert!(has_vertex(&hit, 2.0, 3.0));
        assert!(has_vertex(&hit, 2.0, 2.0));
    }

    #[test]
    fn test_sliver_below_epsilon_is_empty() {
        // The shapes overlap in a 0.0001 x 0.5 strip: area 5e-5 < 1e-4
        let a = square(0.0, 0.0, 1.0, 0.5);
        let b = square(1.0 - 1e-4, -1.0, 2.0, 1.0);
        assert!(intersect(&a, &b, DEFAULT_AREA_EPSILON).unwrap().is_none());
        // A looser epsilon admits it
        let sliver = intersect(&a, &b, 1e-6).unwrap().unwrap();
        assert!((sliver.area() - 5e-5).abs() < 1e-9);
    }

    #[test]
    fn test_prefilter_soundness() {
        // Disjoint bounding boxes imply an empty exact intersection
        let a = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]);
        let b = Polygon::from_coords(&[(5.0, 5.0), (6.0, 5.0), (5.5, 6.0)]);
        let (bb_a, bb_b) = (BoundingBox::of(&a).unwrap(), BoundingBox::of(&b).unwrap());
        assert!(!bb_a.overlaps(&bb_b));
        assert!(intersect(&a, &b, DEFAULT_AREA_EPSILON).unwrap().is_none());
    }

    #[test]
    fn test_bbox_overlap_but_no_intersection() {
        // Two triangles hugging opposite corners of the same cell: their
        // boxes overlap, the shapes do not.
        let lower = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
        let upper = Polygon::from_coords(&[(4.0, 4.0), (3.9, 4.0), (4.0, 3.9)]);
        let (bb_a, bb_b) = (
            BoundingBox::of(&lower).unwrap(),
            BoundingBox::of(&upper).unwrap(),
        );
        assert!(bb_a.overlaps(&bb_b));
        assert!(intersect(&lower, &upper, DEFAULT_AREA_EPSILON)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_invalid_polygon_rejected() {
        let stub = Polygon::from_coords(&[(0.0, 0.0), (1.0, 1.0)]);
        let ok = square(0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            intersect(&stub, &ok, DEFAULT_AREA_EPSILON).unwrap_err(),
            GeometryError::InvalidPolygon { count: 2 }
        );
        assert!(intersect(&ok, &stub, DEFAULT_AREA_EPSILON).is_err());
    }

    #[test]
    fn test_segment_intersection_parametric() {
        let hit = segment_intersection(
            &Point::new(0.0, 0.0),
            &Point::new(4.0, 0.0),
            &Point::new(2.0, -1.0),
            &Point::new(2.0, 1.0),
        )
        .unwrap();
        assert!((hit.0.x - 2.0).abs() < 1e-12);
        assert!((hit.0.y).abs() < 1e-12);
        assert!((hit.1 - 0.5).abs() < 1e-12);
        assert!((hit.2 - 0.5).abs() < 1e-12);

        // Parallel segments
        assert!(segment_intersection(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::new(0.0, 1.0),
            &Point::new(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        assert!((distance_to_segment(&Point::new(2.0, 3.0), &a, &b) - 3.0).abs() < 1e-12);
        // Beyond the endpoint the distance is to the endpoint itself
        assert!((distance_to_segment(&Point::new(5.0, 0.0), &a, &b) - 1.0).abs() < 1e-12);
    }
}
