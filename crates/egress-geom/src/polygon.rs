//! Simple polygons with validated construction and boundary-inclusive
//! containment.

use crate::error::GeomError;
use crate::point::{BoundingBox, Point};

/// Tolerance for classifying a point as lying on a polygon boundary.
///
/// Both the on-boundary test and the ray-casting parity test use this
/// constant, so boundary classification is deterministic: a point within
/// `BOUNDARY_EPS` of any edge counts as inside.
pub const BOUNDARY_EPS: f64 = 1e-9;

/// Minimum absolute area (m^2) for a polygon to be considered non-degenerate.
pub const MIN_POLYGON_AREA: f64 = 1e-6;

/// A simple (non-self-intersecting) polygon with at least three vertices.
///
/// Vertex order may be clockwise or counter-clockwise; containment and area
/// are orientation-independent. Construction validates the invariants, so a
/// `Polygon` value is always usable for rasterization.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Validate and construct a polygon.
    ///
    /// Rejects rings with fewer than three vertices, non-finite
    /// coordinates, near-zero enclosed area, or crossing edges.
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeomError> {
        if vertices.len() < 3 {
            return Err(GeomError::TooFewVertices {
                count: vertices.len(),
            });
        }
        for (index, v) in vertices.iter().enumerate() {
            if !v.is_finite() {
                return Err(GeomError::NonFiniteVertex { index });
            }
        }
        let poly = Self { vertices };
        if let Some((edge_a, edge_b)) = poly.find_self_intersection() {
            return Err(GeomError::SelfIntersecting { edge_a, edge_b });
        }
        let area = poly.area();
        if area < MIN_POLYGON_AREA {
            return Err(GeomError::DegenerateArea { area });
        }
        Ok(poly)
    }

    /// The vertex ring.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Absolute enclosed area (shoelace formula), in square metres.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let mut twice = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            twice += a.x * b.y - b.x * a.y;
        }
        twice.abs() / 2.0
    }

    /// Bounding box of the vertex ring.
    pub fn bbox(&self) -> BoundingBox {
        // Construction guarantees >= 3 vertices.
        BoundingBox::of(&self.vertices).unwrap_or(BoundingBox {
            min: Point::default(),
            max: Point::default(),
        })
    }

    /// Boundary-inclusive containment test.
    ///
    /// Ray casting with an even-odd rule; points within [`BOUNDARY_EPS`] of
    /// any edge classify as inside so that cells straddling a shared wall
    /// between spaces stay walkable on both sides.
    pub fn contains(&self, p: Point) -> bool {
        if self.on_boundary(p) {
            return true;
        }
        let n = self.vertices.len();
        let mut inside = false;
        let mut a = self.vertices[n - 1];
        for i in 0..n {
            let b = self.vertices[i];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            a = b;
        }
        inside
    }

    /// Whether `p` lies within [`BOUNDARY_EPS`] of any edge.
    pub fn on_boundary(&self, p: Point) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if point_segment_distance(p, a, b) <= BOUNDARY_EPS {
                return true;
            }
        }
        false
    }

    /// Nearest point on the polygon boundary to `p`.
    ///
    /// Used to pull door placements that sit inside wall volumes back onto
    /// the space outline before grid snapping. If `p` is already inside,
    /// it is returned unchanged.
    pub fn project_to_boundary(&self, p: Point) -> Point {
        if self.contains(p) {
            return p;
        }
        let n = self.vertices.len();
        let mut best = self.vertices[0];
        let mut best_d = f64::INFINITY;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let q = closest_point_on_segment(p, a, b);
            let d = p.distance(q);
            if d < best_d {
                best_d = d;
                best = q;
            }
        }
        best
    }

    /// First pair of non-adjacent crossing edges, if any.
    fn find_self_intersection(&self) -> Option<(usize, usize)> {
        let n = self.vertices.len();
        for i in 0..n {
            let a1 = self.vertices[i];
            let a2 = self.vertices[(i + 1) % n];
            for j in (i + 2)..n {
                // Skip adjacent edges (shared vertex), including the
                // wrap-around pair (last edge, first edge).
                if i == 0 && j == n - 1 {
                    continue;
                }
                let b1 = self.vertices[j];
                let b2 = self.vertices[(j + 1) % n];
                if segments_cross(a1, a2, b1, b2) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

/// Distance from `p` to the closed segment `ab`.
fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    p.distance(closest_point_on_segment(p, a, b))
}

/// Closest point to `p` on the closed segment `ab`.
fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 <= f64::EPSILON {
        return a;
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len2).clamp(0.0, 1.0);
    Point::new(a.x + t * ab.x, a.y + t * ab.y)
}

/// Cross product of `(b - a)` and `(c - a)`.
fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Proper crossing test for two segments (endpoint touches do not count).
fn segments_cross(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);
    ((d1 > BOUNDARY_EPS && d2 < -BOUNDARY_EPS) || (d1 < -BOUNDARY_EPS && d2 > BOUNDARY_EPS))
        && ((d3 > BOUNDARY_EPS && d4 < -BOUNDARY_EPS) || (d3 < -BOUNDARY_EPS && d4 > BOUNDARY_EPS))
}
