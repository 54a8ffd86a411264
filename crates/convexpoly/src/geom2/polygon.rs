//! Convex polygon in V-representation (`ConvexPolygon`).
//!
//! Invariants
//! - `vertices` are distinct and in strict CCW order, forming the convex hull of
//!   the point set that produced them. 0, 1 or 2 vertices are allowed and
//!   stand for an empty set, a point or a segment.
//! - The vertex sequence is never edited in place: combinators replace it
//!   wholesale with a freshly computed hull.
//! - Color is display-only and never affects geometry.
//!
//! Numerics
//! - All orientation and equality tests use `GeomCfg::eps` of the polygon on
//!   which the method is called.
//! - Area and point containment decompose the polygon into triangles fanned
//!   from vertex 0, addressed by index ranges into the vertex buffer.
//!
//! Code cross-refs: `hull::convex_hull`, `util::{cross, segment_intersection}`

use std::ops::{BitAnd, BitOr};

use super::hull::convex_hull;
use super::types::{distance, Color, GeomCfg, Point};
use super::util::{approx_eq, cmp_lex_eps, cross, segment_intersection};

/// Convex polygon with CCW vertices and an optional display color.
#[derive(Clone, Debug, Default)]
pub struct ConvexPolygon {
    vertices: Vec<Point>,
    color: Option<Color>,
    cfg: GeomCfg,
}

impl ConvexPolygon {
    /// Convex hull of an arbitrary point set, default tolerances.
    pub fn new(points: &[Point]) -> Self {
        Self::with_cfg(points, GeomCfg::default())
    }

    /// Convex hull of an arbitrary point set.
    pub fn with_cfg(points: &[Point], cfg: GeomCfg) -> Self {
        Self {
            vertices: convex_hull(points, cfg),
            color: None,
            cfg,
        }
    }

    /// Fast path for points already known to form a strict CCW hull
    /// (e.g. polygons reloaded from a file written by this crate).
    ///
    /// The hull is not recomputed; only the starting vertex is rotated to the
    /// lexicographically smallest one so the sequence is canonical.
    pub fn from_hull(points: Vec<Point>) -> Self {
        Self::from_hull_with_cfg(points, GeomCfg::default())
    }

    pub fn from_hull_with_cfg(mut points: Vec<Point>, cfg: GeomCfg) -> Self {
        let start = points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| cmp_lex_eps(**a, **b, cfg.eps))
            .map(|(i, _)| i)
            .unwrap_or(0);
        points.rotate_left(start);
        Self {
            vertices: points,
            color: None,
            cfg,
        }
    }

    /// Vertices in CCW order.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn cfg(&self) -> GeomCfg {
        self.cfg
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    /// Directed boundary edges. A segment has a single edge; a point or an
    /// empty polygon has none.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        let count = match n {
            0 | 1 => 0,
            2 => 1,
            _ => n,
        };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Sum of consecutive vertex distances, closing the loop.
    pub fn perimeter(&self) -> f64 {
        let n = self.vertices.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| distance(self.vertices[i], self.vertices[(i + 1) % n]))
            .sum()
    }

    /// Area as a sum of Heron triangles fanned from vertex 0.
    ///
    /// Peels the ear `(v0, v[k-1], v[k])` off the end until a single triangle is
    /// left; convexity makes the fan a valid triangulation.
    pub fn area(&self) -> f64 {
        let v = &self.vertices;
        if v.len() < 3 {
            return 0.0;
        }
        (2..v.len())
            .rev()
            .map(|k| heron(v[0], v[k - 1], v[k]))
            .sum()
    }

    /// Vertex centroid (mean of the vertices), not the area centroid.
    ///
    /// `None` for an empty polygon.
    pub fn centroid(&self) -> Option<Point> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self.vertices.iter().fold(Point::zeros(), |acc, p| acc + p);
        Some(sum / self.vertices.len() as f64)
    }

    /// Equal edge lengths and equal turns at every vertex.
    ///
    /// Turns are compared through `|cross|` of consecutive vertex triples, which
    /// is `|e_i| |e_{i+1}| sin θ_i`, and through the chord `v[i] → v[i+2]`.
    /// Comparisons are relative, within `GeomCfg::eps_regular`.
    pub fn is_regular(&self) -> bool {
        let v = &self.vertices;
        let n = v.len();
        if n < 3 {
            return false;
        }
        let tol = self.cfg.eps_regular;
        let edge = |i: usize| distance(v[i], v[(i + 1) % n]);
        let turn = |i: usize| cross(v[i], v[(i + 1) % n], v[(i + 2) % n]).abs();
        // sin θ = sin(π − θ): a rhombus passes the cross test, not the chord test.
        let chord = |i: usize| distance(v[i], v[(i + 2) % n]);
        let all_equal = |f: &dyn Fn(usize) -> f64| {
            let f0 = f(0);
            (1..n).all(|i| rel_eq(f(i), f0, tol))
        };
        all_equal(&edge) && all_equal(&turn) && all_equal(&chord)
    }

    /// Closed containment test (boundary counts as inside).
    ///
    /// - 0 vertices: nothing is inside.
    /// - 1 vertex: coincidence within `eps`.
    /// - 2 vertices: collinear with the segment and within its extent.
    /// - 3+ vertices: recursive split of the fan from vertex 0 at the middle of
    ///   the remaining range, giving O(log n) recursion depth.
    pub fn contains_point(&self, p: Point) -> bool {
        let v = &self.vertices;
        let eps = self.cfg.eps;
        match v.len() {
            0 => false,
            1 => approx_eq(v[0], p, eps),
            2 => on_segment(v[0], v[1], p, eps),
            3 => point_in_triangle(v[0], v[1], v[2], p, eps),
            n => self.fan_contains(p, 1, n),
        }
    }

    /// Fan `v0, v[lo], ..., v[hi-1]`.
    fn fan_contains(&self, p: Point, lo: usize, hi: usize) -> bool {
        let v = &self.vertices;
        let eps = self.cfg.eps;
        match hi - lo {
            0 | 1 => false,
            2 => point_in_triangle(v[0], v[lo], v[lo + 1], p, eps),
            count => {
                let mid = lo + count / 2;
                point_in_triangle(v[0], v[mid - 1], v[mid], p, eps)
                    || self.fan_contains(p, lo, mid)
                    || self.fan_contains(p, mid, hi)
            }
        }
    }

    /// True iff every vertex of `self` lies inside `other`.
    ///
    /// Sufficient for full containment because both polygons are convex.
    pub fn is_inside(&self, other: &ConvexPolygon) -> bool {
        self.vertices.iter().all(|&p| other.contains_point(p))
    }

    /// True iff `other` lies inside `self`.
    #[inline]
    pub fn contains_polygon(&self, other: &ConvexPolygon) -> bool {
        other.is_inside(self)
    }

    /// Vertices of `other` that lie inside `self`.
    pub fn points_inside(&self, other: &ConvexPolygon) -> Vec<Point> {
        other
            .vertices
            .iter()
            .copied()
            .filter(|&p| self.contains_point(p))
            .collect()
    }

    /// Convex hull of both vertex sets. Keeps `self`'s color and tolerances.
    pub fn union(&self, other: &ConvexPolygon) -> ConvexPolygon {
        let mut out = self.clone();
        out.union_in_place(other);
        out
    }

    /// Replace `self` with the convex union of `self` and `other`.
    pub fn union_in_place(&mut self, other: &ConvexPolygon) -> &mut Self {
        let mut pts = Vec::with_capacity(self.vertices.len() + other.vertices.len());
        pts.extend_from_slice(&self.vertices);
        pts.extend_from_slice(&other.vertices);
        self.vertices = convex_hull(&pts, self.cfg);
        self
    }

    /// Intersection of two convex polygons. Keeps `self`'s color and tolerances.
    pub fn intersection(&self, other: &ConvexPolygon) -> ConvexPolygon {
        let mut out = self.clone();
        out.intersect_in_place(other);
        out
    }

    /// Replace `self` with its intersection with `other`.
    ///
    /// Candidates: own vertices inside `other`, `other`'s vertices inside
    /// `self`, and every edge/edge crossing point. Their hull is the result.
    pub fn intersect_in_place(&mut self, other: &ConvexPolygon) -> &mut Self {
        let mut pts = self.points_inside(other);
        pts.extend(other.points_inside(self));
        for (r1, r2) in self.edges() {
            for (s1, s2) in other.edges() {
                if let Some(p) = segment_intersection(r1, r2, s1, s2, self.cfg) {
                    pts.push(p);
                }
            }
        }
        self.vertices = convex_hull(&pts, self.cfg);
        self
    }
}

impl FromIterator<Point> for ConvexPolygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let pts: Vec<Point> = iter.into_iter().collect();
        ConvexPolygon::new(&pts)
    }
}

impl BitOr for &ConvexPolygon {
    type Output = ConvexPolygon;
    #[inline]
    fn bitor(self, rhs: &ConvexPolygon) -> ConvexPolygon {
        self.union(rhs)
    }
}

impl BitAnd for &ConvexPolygon {
    type Output = ConvexPolygon;
    #[inline]
    fn bitand(self, rhs: &ConvexPolygon) -> ConvexPolygon {
        self.intersection(rhs)
    }
}

/// Axis-aligned bounding box of all vertices of `polygons`.
///
/// Returns `(rectangle, lower_left, upper_right)`, or `None` when the input
/// holds no vertex at all. The rectangle uses the tolerances of the first
/// polygon and degenerates to a segment or point for flat inputs.
pub fn bounding_box<'a, I>(polygons: I) -> Option<(ConvexPolygon, Point, Point)>
where
    I: IntoIterator<Item = &'a ConvexPolygon>,
{
    let mut cfg = None;
    let mut ll = Point::new(f64::INFINITY, f64::INFINITY);
    let mut ur = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for poly in polygons {
        cfg.get_or_insert(poly.cfg);
        for p in &poly.vertices {
            ll = ll.inf(p);
            ur = ur.sup(p);
        }
    }
    if !(ll.x <= ur.x && ll.y <= ur.y) {
        return None;
    }
    let corners = [ll, Point::new(ur.x, ll.y), ur, Point::new(ll.x, ur.y)];
    let rect = ConvexPolygon::with_cfg(&corners, cfg.unwrap_or_default());
    Some((rect, ll, ur))
}

/// Heron's formula; clamps the radicand against rounding on slivers.
fn heron(a: Point, b: Point, c: Point) -> f64 {
    let (la, lb, lc) = (distance(b, c), distance(a, c), distance(a, b));
    let s = 0.5 * (la + lb + lc);
    (s * (s - la) * (s - lb) * (s - lc)).max(0.0).sqrt()
}

/// `p` on the closed left side of each directed edge of CCW triangle `abc`.
#[inline]
fn point_in_triangle(a: Point, b: Point, c: Point, p: Point, eps: f64) -> bool {
    cross(a, b, p) >= -eps && cross(b, c, p) >= -eps && cross(c, a, p) >= -eps
}

#[inline]
fn on_segment(a: Point, b: Point, p: Point, eps: f64) -> bool {
    cross(a, b, p).abs() <= eps
        && p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

#[inline]
fn rel_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn regular_ngon(n: usize, r: f64) -> ConvexPolygon {
        let pts: Vec<Point> = (0..n)
            .map(|k| {
                let th = std::f64::consts::TAU * k as f64 / n as f64;
                vector![r * th.cos(), r * th.sin()]
            })
            .collect();
        ConvexPolygon::new(&pts)
    }

    #[test]
    fn fan_split_covers_every_triangle() {
        // Probe the centroid of each fan triangle of a 13-gon.
        let poly = regular_ngon(13, 2.0);
        let v = poly.vertices();
        for k in 2..v.len() {
            let c = (v[0] + v[k - 1] + v[k]) / 3.0;
            assert!(poly.contains_point(c), "fan triangle {k} missed");
        }
        assert!(!poly.contains_point(vector![2.5, 0.0]));
        assert!(!poly.contains_point(vector![0.0, -2.1]));
    }

    #[test]
    fn boundary_points_are_inside() {
        let sq = ConvexPolygon::new(&[
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ]);
        assert!(sq.contains_point(vector![0.5, 0.0]));
        assert!(sq.contains_point(vector![1.0, 1.0]));
        assert!(!sq.contains_point(vector![1.0 + 1e-9, 0.5]));
    }

    #[test]
    fn degenerate_containment() {
        let empty = ConvexPolygon::default();
        assert!(!empty.contains_point(vector![0.0, 0.0]));

        let dot = ConvexPolygon::new(&[vector![1.0, 2.0]]);
        assert!(dot.contains_point(vector![1.0, 2.0]));
        assert!(!dot.contains_point(vector![1.0, 2.1]));

        let seg = ConvexPolygon::new(&[vector![0.0, 0.0], vector![2.0, 2.0]]);
        assert!(seg.contains_point(vector![1.0, 1.0]));
        // Collinear but beyond the endpoint.
        assert!(!seg.contains_point(vector![3.0, 3.0]));
    }

    #[test]
    fn from_hull_rotates_to_canonical_start() {
        let p = ConvexPolygon::from_hull(vec![
            vector![1.0, 1.0],
            vector![0.0, 1.0],
            vector![0.0, 0.0],
            vector![1.0, 0.0],
        ]);
        assert_eq!(p.vertices()[0], vector![0.0, 0.0]);
        assert_eq!(p.vertices()[1], vector![1.0, 0.0]);
        assert!((p.area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn edges_of_degenerate_polygons() {
        assert_eq!(ConvexPolygon::default().edges().count(), 0);
        let seg = ConvexPolygon::new(&[vector![0.0, 0.0], vector![2.0, 0.0]]);
        assert_eq!(seg.edges().count(), 1);
        assert!((seg.perimeter() - 4.0).abs() < 1e-12);
        assert_eq!(seg.area(), 0.0);
        assert_eq!(regular_ngon(7, 1.0).edges().count(), 7);
    }

    #[test]
    fn regular_polygons_are_regular() {
        for n in 3..10 {
            assert!(regular_ngon(n, 1.5).is_regular(), "{n}-gon");
        }
        // Rhombus: equal edges, unequal angles.
        let rhombus = ConvexPolygon::new(&[
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![3.0, 3.0f64.sqrt()],
            vector![1.0, 3.0f64.sqrt()],
        ]);
        assert!(!rhombus.is_regular());
        // Rectangle: equal angles, unequal edges.
        let rect = ConvexPolygon::new(&[
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 1.0],
            vector![0.0, 1.0],
        ]);
        assert!(!rect.is_regular());
        // Slightly off-square rectangle stays outside the tolerance.
        let near_square = ConvexPolygon::new(&[
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0005],
            vector![0.0, 1.0005],
        ]);
        assert!(!near_square.is_regular());
        assert!(!ConvexPolygon::new(&[vector![0.0, 0.0], vector![1.0, 0.0]]).is_regular());
    }
}
