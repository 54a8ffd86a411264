//! Curated surface for callers outside the engine (interpreter, persistence,
//! rendering).
//!
//! Everything here is a re-export or a thin composition of `geom2`; callers
//! can rely on these names staying put when `geom2` is reorganized.

pub use crate::geom2::{
    bounding_box, convex_hull, distance, segment_intersection, Color, ConvexPolygon, GeomCfg,
    Point,
};

/// Convex union of two polygons as a new polygon.
///
/// Operand order does not affect the geometry; the result carries the color
/// and tolerances of `a`.
pub fn union_of(a: &ConvexPolygon, b: &ConvexPolygon) -> ConvexPolygon {
    a.union(b)
}

/// Intersection of two polygons as a new polygon (color and tolerances of `a`).
pub fn intersection_of(a: &ConvexPolygon, b: &ConvexPolygon) -> ConvexPolygon {
    a.intersection(b)
}

/// Vertices in clockwise order starting from the lexicographically smallest
/// one, the order used by the persisted text format.
pub fn clockwise_vertices(p: &ConvexPolygon) -> Vec<Point> {
    let v = p.vertices();
    match v.split_first() {
        Some((first, rest)) => std::iter::once(*first).chain(rest.iter().rev().copied()).collect(),
        None => Vec::new(),
    }
}

/// Inverse of `clockwise_vertices`: rebuild a polygon from trusted clockwise
/// hull vertices without recomputing the hull.
pub fn from_clockwise(mut points: Vec<Point>, cfg: GeomCfg) -> ConvexPolygon {
    points.reverse();
    ConvexPolygon::from_hull_with_cfg(points, cfg)
}
