//! Orientation and tolerance primitives shared by the hull and polygon code.

use std::cmp::Ordering;

use nalgebra::{matrix, Vector2};

use super::types::{GeomCfg, Point};

/// z-component of `(b - a) × (c - a)`.
///
/// Positive for a counter-clockwise turn `a → b → c`, negative for a clockwise
/// turn, zero for collinear points.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Coordinate-wise equality within `eps`.
#[inline]
pub fn approx_eq(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
}

/// Sort points by x, breaking ties within `eps` on x by y.
///
/// Exact lexicographic sort first, then each run of points whose x lies within
/// `eps` of the run's first x is re-sorted by y. Keeps the comparator a total
/// order while still absorbing floating noise on x.
pub(crate) fn sort_lex_eps(points: &mut [Point], eps: f64) {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    let mut start = 0usize;
    while start < points.len() {
        let x0 = points[start].x;
        let mut end = start + 1;
        while end < points.len() && points[end].x - x0 <= eps {
            end += 1;
        }
        if end - start > 1 {
            points[start..end].sort_by(|a, b| a.y.total_cmp(&b.y));
        }
        start = end;
    }
}

/// Lexicographic comparison with the same `eps` band on x as `sort_lex_eps`.
#[inline]
pub(crate) fn cmp_lex_eps(a: Point, b: Point, eps: f64) -> Ordering {
    if (a.x - b.x).abs() <= eps {
        a.y.total_cmp(&b.y)
    } else {
        a.x.total_cmp(&b.x)
    }
}

#[inline]
fn in_box(p: Point, a: Point, b: Point, eps: f64) -> bool {
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

/// Crossing point of segments `r1–r2` and `s1–s2`, if any.
///
/// Solves the 2×2 system of the two supporting lines. Returns `None` when
/// `|det| < cfg.eps`: parallel and collinear-overlapping segments are both
/// reported as "no distinguished intersection point". Otherwise the line
/// intersection is accepted only if it lies in the bounding box of each
/// segment (with `eps` slack); being on both lines, that is equivalent to
/// lying on both finite segments.
pub fn segment_intersection(
    r1: Point,
    r2: Point,
    s1: Point,
    s2: Point,
    cfg: GeomCfg,
) -> Option<Point> {
    // Rows are line normals: a x + b y = c.
    let (a1, b1) = (r2.y - r1.y, r1.x - r2.x);
    let (a2, b2) = (s2.y - s1.y, s1.x - s2.x);
    let m = matrix![a1, b1; a2, b2];
    let det = m.determinant();
    if det.abs() < cfg.eps {
        return None;
    }
    let inv = m.try_inverse()?;
    let rhs = Vector2::new(a1 * r1.x + b1 * r1.y, a2 * s1.x + b2 * s1.y);
    let p = inv * rhs;
    if in_box(p, r1, r2, cfg.eps) && in_box(p, s1, s2, cfg.eps) {
        Some(p)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn cross_sign_convention() {
        let a = vector![0.0, 0.0];
        let b = vector![1.0, 0.0];
        assert!(cross(a, b, vector![1.0, 1.0]) > 0.0);
        assert!(cross(a, b, vector![1.0, -1.0]) < 0.0);
        assert_eq!(cross(a, b, vector![3.0, 0.0]), 0.0);
    }

    #[test]
    fn sort_breaks_x_ties_by_y() {
        let mut pts = vec![
            vector![1.0, 5.0],
            vector![1.0 + 1e-13, 2.0],
            vector![0.0, 9.0],
            vector![1.0 - 1e-13, 3.0],
        ];
        sort_lex_eps(&mut pts, 1e-12);
        let ys: Vec<f64> = pts.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![9.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn crossing_diagonals_meet_in_the_middle() {
        let cfg = GeomCfg::default();
        let p = segment_intersection(
            vector![0.0, 0.0],
            vector![2.0, 2.0],
            vector![0.0, 2.0],
            vector![2.0, 0.0],
            cfg,
        )
        .expect("diagonals cross");
        assert!((p - vector![1.0, 1.0]).norm() < 1e-12);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let cfg = GeomCfg::default();
        let none = segment_intersection(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 1.0],
            cfg,
        );
        assert!(none.is_none());
        // Collinear overlap is treated the same way.
        let overlap = segment_intersection(
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![1.0, 0.0],
            vector![3.0, 0.0],
            cfg,
        );
        assert!(overlap.is_none());
    }

    #[test]
    fn line_crossing_outside_a_segment_is_rejected() {
        // Lines meet at (2, 0), which is past the end of the first segment.
        let cfg = GeomCfg::default();
        let p = segment_intersection(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![2.0, 1.0],
            vector![2.0, -1.0],
            cfg,
        );
        assert!(p.is_none());
    }

    #[test]
    fn touching_at_an_endpoint_counts() {
        let cfg = GeomCfg::default();
        let p = segment_intersection(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            cfg,
        )
        .expect("shared endpoint");
        assert!(approx_eq(p, vector![1.0, 0.0], 1e-12));
    }
}
