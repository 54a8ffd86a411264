//! Convex hull of a finite point set (Andrew's monotone chain).
//!
//! Output convention
//! - Strict counter-clockwise order, starting at the lexicographically smallest
//!   point (x first, ties within `eps` broken by y).
//! - No duplicate vertices; points on the interior of an edge are dropped.
//! - Degenerate inputs: no points → empty, coincident points → one point,
//!   collinear points → the two extreme points.
//!
//! Complexity: O(n log n) for the sort, linear for the two chain passes.

use super::types::{GeomCfg, Point};
use super::util::{approx_eq, cross, sort_lex_eps};

/// Convex hull vertices of `points` in CCW order.
pub fn convex_hull(points: &[Point], cfg: GeomCfg) -> Vec<Point> {
    let mut pts: Vec<Point> = points.to_vec();
    sort_lex_eps(&mut pts, cfg.eps);
    pts.dedup_by(|a, b| approx_eq(*a, *b, cfg.eps));
    if pts.len() <= 2 {
        return pts;
    }
    let lower = half_chain(pts.iter().copied(), pts.len(), cfg.eps);
    let upper = half_chain(pts.iter().rev().copied(), pts.len(), cfg.eps);
    // Each chain ends where the other one starts.
    let mut hull = lower;
    hull.pop();
    hull.extend_from_slice(&upper[..upper.len() - 1]);
    hull
}

/// One monotone chain: keep only strict left turns.
fn half_chain(pts: impl Iterator<Item = Point>, cap: usize, eps: f64) -> Vec<Point> {
    let mut chain: Vec<Point> = Vec::with_capacity(cap);
    for p in pts {
        while chain.len() >= 2
            && cross(chain[chain.len() - 2], chain[chain.len() - 1], p) <= eps
        {
            chain.pop();
        }
        chain.push(p);
    }
    chain
}
