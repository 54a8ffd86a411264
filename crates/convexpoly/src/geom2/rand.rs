//! Random point clouds and convex polygons (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic inputs for property tests, benches and demos. Every draw is
//!   keyed by a `ReplayToken` so a failing case can be reproduced from
//!   `(seed, index)` alone.
//!
//! Model
//! - `draw_polygon_radial`: `n` equally spaced angles on [0, 2π) with bounded
//!   angular and radial jitter, then the convex hull.
//! - `random_points`: uniform samples in an axis-aligned box.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::polygon::ConvexPolygon;
use super::types::Point;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    /// Polygon center.
    pub center: Point,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            center: Vector2::zeros(),
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random convex polygon via radial jitter + convex hull.
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> ConvexPolygon {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.max(0.0);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let pts: Vec<Point> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u).max(1e-6) * r0;
            cfg.center + Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    ConvexPolygon::new(&pts)
}

/// `n` points uniform in `[-half_extent, half_extent]²`.
pub fn random_points(n: usize, half_extent: f64, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.to_std_rng();
    let h = half_extent.abs().max(f64::MIN_POSITIVE);
    (0..n)
        .map(|_| Vector2::new(rng.gen_range(-h..=h), rng.gen_range(-h..=h)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Fixed(10),
            angle_jitter_frac: 0.2,
            radial_jitter: 0.1,
            ..RadialCfg::default()
        };
        let tok = ReplayToken::new(42, 7);
        let p1 = draw_polygon_radial(cfg, tok);
        let p2 = draw_polygon_radial(cfg, tok);
        assert_eq!(p1.vertices(), p2.vertices());
        let p3 = draw_polygon_radial(cfg, ReplayToken::new(42, 8));
        assert_ne!(p1.vertices(), p3.vertices());
    }

    #[test]
    fn radial_draw_stays_in_annulus() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Uniform { min: 5, max: 20 },
            radial_jitter: 0.25,
            center: Vector2::new(3.0, -1.0),
            ..RadialCfg::default()
        };
        for index in 0..20 {
            let p = draw_polygon_radial(cfg, ReplayToken::new(5, index));
            assert!(p.len() >= 3);
            for v in p.vertices() {
                let r = (v - cfg.center).norm();
                assert!((0.75 - 1e-12..=1.25 + 1e-12).contains(&r));
            }
            assert!(p.contains_point(cfg.center));
        }
    }

    #[test]
    fn random_points_respect_extent() {
        let pts = random_points(200, 2.0, ReplayToken::new(1, 0));
        assert_eq!(pts.len(), 200);
        assert!(pts.iter().all(|p| p.x.abs() <= 2.0 && p.y.abs() <= 2.0));
    }
}
