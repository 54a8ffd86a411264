//! Basic 2D types and tolerances shared by the hull and polygon routines.
//!
//! - `Point`: plain `nalgebra` column vector; value semantics, no identity.
//! - `GeomCfg`: centralizes the absolute and relative tolerances.
//! - `Color`: display color attached to a polygon, independent of geometry.
//!
//! Code cross-refs: `hull::convex_hull`, `polygon::ConvexPolygon`, `util::cross`

use nalgebra::Vector2;

/// A point in the plane. Immutable by convention: every routine takes points
/// by value or through shared slices.
pub type Point = Vector2<f64>;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).norm()
}

/// Geometry configuration (tolerances).
///
/// - `eps`: absolute tolerance for coordinate equality, orientation tests and
///   the determinant check of the 2×2 line solve. Not scaled to the input;
///   callers working at very large or very small coordinate scales should
///   pick a matching value.
/// - `eps_regular`: relative tolerance for the edge-length and turn
///   comparisons of `ConvexPolygon::is_regular`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps: f64,
    pub eps_regular: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps: 1e-12,
            eps_regular: 1e-4,
        }
    }
}

impl GeomCfg {
    /// Default configuration with a custom absolute tolerance.
    #[inline]
    pub fn with_eps(eps: f64) -> Self {
        Self {
            eps,
            ..Self::default()
        }
    }
}

/// RGB display color with channels nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// True iff every channel lies in `[0, 1]`.
    #[inline]
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// 8-bit channels, clamped and rounded.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}
