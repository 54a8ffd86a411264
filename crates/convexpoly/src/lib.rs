//! Convex polygon geometry engine.
//!
//! Convex hulls of planar point sets, polygon metrics (perimeter, area,
//! centroid), predicates (point and polygon containment, regularity) and
//! convex combinators (union, intersection, bounding box).
//!
//! All routines are synchronous and allocation-light; polygons own their
//! vertex buffers and never share them.

pub mod api;
pub mod geom2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{ConvexPolygon, GeomCfg, Point};

/// Common geometry exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::rand::{
        draw_polygon_radial, random_points, RadialCfg, ReplayToken, VertexCount,
    };
    pub use crate::geom2::{
        bounding_box, convex_hull, segment_intersection, Color, ConvexPolygon, GeomCfg, Point,
    };
    pub use nalgebra::Vector2 as Vec2;
}
