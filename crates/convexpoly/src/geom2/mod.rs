//! 2D convex polygon geometry (V-representation).
//!
//! Purpose
//! - Build convex hulls of point sets and answer metric, containment and
//!   combinator queries on the resulting `ConvexPolygon`s.
//! - Keep numerics explicit: every tolerance comes from a `GeomCfg`.
//!
//! Layering
//! - `types`: `Point`, `Color`, `GeomCfg`.
//! - `util`: orientation, tolerant ordering, segment intersection.
//! - `hull`: Andrew's monotone chain.
//! - `polygon`: `ConvexPolygon` and `bounding_box`, built on the two above.
//! - `rand`: reproducible random inputs.

mod hull;
mod polygon;
pub mod rand;
mod types;
mod util;

pub use hull::convex_hull;
pub use polygon::{bounding_box, ConvexPolygon};
pub use types::{distance, Color, GeomCfg, Point};
pub use util::{approx_eq, cross, segment_intersection};
