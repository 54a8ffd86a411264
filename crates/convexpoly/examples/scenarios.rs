//! Print metrics for a few hand-picked polygons.
//!
//! Usage:
//!   cargo run -p convexpoly --example scenarios

use convexpoly::prelude::*;
use nalgebra::vector;

fn main() {
    let square = ConvexPolygon::new(&[
        vector![0.0, 0.0],
        vector![4.0, 0.0],
        vector![4.0, 4.0],
        vector![0.0, 4.0],
        vector![2.0, 2.0],
    ]);
    report("square", &square);

    let a = ConvexPolygon::new(&[
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
    ]);
    let b = ConvexPolygon::new(&[
        vector![0.5, 0.5],
        vector![1.5, 0.5],
        vector![1.5, 1.5],
        vector![0.5, 1.5],
    ]);
    report("a & b", &a.intersection(&b));
    report("a | b", &a.union(&b));

    let cloud = random_points(1_000, 1.0, ReplayToken::new(2025, 0));
    report("cloud hull", &ConvexPolygon::new(&cloud));
}

fn report(name: &str, p: &ConvexPolygon) {
    let c = p.centroid().unwrap_or_else(|| vector![f64::NAN, f64::NAN]);
    println!(
        "{name}: n={} area={:.3} perimeter={:.3} centroid=({:.3}, {:.3}) regular={}",
        p.len(),
        p.area(),
        p.perimeter(),
        c.x,
        c.y,
        p.is_regular()
    );
}
