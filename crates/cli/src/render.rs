//! Raster rendering of polygons to PNG.
//!
//! The common bounding box of the drawn polygons is scaled uniformly into a
//! square image with a small margin and centered; world y grows upward.
//! Polygons are filled in list order by testing pixel centers for
//! containment, so later polygons paint over earlier ones.

use anyhow::{Context, Result};
use convexpoly::api::{bounding_box, Color, ConvexPolygon, Point};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

pub const DEFAULT_SIZE: u32 = 500;
const MARGIN: f64 = 2.0;

/// Render `polygons` into a `size × size` PNG at `path`.
pub fn render<P: AsRef<Path>>(polygons: &[&ConvexPolygon], path: P, size: u32) -> Result<()> {
    let path = path.as_ref();
    let img = rasterize(polygons, size);
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// World ↔ pixel mapping for one image.
struct Viewport {
    ll: Point,
    scale: f64,
    offset: Point,
    size: u32,
}

impl Viewport {
    fn fit(ll: Point, ur: Point, size: u32) -> Self {
        let avail = (size as f64 - 1.0 - 2.0 * MARGIN).max(0.0);
        let extent = ur - ll;
        let longest = extent.x.max(extent.y);
        let scale = if longest > 0.0 { avail / longest } else { 1.0 };
        let offset = Point::new(
            MARGIN + 0.5 * (avail - extent.x * scale),
            MARGIN + 0.5 * (avail - extent.y * scale),
        );
        Self {
            ll,
            scale,
            offset,
            size,
        }
    }

    /// World coordinates of the center of pixel `(px, py)`.
    fn to_world(&self, px: u32, py: u32) -> Point {
        let flipped = (self.size - 1 - py) as f64;
        Point::new(
            self.ll.x + (px as f64 - self.offset.x) / self.scale,
            self.ll.y + (flipped - self.offset.y) / self.scale,
        )
    }

    /// Pixel holding world point `p`, if it falls inside the image.
    fn to_pixel(&self, p: Point) -> Option<(u32, u32)> {
        let x = (self.offset.x + (p.x - self.ll.x) * self.scale).round();
        let y = (self.offset.y + (p.y - self.ll.y) * self.scale).round();
        let max = (self.size - 1) as f64;
        if !(0.0..=max).contains(&x) || !(0.0..=max).contains(&y) {
            return None;
        }
        Some((x as u32, self.size - 1 - y as u32))
    }
}

/// Rasterize `polygons` on a white background.
pub fn rasterize(polygons: &[&ConvexPolygon], size: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
    let Some((_, ll, ur)) = bounding_box(polygons.iter().copied()) else {
        return img;
    };
    if size == 0 {
        return img;
    }
    let view = Viewport::fit(ll, ur, size);
    for poly in polygons {
        let color = Rgb(poly.color().unwrap_or(Color::BLACK).to_rgb8());
        if poly.len() >= 3 {
            fill(&mut img, &view, poly, color);
        }
        for &v in poly.vertices() {
            if let Some((px, py)) = view.to_pixel(v) {
                img.put_pixel(px, py, color);
            }
        }
    }
    img
}

fn fill(img: &mut RgbImage, view: &Viewport, poly: &ConvexPolygon, color: Rgb<u8>) {
    let Some((_, ll, ur)) = bounding_box([poly]) else {
        return;
    };
    let (Some((x0, y1)), Some((x1, y0))) = (view.to_pixel(ll), view.to_pixel(ur)) else {
        return;
    };
    // One pixel of slack for rounding in `to_pixel`.
    let last = view.size - 1;
    for py in y0.saturating_sub(1)..=(y1 + 1).min(last) {
        for px in x0.saturating_sub(1)..=(x1 + 1).min(last) {
            if poly.contains_point(view.to_world(px, py)) {
                img.put_pixel(px, py, color);
            }
        }
    }
}
