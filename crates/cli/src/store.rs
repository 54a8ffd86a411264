//! Persisted polygon files: one polygon per line, `<name> <x1> <y1> <x2> <y2> ...`.
//!
//! Vertices are written clockwise starting from the lexicographically smallest
//! vertex, with shortest round-trip float formatting so reloading is exact.
//! Loading trusts the file: points are fed to the hull-ordered constructor
//! without recomputing the hull.

use anyhow::{bail, Context, Result};
use convexpoly::api::{clockwise_vertices, from_clockwise, ConvexPolygon, GeomCfg, Point};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Write `polygons` to `path`, replacing any existing file.
pub fn save<'a, P, I>(path: P, polygons: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (&'a str, &'a ConvexPolygon)>,
{
    let path = path.as_ref();
    let mut text = String::new();
    for (name, poly) in polygons {
        text.push_str(name);
        for v in clockwise_vertices(poly) {
            write!(text, " {} {}", v.x, v.y)?;
        }
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read every record of `path`, in file order.
pub fn load<P: AsRef<Path>>(path: P, cfg: GeomCfg) -> Result<Vec<(String, ConvexPolygon)>> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (name, points) = parse_record(line)
            .with_context(|| format!("{}:{}: malformed record", path.display(), lineno + 1))?;
        out.push((name, from_clockwise(points, cfg)));
    }
    Ok(out)
}

fn parse_record(line: &str) -> Result<(String, Vec<Point>)> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        bail!("missing name");
    };
    let coords = tokens.map(coordinate).collect::<Result<Vec<f64>>>()?;
    if coords.len() % 2 != 0 {
        bail!("odd number of coordinates");
    }
    let points = coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect();
    Ok((name.to_string(), points))
}

fn coordinate(token: &str) -> Result<f64> {
    let x = token
        .parse::<f64>()
        .with_context(|| format!("bad coordinate {token:?}"))?;
    if !x.is_finite() {
        bail!("non-finite coordinate {token:?}");
    }
    Ok(x)
}
