//! Line-oriented polygon calculator.
//!
//! Each input line is one command; each command produces exactly one output
//! line (a result, `ok`, or `error: <message>`). Failures never stop the run;
//! only I/O errors on the input or output streams do.

use anyhow::{anyhow, bail, Context, Result};
use convexpoly::api::{
    bounding_box, intersection_of, union_of, Color, ConvexPolygon, GeomCfg, Point,
};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use crate::{render, store};

const UNDEFINED: &str = "undefined identifier";
const UNRECOGNIZED: &str = "unrecognized command";
const BAD_ARGS: &str = "command with wrong number or type of arguments";
const EMPTY: &str = "empty polygon";

/// Named polygons plus output settings.
pub struct Interpreter {
    polygons: BTreeMap<String, ConvexPolygon>,
    cfg: GeomCfg,
    precision: usize,
    image_size: u32,
}

impl Interpreter {
    pub fn new(cfg: GeomCfg, precision: usize) -> Self {
        Self {
            polygons: BTreeMap::new(),
            cfg,
            precision,
            image_size: render::DEFAULT_SIZE,
        }
    }

    #[cfg(test)]
    fn with_image_size(mut self, size: u32) -> Self {
        self.image_size = size;
        self
    }

    /// Execute every line of `input`, writing one line per command to `out`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading command")?;
            match self.execute(&line) {
                Ok(Some(reply)) => writeln!(out, "{reply}")?,
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(line = %line, error = %format!("{err:#}"), "command failed");
                    writeln!(out, "error: {err:#}")?;
                }
            }
        }
        Ok(())
    }

    /// Execute one command line. `Ok(None)` for blank lines.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>> {
        let mut tokens = line.split_whitespace();
        let Some(cmd) = tokens.next() else {
            return Ok(None);
        };
        if cmd.starts_with('#') {
            return Ok(Some("#".to_string()));
        }
        let args: Vec<&str> = tokens.collect();
        tracing::debug!(cmd, ?args, "execute");
        let reply = match cmd {
            "polygon" => self.cmd_polygon(&args)?,
            "print" => self.cmd_print(&args)?,
            "area" => {
                let p = self.get(one(&args)?)?;
                self.num(p.area())
            }
            "perimeter" => {
                let p = self.get(one(&args)?)?;
                self.num(p.perimeter())
            }
            "vertices" => self.get(one(&args)?)?.len().to_string(),
            "centroid" => {
                let c = self.get(one(&args)?)?.centroid().ok_or_else(|| anyhow!(EMPTY))?;
                format!("{} {}", self.num(c.x), self.num(c.y))
            }
            "list" => {
                if !args.is_empty() {
                    bail!(BAD_ARGS);
                }
                self.polygons.keys().cloned().collect::<Vec<_>>().join(" ")
            }
            "save" => self.cmd_save(&args)?,
            "load" => self.cmd_load(&args)?,
            "setcol" => self.cmd_setcol(&args)?,
            "draw" => self.cmd_draw(&args)?,
            "intersection" => self.cmd_combine(&args, intersection_of)?,
            "union" => self.cmd_combine(&args, union_of)?,
            "inside" => {
                let [a, b] = two(&args)?;
                yes_no(self.get(a)?.is_inside(self.get(b)?))
            }
            "bbox" => self.cmd_bbox(&args)?,
            "regular" => yes_no(self.get(one(&args)?)?.is_regular()),
            _ => bail!(UNRECOGNIZED),
        };
        Ok(Some(reply))
    }

    fn cmd_polygon(&mut self, args: &[&str]) -> Result<String> {
        let Some((name, coords)) = args.split_first() else {
            bail!(BAD_ARGS);
        };
        let points = parse_points(coords)?;
        self.polygons
            .insert(name.to_string(), ConvexPolygon::with_cfg(&points, self.cfg));
        Ok(ok())
    }

    fn cmd_print(&self, args: &[&str]) -> Result<String> {
        let name = one(args)?;
        let p = self.get(name)?;
        let mut s = name.to_string();
        for v in p.vertices() {
            s.push(' ');
            s.push_str(&self.num(v.x));
            s.push(' ');
            s.push_str(&self.num(v.y));
        }
        Ok(s)
    }

    fn cmd_save(&self, args: &[&str]) -> Result<String> {
        let Some((file, names)) = args.split_first() else {
            bail!(BAD_ARGS);
        };
        if names.is_empty() {
            bail!(BAD_ARGS);
        }
        let entries = names
            .iter()
            .map(|&n| self.get(n).map(|p| (n, p)))
            .collect::<Result<Vec<_>>>()?;
        store::save(file, entries)?;
        Ok(ok())
    }

    fn cmd_load(&mut self, args: &[&str]) -> Result<String> {
        let file = one(args)?;
        for (name, poly) in store::load(file, self.cfg)? {
            self.polygons.insert(name, poly);
        }
        Ok(ok())
    }

    fn cmd_setcol(&mut self, args: &[&str]) -> Result<String> {
        let [name, r, g, b] = args else {
            bail!(BAD_ARGS);
        };
        let color = Color::new(real(r)?, real(g)?, real(b)?);
        if !color.is_normalized() {
            bail!(BAD_ARGS);
        }
        self.get_mut(name)?.set_color(color);
        Ok(ok())
    }

    fn cmd_draw(&self, args: &[&str]) -> Result<String> {
        let Some((file, names)) = args.split_first() else {
            bail!(BAD_ARGS);
        };
        if names.is_empty() {
            bail!(BAD_ARGS);
        }
        let polys = names
            .iter()
            .map(|&n| self.get(n))
            .collect::<Result<Vec<_>>>()?;
        render::render(&polys, file, self.image_size)?;
        Ok(ok())
    }

    /// `op a b` stores `a op b` into `a`; `op a b c` stores `b op c` into `a`.
    fn cmd_combine(
        &mut self,
        args: &[&str],
        op: fn(&ConvexPolygon, &ConvexPolygon) -> ConvexPolygon,
    ) -> Result<String> {
        let (target, lhs, rhs) = match args {
            [a, b] => (*a, *a, *b),
            [a, b, c] => (*a, *b, *c),
            _ => bail!(BAD_ARGS),
        };
        let result = op(self.get(lhs)?, self.get(rhs)?);
        if lhs == target {
            // In place: keep the target's color.
            self.polygons.insert(target.to_string(), result);
        } else {
            let mut fresh = ConvexPolygon::from_hull_with_cfg(result.vertices().to_vec(), self.cfg);
            if let Some(old) = self.polygons.get(target).and_then(|p| p.color()) {
                fresh.set_color(old);
            }
            self.polygons.insert(target.to_string(), fresh);
        }
        Ok(ok())
    }

    fn cmd_bbox(&mut self, args: &[&str]) -> Result<String> {
        let Some((target, names)) = args.split_first() else {
            bail!(BAD_ARGS);
        };
        if names.is_empty() {
            bail!(BAD_ARGS);
        }
        let polys = names
            .iter()
            .map(|&n| self.get(n))
            .collect::<Result<Vec<_>>>()?;
        let (rect, _, _) = bounding_box(polys).ok_or_else(|| anyhow!(EMPTY))?;
        self.polygons.insert(target.to_string(), rect);
        Ok(ok())
    }

    fn get(&self, name: &str) -> Result<&ConvexPolygon> {
        self.polygons.get(name).ok_or_else(|| anyhow!(UNDEFINED))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut ConvexPolygon> {
        self.polygons.get_mut(name).ok_or_else(|| anyhow!(UNDEFINED))
    }

    fn num(&self, x: f64) -> String {
        let s = format!("{:.*}", self.precision, x);
        // Tiny negatives would otherwise print as "-0.000".
        match s.strip_prefix('-') {
            Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
            _ => s,
        }
    }
}

fn ok() -> String {
    "ok".to_string()
}

fn yes_no(b: bool) -> String {
    let s = if b { "yes" } else { "no" };
    s.to_string()
}

fn one<'a>(args: &[&'a str]) -> Result<&'a str> {
    match args {
        [a] => Ok(*a),
        _ => bail!(BAD_ARGS),
    }
}

fn two<'a>(args: &[&'a str]) -> Result<[&'a str; 2]> {
    match args {
        [a, b] => Ok([*a, *b]),
        _ => bail!(BAD_ARGS),
    }
}

fn real(token: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => bail!(BAD_ARGS),
    }
}

fn parse_points(coords: &[&str]) -> Result<Vec<Point>> {
    if coords.len() % 2 != 0 {
        bail!(BAD_ARGS);
    }
    let mut points = Vec::with_capacity(coords.len() / 2);
    for c in coords.chunks_exact(2) {
        points.push(Point::new(real(c[0])?, real(c[1])?));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn session(script: &str) -> Vec<String> {
        let mut interp = Interpreter::new(GeomCfg::default(), 3).with_image_size(64);
        let mut out = Vec::new();
        interp.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn metrics_of_a_square() {
        let out = session(
            "# square with an interior point\n\
             polygon sq 0 0 4 0 4 4 0 4 2 2\n\
             print sq\n\
             area sq\n\
             perimeter sq\n\
             vertices sq\n\
             centroid sq\n\
             regular sq\n",
        );
        assert_eq!(
            out,
            vec![
                "#",
                "ok",
                "sq 0.000 0.000 4.000 0.000 4.000 4.000 0.000 4.000",
                "16.000",
                "16.000",
                "4",
                "2.000 2.000",
                "yes",
            ]
        );
    }

    #[test]
    fn combinators_in_place_and_into_new_target() {
        let out = session(
            "polygon a 0 0 1 0 1 1 0 1\n\
             polygon b 0.5 0.5 1.5 0.5 1.5 1.5 0.5 1.5\n\
             intersection c a b\n\
             area c\n\
             union d a b\n\
             area d\n\
             inside c a\n\
             inside a c\n\
             intersection a b\n\
             area a\n\
             list\n",
        );
        assert_eq!(
            out,
            vec![
                "ok", "ok", "ok", "0.250", "ok", "2.000", "yes", "no", "ok", "0.250", "a b c d"
            ]
        );
    }

    #[test]
    fn bbox_and_colors() {
        let mut interp = Interpreter::new(GeomCfg::default(), 3);
        for line in [
            "polygon a 0 0 1 0 0 1",
            "polygon b 3 -1 4 2 2 2",
            "bbox box a b",
            "setcol a 1 0 0.5",
        ] {
            assert_eq!(interp.execute(line).unwrap().as_deref(), Some("ok"));
        }
        assert_eq!(
            interp.execute("print box").unwrap().as_deref(),
            Some("box 0.000 -1.000 4.000 -1.000 4.000 2.000 0.000 2.000")
        );
        assert_eq!(
            interp.polygons.get("a").unwrap().color(),
            Some(Color::new(1.0, 0.0, 0.5))
        );
    }

    #[test]
    fn errors_are_reported_and_the_session_continues() {
        let out = session(
            "frobnicate x\n\
             area nope\n\
             polygon p 0 0 1\n\
             polygon p 0 0 1 zero\n\
             setcol nope 0 0 0\n\
             polygon p 0 0 1 0 0 1\n\
             setcol p 2 0 0\n\
             inside p\n\
             polygon e\n\
             centroid e\n\
             area e\n",
        );
        assert_eq!(
            out,
            vec![
                "error: unrecognized command",
                "error: undefined identifier",
                "error: command with wrong number or type of arguments",
                "error: command with wrong number or type of arguments",
                "error: undefined identifier",
                "ok",
                "error: command with wrong number or type of arguments",
                "error: command with wrong number or type of arguments",
                "ok",
                "error: empty polygon",
                "0.000",
            ]
        );
    }

    #[test]
    fn save_load_and_draw_round_trip() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("polys.txt");
        let png = dir.path().join("pic.png");
        let (file, png) = (file.display(), png.display());
        let out = session(&format!(
            "polygon t 0 0 2 0 1 3\n\
             polygon s 5 5\n\
             setcol t 0 1 0\n\
             save {file} t s\n\
             polygon t 9 9\n\
             load {file}\n\
             print t\n\
             print s\n\
             draw {png} t s\n\
             save {file} missing\n"
        ));
        assert_eq!(
            out,
            vec![
                "ok",
                "ok",
                "ok",
                "ok",
                "ok",
                "ok",
                "t 0.000 0.000 2.000 0.000 1.000 3.000",
                "s 5.000 5.000",
                "ok",
                "error: undefined identifier",
            ]
        );
        assert!(dir.path().join("pic.png").exists());
        let saved = fs::read_to_string(dir.path().join("polys.txt")).unwrap();
        assert_eq!(saved, "t 0 0 1 3 2 0\ns 5 5\n");
    }

    #[test]
    fn load_of_missing_file_is_an_error_line() {
        let out = session("load /definitely/not/here.txt\n");
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("error: reading /definitely/not/here.txt"));
    }
}
