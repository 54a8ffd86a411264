use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use convexpoly::api::GeomCfg;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod interpreter;
mod render;
mod store;

use interpreter::Interpreter;

#[derive(Parser)]
#[command(name = "polycalc")]
#[command(about = "Convex polygon calculator")]
struct Cmd {
    /// Absolute geometric tolerance (coordinates, orientation, determinants)
    #[arg(long, global = true, default_value_t = 1e-12)]
    eps: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Execute a command script (stdin when no input is given)
    Run {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Decimals printed for real-valued results
        #[arg(long, default_value_t = 3)]
        precision: usize,
    },
    /// Print per-polygon metrics of a saved polygon file as JSON
    Stats { file: PathBuf },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    let cmd = Cmd::parse();
    let cfg = GeomCfg::with_eps(cmd.eps);
    match cmd.action {
        Action::Run { input, precision } => run(input, precision, cfg),
        Action::Stats { file } => stats(file, cfg),
    }
}

fn run(input: Option<PathBuf>, precision: usize, cfg: GeomCfg) -> Result<()> {
    tracing::info!(input = ?input, precision, eps = cfg.eps, "run");
    let mut interp = Interpreter::new(cfg, precision);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match input {
        Some(path) => {
            let file =
                File::open(&path).with_context(|| format!("opening {}", path.display()))?;
            interp.run(BufReader::new(file), &mut out)?;
        }
        None => interp.run(io::stdin().lock(), &mut out)?,
    }
    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct PolygonStats {
    name: String,
    vertices: Vec<[f64; 2]>,
    area: f64,
    perimeter: f64,
    centroid: Option<[f64; 2]>,
    regular: bool,
}

fn stats(file: PathBuf, cfg: GeomCfg) -> Result<()> {
    tracing::info!(file = %file.display(), "stats");
    let polygons = store::load(&file, cfg)?;
    let rows: Vec<PolygonStats> = polygons
        .into_iter()
        .map(|(name, p)| PolygonStats {
            vertices: p.vertices().iter().map(|v| [v.x, v.y]).collect(),
            area: p.area(),
            perimeter: p.perimeter(),
            centroid: p.centroid().map(|c| [c.x, c.y]),
            regular: p.is_regular(),
            name,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
