use core::fmt::Debug;
use std::path::PathBuf;
use std::{fmt::Display, str::FromStr};

use anyhow::Context;
use clap::Parser;
use log::info;

use glyphcells::config::RenderConfig;
use glyphcells::font::Typeface;
use glyphcells::rand::Rng;
use glyphcells::surface::RasterSurface;

/// Width-to-height ratio of the output when no explicit height is given.
const ASPECT: f64 = 900.0 / 300.0;
/// Smallest logical output width.
const MIN_WIDTH: u32 = 200;

/// Renders text as a mosaic of Voronoi cells and writes the frame as a PNG.
#[derive(Parser)]
struct Opts {
    /// Text to render.
    text: String,
    /// Sampling density, from 0.2 (sparse) to 3.0 (dense).
    #[clap(short, long, default_value = "1.2")]
    density: f64,
    /// Logical output width.
    #[clap(short, long, default_value = "900")]
    width: u32,
    /// Logical output height; derived from the width at a 3:1 aspect ratio if omitted.
    #[clap(long)]
    height: Option<u32>,
    /// Device pixels per logical unit.
    #[clap(long, default_value = "1")]
    scale: f32,
    /// Hex seed for a reproducible frame; a random one is drawn if omitted.
    #[clap(long)]
    seed: Option<Seed>,
    /// Output file; defaults to a name derived from the seed.
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Print frame statistics as JSON to stdout.
    #[clap(long)]
    stats: bool,
    #[clap(flatten)]
    config: glyphcells::config::Config,
}

#[derive(Clone)]
struct Seed(pub Vec<u8>);
impl Seed {
    fn random() -> Self {
        Seed(rand::random::<[u8; 32]>().to_vec())
    }
    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
impl FromStr for Seed {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes: Vec<u8> = hex::decode(s).context("seed must be hex")?;
        Ok(Seed(bytes))
    }
}
impl Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}
impl Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Debug>::fmt(self, f)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let width = opts.width.max(MIN_WIDTH);
    let height = opts
        .height
        .unwrap_or_else(|| (f64::from(width) / ASPECT).round() as u32);
    let mut render_config = RenderConfig::new(opts.text, opts.density, width, height);
    render_config.device_pixel_ratio = opts.scale;
    let render_config = render_config.sanitized();

    let seed = opts.seed.unwrap_or_else(Seed::random);
    let mut rng = Rng::from_seed(seed.as_bytes());
    let typeface = Typeface::resolve(opts.config.font).context("Failed to load typeface")?;
    info!("rendering {:?} with {:?}, seed {}", render_config.text, typeface, seed);

    let mut surface = RasterSurface::for_config(&render_config)?;
    let stats = glyphcells::pipeline::render(
        &render_config,
        &opts.config,
        &typeface,
        &mut rng,
        &mut surface,
    )?;

    let filename = opts
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.png", seed)));
    surface
        .write_png(&filename)
        .with_context(|| format!("Failed to write {}", filename.display()))?;
    info!("wrote png: {}", filename.display());

    if opts.stats {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}
