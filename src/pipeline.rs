//! The text-to-mosaic pipeline.
//!
//! A pass is a pure function of the [`RenderConfig`], the options, the typeface, and the random
//! source: rasterize, sample, scale, tessellate, and finally color and paint each cell. All
//! geometry is computed up front by [`plan`], so a pass that fails never touches the surface.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::{cell_color, Hsl};
use crate::config::{Config, RenderConfig, SAMPLE_H, SAMPLE_W};
use crate::error::Result;
use crate::font::Typeface;
use crate::mask::rasterize;
use crate::math::Point;
use crate::rand::Rng;
use crate::render::{paint, Surface};
use crate::sample::{sample, SamplePoints};
use crate::scale::Scale;
use crate::tessellate::Tessellation;

/// Summary of one finished pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub glyph_points: usize,
    pub coverage_points: usize,
    pub cells_painted: usize,
    /// Font size the text was fitted to in sampling space, if any text was rasterized.
    pub font_size: Option<f32>,
}

/// Everything needed to paint one frame, in logical output units.
#[derive(Debug, Clone)]
pub struct Mosaic {
    width: f64,
    height: f64,
    points: Vec<Point>,
    glyph_count: usize,
    tessellation: Option<Tessellation>,
    font_size: Option<f32>,
}

impl Mosaic {
    /// A frame with nothing but background.
    pub fn empty(width: f64, height: f64) -> Self {
        Mosaic {
            width,
            height,
            points: Vec::new(),
            glyph_count: 0,
            tessellation: None,
            font_size: None,
        }
    }

    /// Scales sampling-space points onto a `width x height` output and tessellates them there.
    pub fn from_samples(sampled: &SamplePoints, width: u32, height: u32) -> Result<Self> {
        let (w, h) = (f64::from(width), f64::from(height));
        if sampled.is_empty() {
            return Ok(Mosaic::empty(w, h));
        }
        let scale = Scale::between((SAMPLE_W as f64, SAMPLE_H as f64), (w, h));
        let points = scale.apply_all(&sampled.points);
        let tessellation = Tessellation::new(&points, w, h)?;
        Ok(Mosaic {
            width: w,
            height: h,
            points,
            glyph_count: sampled.glyph_count,
            tessellation: Some(tessellation),
            font_size: None,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// All generator points in output space, glyph points first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn glyph_count(&self) -> usize {
        self.glyph_count
    }

    /// The present cells in point order, each with its color.
    pub fn cells(&self) -> impl Iterator<Item = (&[Point], Hsl)> + '_ {
        let center = (self.width / 2.0, self.height / 2.0);
        let half_diagonal = f64::hypot(self.width, self.height) / 2.0;
        self.tessellation
            .iter()
            .flat_map(|t| t.cells())
            .zip(&self.points)
            .filter_map(move |(cell, &point)| {
                Some((cell?, cell_color(point, center, half_diagonal)))
            })
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            glyph_points: self.glyph_count,
            coverage_points: self.points.len() - self.glyph_count,
            cells_painted: self.cells().count(),
            font_size: self.font_size,
        }
    }
}

/// Computes the mosaic for one pass without drawing anything.
pub fn plan(
    config: &RenderConfig,
    options: &Config,
    typeface: &Typeface,
    rng: &mut Rng,
) -> Result<Mosaic> {
    let config = config.clone().sanitized();
    let (width, height) = (config.output_width, config.output_height);

    let Some(mask) = rasterize(&config.text, typeface, options.anchor)? else {
        debug!("empty text; painting background only");
        return Ok(Mosaic::empty(f64::from(width), f64::from(height)));
    };
    let sampled = sample(&mask, config.density, options.sampling, rng);
    if sampled.is_empty() {
        debug!("{:?} has no foreground pixels; painting background only", config.text);
    }

    let mut mosaic = Mosaic::from_samples(&sampled, width, height)?;
    mosaic.font_size = Some(mask.font_size());
    debug!(
        "font size {}, {} glyph points, {} coverage points, {} cells",
        mask.font_size(),
        mosaic.glyph_count,
        mosaic.points.len() - mosaic.glyph_count,
        mosaic.cells().count(),
    );
    Ok(mosaic)
}

/// Runs a full pass: plans the mosaic, then paints it onto `surface`.
pub fn render<S: Surface + ?Sized>(
    config: &RenderConfig,
    options: &Config,
    typeface: &Typeface,
    rng: &mut Rng,
    surface: &mut S,
) -> Result<FrameStats> {
    let mosaic = plan(config, options, typeface, rng)?;
    paint(&mosaic, surface);
    Ok(mosaic.stats())
}
