use serde::{Deserialize, Serialize};

/// Width of the fixed sampling space that text is rasterized into.
pub const SAMPLE_W: usize = 900;
/// Height of the fixed sampling space that text is rasterized into.
pub const SAMPLE_H: usize = 300;

pub const MIN_DENSITY: f64 = 0.2;
pub const MAX_DENSITY: f64 = 3.0;
pub const DEFAULT_DENSITY: f64 = 1.2;

#[derive(Debug, Default, Clone, clap::Args, Serialize, Deserialize)]
pub struct Config {
    /// How candidate pixels on the sampling grid are accepted as glyph points.
    #[clap(long, value_enum, default_value_t = SamplingPolicy::Bernoulli)]
    pub sampling: SamplingPolicy,

    /// Horizontal placement of the text in the sampling space.
    #[clap(long, value_enum, default_value_t = Anchor::Left)]
    pub anchor: Anchor,

    /// Which typeface to rasterize text with.
    #[clap(long, value_enum, default_value_t = FontChoice::Auto)]
    pub font: FontChoice,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingPolicy {
    /// Accept every bright pixel on the grid; density only controls the grid step.
    Grid,
    /// Additionally accept each bright pixel with probability `density`.
    #[default]
    Bernoulli,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Start the text at half the fit margin from the left edge.
    #[default]
    Left,
    /// Center the measured text horizontally.
    Center,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontChoice {
    /// Best system serif face, falling back to the block face if none is installed.
    #[default]
    Auto,
    /// Best system serif face; fail if none is installed.
    System,
    /// Built-in 5x7 block face.
    Block,
}

/// The live parameters of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub text: String,
    pub density: f64,
    /// Logical output width.
    pub output_width: u32,
    /// Logical output height.
    pub output_height: u32,
    /// Device pixels per logical unit of the output surface.
    pub device_pixel_ratio: f32,
}

impl RenderConfig {
    pub fn new(
        text: impl Into<String>,
        density: f64,
        output_width: u32,
        output_height: u32,
    ) -> Self {
        RenderConfig {
            text: text.into(),
            density,
            output_width,
            output_height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Clamps every parameter into its valid range instead of rejecting it.
    pub fn sanitized(mut self) -> Self {
        self.density = clamp_density(self.density);
        self.output_width = self.output_width.max(1);
        self.output_height = self.output_height.max(1);
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            self.device_pixel_ratio = 1.0;
        }
        self
    }
}

pub fn clamp_density(density: f64) -> f64 {
    if density.is_nan() {
        return DEFAULT_DENSITY;
    }
    density.clamp(MIN_DENSITY, MAX_DENSITY)
}
