use raqote::SolidSource;
use serde::Serialize;

use crate::math::{dist, rescale, Point};

const HUE_START: f64 = 200.0;
const HUE_SPAN: f64 = 160.0;
const LIGHTNESS_START: f64 = 20.0;
const LIGHTNESS_SPAN: f64 = 50.0;
const SATURATION: f64 = 70.0;

/// A straight-alpha 8-bit color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 0xff }
    }

    /// Builds a color from 8-bit channels and a CSS-style alpha in `[0, 1]`.
    pub fn with_alpha(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba { r, g, b, a }
    }
}

impl From<Rgba> for SolidSource {
    fn from(c: Rgba) -> SolidSource {
        SolidSource::from_unpremultiplied_argb(c.a, c.r, c.g, c.b)
    }
}

/// Hue in whole degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Hsl {
    pub hue: u32,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn to_rgba(self) -> Rgba {
        let s = self.saturation.clamp(0.0, 100.0) / 100.0;
        let l = self.lightness.clamp(0.0, 100.0) / 100.0;
        let h = f64::from(self.hue % 360);
        let channel = |n: f64| {
            let k = (n + h / 30.0) % 12.0;
            let a = s * l.min(1.0 - l);
            let v = l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
            (v * 255.0).round() as u8
        };
        Rgba::opaque(channel(0.0), channel(8.0), channel(4.0))
    }
}

/// Colors a cell by how far its generator point lies from the canvas center: cyan-blue and
/// dark near the middle, through violet, to light red at the corners.
///
/// `half_diagonal` is half the length of the canvas diagonal, i.e. the largest possible distance
/// from the center to a point inside the canvas.
pub fn cell_color(point: Point, center: Point, half_diagonal: f64) -> Hsl {
    let t = if half_diagonal > 0.0 {
        rescale(dist(point, center) / half_diagonal, (0.0, 1.0), (0.0, 1.0))
    } else {
        0.0
    };
    let hue = (HUE_START + t * HUE_SPAN).floor() as u32 % 360;
    Hsl {
        hue,
        saturation: SATURATION,
        lightness: LIGHTNESS_START + t * LIGHTNESS_SPAN,
    }
}
