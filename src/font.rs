use font_kit::family_name::FamilyName;
use font_kit::font::Font;
use font_kit::hinting::HintingOptions;
use font_kit::outline::OutlineSink;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use log::warn;
use pathfinder_geometry::line_segment::LineSegment2F;
use pathfinder_geometry::vector::Vector2F;
use raqote::{DrawOptions, DrawTarget, PathBuilder, Source};

use crate::config::FontChoice;
use crate::error::{Error, Result};

pub mod block;

/// A face that can measure a line of text and fill its glyph silhouettes into a draw target.
pub enum Typeface {
    /// A face loaded from the host's font collection.
    System(Box<Font>),
    /// The built-in block face; see [`block`].
    Block,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::System(font) => f.debug_tuple("System").field(&font.family_name()).finish(),
            Typeface::Block => f.write_str("Block"),
        }
    }
}

impl Typeface {
    pub fn resolve(choice: FontChoice) -> Result<Typeface> {
        match choice {
            FontChoice::System => Typeface::system_serif(),
            FontChoice::Block => Ok(Typeface::Block),
            FontChoice::Auto => Typeface::system_serif().or_else(|e| {
                warn!("{}; falling back to the built-in block face", e);
                Ok(Typeface::Block)
            }),
        }
    }

    /// Loads the best-matching serif face installed on the host.
    pub fn system_serif() -> Result<Typeface> {
        let handle = SystemSource::new()
            .select_best_match(&[FamilyName::Serif], &Properties::new())
            .map_err(|e| Error::FontUnavailable(format!("{:?}", e)))?;
        let font = handle
            .load()
            .map_err(|e| Error::FontUnavailable(format!("{:?}", e)))?;
        Ok(Typeface::System(Box::new(font)))
    }

    /// Width of `text` set on a single line at `size` points.
    pub fn measure(&self, text: &str, size: f32) -> Result<f32> {
        match self {
            Typeface::System(font) => {
                let scale = size / font.metrics().units_per_em as f32;
                let mut width = 0.0;
                for ch in text.chars() {
                    let advance = font
                        .advance(font.glyph_for_char(ch).unwrap_or(0))
                        .map_err(|e| Error::Glyph(format!("{:?} for {:?}", e, ch)))?;
                    width += advance.x() * scale;
                }
                Ok(width)
            }
            Typeface::Block => {
                let n = text.chars().count();
                if n == 0 {
                    return Ok(0.0);
                }
                let dot = size / block::DOTS_PER_EM;
                Ok((n * block::ADVANCE - 1) as f32 * dot)
            }
        }
    }

    /// Fills `text` starting at `x`, vertically centered on `middle` (the middle of the em box,
    /// like a canvas `textBaseline` of `middle`).
    pub fn draw(
        &self,
        dt: &mut DrawTarget,
        text: &str,
        size: f32,
        (x, middle): (f32, f32),
        src: &Source,
    ) -> Result<()> {
        let path = match self {
            Typeface::System(font) => {
                let metrics = font.metrics();
                let scale = size / metrics.units_per_em as f32;
                let baseline = middle + (metrics.ascent + metrics.descent) / 2.0 * scale;
                let mut pen = GlyphPen {
                    builder: PathBuilder::new(),
                    origin: (x, baseline),
                    scale,
                };
                for ch in text.chars() {
                    let glyph_id = font.glyph_for_char(ch).unwrap_or(0);
                    font.outline(glyph_id, HintingOptions::None, &mut pen)
                        .map_err(|e| Error::Glyph(format!("{:?} for {:?}", e, ch)))?;
                    let advance = font
                        .advance(glyph_id)
                        .map_err(|e| Error::Glyph(format!("{:?} for {:?}", e, ch)))?;
                    pen.origin.0 += advance.x() * scale;
                }
                pen.builder.finish()
            }
            Typeface::Block => {
                let dot = size / block::DOTS_PER_EM;
                let top = middle - block::ROWS as f32 * dot / 2.0;
                let mut builder = PathBuilder::new();
                for (i, ch) in text.chars().enumerate() {
                    let left = x + (i * block::ADVANCE) as f32 * dot;
                    for (col, row) in block::dots(ch) {
                        builder.rect(left + col as f32 * dot, top + row as f32 * dot, dot, dot);
                    }
                }
                builder.finish()
            }
        };
        dt.fill(&path, src, &DrawOptions::new());
        Ok(())
    }
}

/// Collects glyph outlines (font units, y up) into one device-space path (y down).
struct GlyphPen {
    builder: PathBuilder,
    origin: (f32, f32),
    scale: f32,
}

impl GlyphPen {
    fn map(&self, v: Vector2F) -> (f32, f32) {
        (
            self.origin.0 + v.x() * self.scale,
            self.origin.1 - v.y() * self.scale,
        )
    }
}

impl OutlineSink for GlyphPen {
    fn move_to(&mut self, to: Vector2F) {
        let (x, y) = self.map(to);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, to: Vector2F) {
        let (x, y) = self.map(to);
        self.builder.line_to(x, y);
    }

    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        let (cx, cy) = self.map(ctrl);
        let (x, y) = self.map(to);
        self.builder.quad_to(cx, cy, x, y);
    }

    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F) {
        let (c1x, c1y) = self.map(ctrl.from());
        let (c2x, c2y) = self.map(ctrl.to());
        let (x, y) = self.map(to);
        self.builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
