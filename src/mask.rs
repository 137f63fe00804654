use raqote::{DrawTarget, SolidSource, Source};

use crate::config::{Anchor, SAMPLE_H, SAMPLE_W};
use crate::error::Result;
use crate::font::Typeface;

/// Horizontal room left free when fitting text to the sampling width.
const FIT_MARGIN: f32 = 40.0;
const START_FONT_SIZE: f32 = 220.0;
const FONT_SIZE_STEP: f32 = 4.0;
const MIN_FONT_SIZE: f32 = 10.0;

/// A monochrome rendering of the text in sampling space: bright opaque glyphs on an opaque
/// black ground.
#[derive(Clone, PartialEq)]
pub struct GlyphMask {
    width: usize,
    height: usize,
    luma: Vec<u8>,
    alpha: Vec<u8>,
    font_size: f32,
}

impl std::fmt::Debug for GlyphMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

impl GlyphMask {
    /// Builds a mask from row-major luminance and alpha planes.
    ///
    /// # Panics
    ///
    /// Panics if either plane does not hold exactly `width * height` values.
    pub fn new(width: usize, height: usize, luma: Vec<u8>, alpha: Vec<u8>) -> Self {
        assert_eq!(luma.len(), width * height, "luma plane size");
        assert_eq!(alpha.len(), width * height, "alpha plane size");
        GlyphMask {
            width,
            height,
            luma,
            alpha,
            font_size: 0.0,
        }
    }

    /// Reads the red and alpha channels of a premultiplied ARGB draw target.
    pub fn from_draw_target(dt: &DrawTarget) -> Self {
        let (luma, alpha): (Vec<u8>, Vec<u8>) = dt
            .get_data()
            .iter()
            .map(|px| {
                let [_b, _g, r, a] = px.to_le_bytes();
                (r, a)
            })
            .unzip();
        GlyphMask::new(dt.width() as usize, dt.height() as usize, luma, alpha)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The font size the text was fitted to, or `0.0` for masks not made by [`rasterize`].
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn luma(&self, x: usize, y: usize) -> u8 {
        self.luma[y * self.width + x]
    }

    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        self.alpha[y * self.width + x]
    }

    /// Number of pixels that pass the given luminance and alpha thresholds (both exclusive).
    pub fn count_above(&self, luma: u8, alpha: u8) -> usize {
        self.luma
            .iter()
            .zip(&self.alpha)
            .filter(|&(&l, &a)| l > luma && a > alpha)
            .count()
    }
}

/// Renders `text` into a fresh sampling-space mask, shrinking the font until the text fits the
/// width. Returns `None` for empty text: there is nothing to sample.
pub fn rasterize(text: &str, typeface: &Typeface, anchor: Anchor) -> Result<Option<GlyphMask>> {
    if text.is_empty() {
        return Ok(None);
    }
    let (w, h) = (SAMPLE_W as f32, SAMPLE_H as f32);
    let mut dt = DrawTarget::new(SAMPLE_W as i32, SAMPLE_H as i32);
    dt.clear(SolidSource::from_unpremultiplied_argb(0xff, 0, 0, 0));

    let font_size = fit_font_size(text, typeface, w - FIT_MARGIN)?;
    let x = match anchor {
        Anchor::Left => FIT_MARGIN / 2.0,
        Anchor::Center => (w - typeface.measure(text, font_size)?) / 2.0,
    };
    let white = Source::Solid(SolidSource::from_unpremultiplied_argb(0xff, 0xff, 0xff, 0xff));
    typeface.draw(&mut dt, text, font_size, (x, h / 2.0), &white)?;

    let mut mask = GlyphMask::from_draw_target(&dt);
    mask.font_size = font_size;
    Ok(Some(mask))
}

/// Steps down from the starting size until `text` is no wider than `max_width`, stopping at the
/// minimum size even if it still overflows.
fn fit_font_size(text: &str, typeface: &Typeface, max_width: f32) -> Result<f32> {
    let mut size = START_FONT_SIZE;
    while typeface.measure(text, size)? > max_width && size > MIN_FONT_SIZE {
        size -= FONT_SIZE_STEP;
    }
    Ok(size)
}

#[cfg(test)]
mod test {
    use super::*;

    fn bright_columns(mask: &GlyphMask) -> (usize, usize) {
        let lit: Vec<usize> = (0..mask.width())
            .filter(|&x| (0..mask.height()).any(|y| mask.luma(x, y) > 180))
            .collect();
        (lit[0], lit[lit.len() - 1])
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(rasterize("", &Typeface::Block, Anchor::Left).unwrap(), None);
    }

    #[test]
    fn test_short_text_keeps_start_size() {
        let mask = rasterize("Hi", &Typeface::Block, Anchor::Left)
            .unwrap()
            .unwrap();
        assert_eq!((mask.width(), mask.height()), (SAMPLE_W, SAMPLE_H));
        assert_eq!(mask.font_size(), START_FONT_SIZE);
        assert!(mask.count_above(180, 10) > 0);
        // Background is opaque black.
        assert_eq!((mask.luma(0, 0), mask.alpha(0, 0)), (0, 0xff));
    }

    #[test]
    fn test_long_text_shrinks_to_fit() {
        let text = "I made a thing :)";
        let mask = rasterize(text, &Typeface::Block, Anchor::Left)
            .unwrap()
            .unwrap();
        assert!(mask.font_size() < START_FONT_SIZE);
        let width = Typeface::Block.measure(text, mask.font_size()).unwrap();
        assert!(width <= SAMPLE_W as f32 - FIT_MARGIN);
        let (first, last) = bright_columns(&mask);
        assert!(first >= 20);
        assert!(last < SAMPLE_W - 20);
    }

    #[test]
    fn test_fit_stops_at_minimum() {
        let text = "W".repeat(500);
        let size = fit_font_size(&text, &Typeface::Block, 860.0).unwrap();
        assert!(size <= MIN_FONT_SIZE);
        assert!(size > MIN_FONT_SIZE - FONT_SIZE_STEP);
    }

    #[test]
    fn test_anchors() {
        let left = rasterize("Hi", &Typeface::Block, Anchor::Left)
            .unwrap()
            .unwrap();
        let (first, _) = bright_columns(&left);
        assert_eq!(first, 20);

        let centered = rasterize("H", &Typeface::Block, Anchor::Center)
            .unwrap()
            .unwrap();
        let (first, last) = bright_columns(&centered);
        let left_gap = first as i64;
        let right_gap = (SAMPLE_W - 1 - last) as i64;
        assert!((left_gap - right_gap).abs() <= 2, "{} vs {}", left_gap, right_gap);
    }

    #[test]
    fn test_vertically_centered() {
        let mask = rasterize("H", &Typeface::Block, Anchor::Left)
            .unwrap()
            .unwrap();
        let rows: Vec<usize> = (0..mask.height())
            .filter(|&y| (0..mask.width()).any(|x| mask.luma(x, y) > 180))
            .collect();
        let top = rows[0] as i64;
        let bottom = (SAMPLE_H - 1 - rows[rows.len() - 1]) as i64;
        assert!((top - bottom).abs() <= 2, "{} vs {}", top, bottom);
    }

    #[test]
    fn test_system_face_upright_and_centered() {
        let Ok(face) = Typeface::resolve(crate::config::FontChoice::System) else {
            return;
        };
        let mask = rasterize("H", &face, Anchor::Left).unwrap().unwrap();
        assert_eq!(mask.font_size(), START_FONT_SIZE);
        assert!(mask.count_above(180, 10) > 0);

        let rows: Vec<usize> = (0..mask.height())
            .filter(|&y| (0..mask.width()).any(|x| mask.luma(x, y) > 180))
            .collect();
        let top = rows[0] as i64;
        let bottom = (SAMPLE_H - 1 - rows[rows.len() - 1]) as i64;
        // Cap height is most of the em box, so a flipped outline would sit far off center.
        assert!((top - bottom).abs() <= 40, "{} vs {}", top, bottom);
        assert!(rows.len() > 100, "{} rows", rows.len());

        let (first, _) = bright_columns(&mask);
        assert!((15..60).contains(&first), "first column {}", first);
    }
}
