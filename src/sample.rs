use crate::config::SamplingPolicy;
use crate::mask::GlyphMask;
use crate::math::Point;
use crate::rand::Rng;

/// Pixels at or below this red-channel value are background.
pub const LUMA_THRESHOLD: u8 = 180;
/// Pixels at or below this alpha are background.
pub const ALPHA_THRESHOLD: u8 = 10;
/// Number of uniformly scattered points appended after the glyph points.
pub const COVERAGE_POINTS: usize = 30;
/// Largest offset added to either coordinate of a glyph point.
pub const JITTER: f64 = 1.0;

/// Sampled generator points in sampling space: glyph points in row-major scan order, followed
/// by [`COVERAGE_POINTS`] coverage points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplePoints {
    pub points: Vec<Point>,
    pub glyph_count: usize,
}

impl SamplePoints {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn glyph_points(&self) -> &[Point] {
        &self.points[..self.glyph_count]
    }

    pub fn coverage_points(&self) -> &[Point] {
        &self.points[self.glyph_count..]
    }
}

/// Grid step in mask pixels for a density: denser sampling means a finer grid.
pub fn grid_step(density: f64) -> usize {
    let step = (4.0 / density.max(0.001)).floor();
    if step.is_finite() {
        (step as usize).max(1)
    } else {
        1
    }
}

/// Samples foreground pixels of `mask` on a density-dependent grid, jittering each accepted
/// pixel, then scatters the coverage points over the whole mask.
///
/// Returns no points at all if the mask has no foreground pixels. Otherwise the coverage points
/// are always appended, even when the grid or the acceptance draw kept no glyph point.
pub fn sample(
    mask: &GlyphMask,
    density: f64,
    policy: SamplingPolicy,
    rng: &mut Rng,
) -> SamplePoints {
    if mask.count_above(LUMA_THRESHOLD, ALPHA_THRESHOLD) == 0 {
        return SamplePoints::default();
    }
    let step = grid_step(density);
    let mut points = Vec::new();
    for y in (0..mask.height()).step_by(step) {
        for x in (0..mask.width()).step_by(step) {
            if mask.luma(x, y) <= LUMA_THRESHOLD || mask.alpha(x, y) <= ALPHA_THRESHOLD {
                continue;
            }
            if policy == SamplingPolicy::Bernoulli && !rng.odds(density) {
                continue;
            }
            let jx = rng.uniform(-JITTER, JITTER);
            let jy = rng.uniform(-JITTER, JITTER);
            points.push((x as f64 + jx, y as f64 + jy));
        }
    }

    let glyph_count = points.len();
    let (w, h) = (mask.width() as f64, mask.height() as f64);
    points.extend((0..COVERAGE_POINTS).map(|_| (rng.uniform(0.0, w), rng.uniform(0.0, h))));
    SamplePoints {
        points,
        glyph_count,
    }
}
