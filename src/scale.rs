use crate::math::Point;

/// Independent per-axis linear map from one coordinate space to another, e.g. from the fixed
/// sampling space to the logical output surface.
///
/// Device pixel ratio is not part of this map; the output surface applies it once
/// as its own transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scale {
    pub sx: f64,
    pub sy: f64,
}

impl Scale {
    /// The map taking a `from` rectangle anchored at the origin onto a `to` rectangle.
    pub fn between((from_w, from_h): (f64, f64), (to_w, to_h): (f64, f64)) -> Self {
        Scale {
            sx: to_w / from_w,
            sy: to_h / from_h,
        }
    }

    pub fn inverse(self) -> Self {
        Scale {
            sx: 1.0 / self.sx,
            sy: 1.0 / self.sy,
        }
    }

    pub fn apply(self, (x, y): Point) -> Point {
        (x * self.sx, y * self.sy)
    }

    pub fn apply_all(self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}
