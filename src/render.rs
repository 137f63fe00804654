//! Paints a planned [`Mosaic`] onto a [`Surface`].

use serde::Serialize;

use crate::color::Rgba;
use crate::math::Point;
use crate::pipeline::Mosaic;

pub const BACKGROUND: Rgba = Rgba::opaque(0x11, 0x11, 0x11);
pub const CELL_STROKE_ALPHA: f64 = 0.2;
pub const CELL_STROKE_WIDTH: f32 = 1.0;
pub const MARKER_ALPHA: f64 = 0.8;
pub const MARKER_RADIUS: f64 = 0.8;

/// The drawing primitives the renderer needs, in logical output units.
pub trait Surface {
    /// Resets the rectangle to fully transparent.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
    /// Fills the closed polygon through `points`.
    fn fill_polygon(&mut self, points: &[Point], color: Rgba);
    /// Outlines the closed polygon through `points`.
    fn stroke_polygon(&mut self, points: &[Point], color: Rgba, width: f32);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);
}

/// Paints `mosaic`: background, then every cell in point order, then a marker on every point.
pub fn paint<S: Surface + ?Sized>(mosaic: &Mosaic, surface: &mut S) {
    let (w, h) = (mosaic.width(), mosaic.height());
    surface.clear_rect(0.0, 0.0, w, h);
    surface.fill_rect(0.0, 0.0, w, h, BACKGROUND);

    let stroke = Rgba::with_alpha(0, 0, 0, CELL_STROKE_ALPHA);
    for (polygon, color) in mosaic.cells() {
        surface.fill_polygon(polygon, color.to_rgba());
        surface.stroke_polygon(polygon, stroke, CELL_STROKE_WIDTH);
    }

    let marker = Rgba::with_alpha(0, 0, 0, MARKER_ALPHA);
    for &point in mosaic.points() {
        surface.fill_circle(point, MARKER_RADIUS, marker);
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Rgba },
    FillPolygon { points: Vec<Point>, color: Rgba },
    StrokePolygon { points: Vec<Point>, color: Rgba, width: f32 },
    FillCircle { center: Point, radius: f64, color: Rgba },
}

/// A surface that records drawing calls instead of rasterizing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for DisplayList {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::ClearRect { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba) {
        self.ops.push(DrawOp::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[Point], color: Rgba, width: f32) {
        self.ops.push(DrawOp::StrokePolygon {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }
}
