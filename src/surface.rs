use std::f32::consts::PI;
use std::path::Path;

use raqote::{
    BlendMode, DrawOptions, DrawTarget, PathBuilder, SolidSource, Source, StrokeStyle, Transform,
};

use crate::color::Rgba;
use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::math::Point;
use crate::render::Surface;

/// Largest backing store edge, in device pixels.
pub const MAX_DEVICE_PIXELS: u32 = 16384;

/// A raster [`Surface`] backed by a raqote draw target.
///
/// Drawing calls take logical units; the backing store holds `round(width * ratio)` by
/// `round(height * ratio)` device pixels and maps between the two with a single scale.
pub struct RasterSurface {
    dt: DrawTarget,
    width: u32,
    height: u32,
    device_pixel_ratio: f32,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Result<Self> {
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(Error::SurfaceUnavailable(format!(
                "invalid device pixel ratio {}",
                device_pixel_ratio
            )));
        }
        let device_w = (width as f32 * device_pixel_ratio).round();
        let device_h = (height as f32 * device_pixel_ratio).round();
        let max = MAX_DEVICE_PIXELS as f32;
        if !(1.0..=max).contains(&device_w) || !(1.0..=max).contains(&device_h) {
            return Err(Error::SurfaceUnavailable(format!(
                "{}x{} device pixels is outside 1..={}",
                device_w, device_h, MAX_DEVICE_PIXELS
            )));
        }
        let mut dt = DrawTarget::new(device_w as i32, device_h as i32);
        dt.set_transform(&Transform::scale(device_pixel_ratio, device_pixel_ratio));
        Ok(RasterSurface {
            dt,
            width,
            height,
            device_pixel_ratio,
        })
    }

    /// A surface sized for the (sanitized) output dimensions of `config`.
    pub fn for_config(config: &RenderConfig) -> Result<Self> {
        let config = config.clone().sanitized();
        RasterSurface::new(
            config.output_width,
            config.output_height,
            config.device_pixel_ratio,
        )
    }

    /// Logical size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Backing store size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        (self.dt.width() as u32, self.dt.height() as u32)
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    pub fn draw_target(&self) -> &DrawTarget {
        &self.dt
    }

    /// Premultiplied `0xAARRGGBB` pixel at device coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.dt.width() as u32 || y >= self.dt.height() as u32 {
            return None;
        }
        let index = y as usize * self.dt.width() as usize + x as usize;
        self.dt.get_data().get(index).copied()
    }

    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.dt
            .write_png(path)
            .map_err(|e| Error::Encode(e.to_string()))
    }
}

fn polygon_path(points: &[Point]) -> Option<raqote::Path> {
    let (&(x0, y0), rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(x0 as f32, y0 as f32);
    for &(x, y) in rest {
        pb.line_to(x as f32, y as f32);
    }
    pb.close();
    Some(pb.finish())
}

fn solid(color: Rgba) -> Source<'static> {
    Source::Solid(SolidSource::from(color))
}

impl Surface for RasterSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let options = DrawOptions {
            blend_mode: BlendMode::Clear,
            ..DrawOptions::new()
        };
        self.dt.fill_rect(
            x as f32,
            y as f32,
            w as f32,
            h as f32,
            &solid(Rgba { r: 0, g: 0, b: 0, a: 0 }),
            &options,
        );
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.dt.fill_rect(
            x as f32,
            y as f32,
            w as f32,
            h as f32,
            &solid(color),
            &DrawOptions::new(),
        );
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba) {
        if let Some(path) = polygon_path(points) {
            self.dt.fill(&path, &solid(color), &DrawOptions::new());
        }
    }

    fn stroke_polygon(&mut self, points: &[Point], color: Rgba, width: f32) {
        if let Some(path) = polygon_path(points) {
            let style = StrokeStyle {
                width,
                ..StrokeStyle::default()
            };
            self.dt.stroke(&path, &solid(color), &style, &DrawOptions::new());
        }
    }

    fn fill_circle(&mut self, (x, y): Point, radius: f64, color: Rgba) {
        let mut pb = PathBuilder::new();
        pb.arc(x as f32, y as f32, radius as f32, 0.0, 2.0 * PI);
        pb.close();
        self.dt.fill(&pb.finish(), &solid(color), &DrawOptions::new());
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pipeline::Mosaic;
    use crate::render::{paint, BACKGROUND};

    #[test]
    fn test_rejects_unusable_sizes() {
        assert!(matches!(
            RasterSurface::new(0, 100, 1.0),
            Err(Error::SurfaceUnavailable(_))
        ));
        assert!(matches!(
            RasterSurface::new(10_000, 100, 2.0),
            Err(Error::SurfaceUnavailable(_))
        ));
        assert!(matches!(
            RasterSurface::new(100, 100, f32::NAN),
            Err(Error::SurfaceUnavailable(_))
        ));
        assert!(matches!(
            RasterSurface::new(100, 100, 0.0),
            Err(Error::SurfaceUnavailable(_))
        ));
    }

    #[test]
    fn test_device_pixel_ratio() {
        let surface = RasterSurface::new(300, 100, 2.0).unwrap();
        assert_eq!(surface.size(), (300, 100));
        assert_eq!(surface.device_size(), (600, 200));

        let surface = RasterSurface::new(301, 101, 1.5).unwrap();
        assert_eq!(surface.device_size(), (452, 152));
    }

    #[test]
    fn test_background_covers_scaled_surface() {
        let mut surface = RasterSurface::new(30, 10, 2.0).unwrap();
        paint(&Mosaic::empty(30.0, 10.0), &mut surface);
        let expected = 0xff00_0000
            | u32::from(BACKGROUND.r) << 16
            | u32::from(BACKGROUND.g) << 8
            | u32::from(BACKGROUND.b);
        assert_eq!(surface.pixel(0, 0), Some(expected));
        assert_eq!(surface.pixel(59, 19), Some(expected));
        assert_eq!(surface.pixel(60, 0), None);
    }

    #[test]
    fn test_clear_rect() {
        let mut surface = RasterSurface::new(4, 4, 1.0).unwrap();
        surface.fill_rect(0.0, 0.0, 4.0, 4.0, Rgba::opaque(255, 0, 0));
        surface.clear_rect(0.0, 0.0, 2.0, 4.0);
        assert_eq!(surface.pixel(0, 0), Some(0));
        assert_eq!(surface.pixel(3, 0), Some(0xffff_0000));
    }

    #[test]
    fn test_fill_polygon() {
        let mut surface = RasterSurface::new(10, 10, 1.0).unwrap();
        let left_half = [(0.0, 0.0), (5.0, 0.0), (5.0, 10.0), (0.0, 10.0)];
        surface.fill_polygon(&left_half, Rgba::opaque(0, 0, 255));
        assert_eq!(surface.pixel(2, 5), Some(0xff00_00ff));
        assert_eq!(surface.pixel(7, 5), Some(0));
        surface.fill_polygon(&[], Rgba::opaque(0, 255, 0));
    }
}
