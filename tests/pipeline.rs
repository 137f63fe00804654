use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use hex_literal::hex;
use image::ImageFormat;

use glyphcells::config::{Config, FontChoice, RenderConfig};
use glyphcells::font::Typeface;
use glyphcells::pipeline::{self, FrameStats};
use glyphcells::rand::Rng;
use glyphcells::render::BACKGROUND;
use glyphcells::surface::RasterSurface;

const SEED: [u8; 32] = hex!("33c9371d25ce44a408f8a6473fbad86bf81e1a178c012cd49a85ffff14e4f4e5");

fn block_config() -> Config {
    Config {
        font: FontChoice::Block,
        ..Config::default()
    }
}

fn render(
    text: &str,
    width: u32,
    height: u32,
    ratio: f32,
) -> anyhow::Result<(RasterSurface, FrameStats)> {
    let mut render_config = RenderConfig::new(text, 1.2, width, height);
    render_config.device_pixel_ratio = ratio;
    let mut surface = RasterSurface::for_config(&render_config)?;
    let mut rng = Rng::from_seed(&SEED);
    let stats = pipeline::render(
        &render_config,
        &block_config(),
        &Typeface::Block,
        &mut rng,
        &mut surface,
    )?;
    Ok((surface, stats))
}

fn assert_px_close((x, y): (u32, u32), actual: [u8; 3], expected: [u8; 3]) {
    const THRESHOLD: u8 = 2;
    for (a, e) in actual.iter().zip(&expected) {
        if a.abs_diff(*e) > THRESHOLD {
            panic!(
                "at ({}, {}): expected ~{:?}, got {:?}; max allowed deviation is {}",
                x, y, expected, actual, THRESHOLD
            );
        }
    }
}

#[test_log::test]
fn test_hi_frame() -> anyhow::Result<()> {
    let (_, stats) = render("Hi", 300, 100, 1.0)?;
    assert!(stats.glyph_points >= 1);
    assert_eq!(stats.coverage_points, 30);
    assert!(stats.glyph_points + stats.coverage_points >= 30);
    assert!(stats.cells_painted >= 1);

    // Same seed, same frame.
    let (_, again) = render("Hi", 300, 100, 1.0)?;
    assert_eq!(stats, again);
    Ok(())
}

#[test]
fn test_empty_text_is_background() -> anyhow::Result<()> {
    let (surface, stats) = render("", 300, 100, 2.0)?;
    assert_eq!(stats.cells_painted, 0);
    assert_eq!(surface.device_size(), (600, 200));
    let data = surface.draw_target().get_data();
    for &px in data {
        let [b, g, r, a] = px.to_le_bytes();
        assert_eq!(a, 255);
        assert_eq!([r, g, b], [BACKGROUND.r, BACKGROUND.g, BACKGROUND.b]);
    }
    Ok(())
}

#[test]
fn test_png_output() -> anyhow::Result<()> {
    let (surface, stats) = render("Hi", 300, 100, 1.0)?;
    assert!(stats.cells_painted >= 1);

    let path: PathBuf =
        std::env::temp_dir().join(format!("glyphcells-0x{}.png", hex::encode(SEED)));
    surface.write_png(&path)?;

    let reader = BufReader::new(
        File::open(&path).with_context(|| format!("Failed to read {}", path.display()))?,
    );
    let decoded = image::io::Reader::with_format(reader, ImageFormat::Png)
        .decode()
        .context("Failed to decode image")?
        .into_rgba8();
    std::fs::remove_file(&path).ok();

    assert_eq!((decoded.width(), decoded.height()), (300, 100));
    let data = surface.draw_target().get_data();
    for ((x, y, px), &actual) in decoded.enumerate_pixels().zip(data) {
        let [b, g, r, a] = actual.to_le_bytes();
        assert_eq!(a, 255, "frame is opaque at ({}, {})", x, y);
        let [pr, pg, pb, _] = px.0;
        assert_px_close((x, y), [pr, pg, pb], [r, g, b]);
    }
    Ok(())
}
