use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal failures of a render pass.
///
/// Degenerate input (empty text, too few points, cells clipped away) is not an error: it yields
/// an empty or partial [`Mosaic`][crate::pipeline::Mosaic] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// No system font matched the requested family.
    #[error("no usable system font: {0}")]
    FontUnavailable(String),

    /// The typeface could not measure or outline a glyph.
    #[error("glyph lookup failed: {0}")]
    Glyph(String),

    /// The drawing surface could not be allocated.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The triangulation rejected an input point (non-finite or out of range).
    #[error("triangulation rejected point ({x}, {y}): {reason}")]
    Triangulation { x: f64, y: f64, reason: String },

    /// The finished frame could not be encoded.
    #[error("failed to encode frame: {0}")]
    Encode(String),
}
