//! Renders text as a mosaic of colored Voronoi cells.
//!
//! The text is rasterized into a fixed-size mask, bright pixels are sampled into jittered
//! points (plus a few uniformly scattered ones), the points are scaled onto the output surface
//! and tessellated, and every cell is filled with a color that depends on how far its point lies
//! from the center. See [`pipeline`] for the entry points.

pub mod color;
pub mod config;
pub mod error;
pub mod font;
pub mod mask;
pub mod math;
pub mod pipeline;
pub mod rand;
pub mod render;
pub mod sample;
pub mod scale;
pub mod surface;
pub mod tessellate;

pub use error::{Error, Result};
