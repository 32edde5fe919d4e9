//! Types, configuration et traits partagés de glyphtile.
//!
//! This crate contains the raster and grid types, the error taxonomy and
//! the configuration logic used across the glyphtile workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod glyph;
pub mod grid;
pub mod raster;
pub mod traits;

pub use charset::CharSet;
pub use config::RenderConfig;
pub use error::CoreError;
pub use glyph::GlyphBitmap;
pub use grid::AsciiGrid;
pub use raster::{Pixel, Raster};
pub use traits::{AsciiOutput, GlyphSource};
