//! Moteur de conversion image → ASCII de glyphtile.
//!
//! Pads and tiles a raster, measures each tile's BT.709 brightness and
//! resolves it to the character of closest normalized ink density.
pub mod glyphs;
pub mod luminance;
pub mod matcher;
pub mod pipeline;
pub mod tiler;

pub use matcher::CharBrightnessIndex;
pub use pipeline::{RenderPipeline, render, render_par};
