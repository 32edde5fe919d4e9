//! Chargement d'images pour glyphtile : décodage via `image`, conversion en `Raster`.

pub mod image;

pub use crate::image::{ImageSource, load_raster, raster_from_rgb};
