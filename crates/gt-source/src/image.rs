use std::path::{Path, PathBuf};

use ::image::RgbImage;
use anyhow::{Context, Result};
use gt_core::raster::{Pixel, Raster};

/// Image statique décodée, avec son chemin d'origine.
///
/// # Example
/// ```no_run
/// use gt_source::image::ImageSource;
/// use std::path::Path;
/// let source = ImageSource::open(Path::new("cat.jpeg")).unwrap();
/// println!("{}×{}", source.raster().width(), source.raster().height());
/// ```
#[derive(Clone, Debug)]
pub struct ImageSource {
    path: PathBuf,
    raster: Raster,
}

impl ImageSource {
    /// Decode the image at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded.
    pub fn open(path: &Path) -> Result<Self> {
        let raster = load_raster(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            raster,
        })
    }

    /// Decoded pixels.
    #[must_use]
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, falling back to the full path.
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or_else(|| self.path.display().to_string(), String::from)
    }

    /// Native dimensions (before padding).
    #[must_use]
    pub fn native_size(&self) -> (u32, u32) {
        (self.raster.width(), self.raster.height())
    }
}

/// Décode un fichier image (PNG, JPEG, BMP, GIF) en raster RGB.
///
/// The alpha channel, if any, is dropped.
///
/// # Errors
/// Returns an error if the file cannot be read, decoded, or is empty.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = ::image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgb = img.to_rgb8();
    log::debug!(
        "Image chargée : {} ({}×{})",
        path.display(),
        rgb.width(),
        rgb.height()
    );
    raster_from_rgb(&rgb).with_context(|| format!("Image vide : {}", path.display()))
}

/// Convert an in-memory RGB image into a [`Raster`].
///
/// # Errors
/// Returns an error if the image has a zero dimension.
///
/// # Example
/// ```
/// use image::{Rgb, RgbImage};
/// use gt_core::raster::Pixel;
/// use gt_source::image::raster_from_rgb;
///
/// let img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
/// let raster = raster_from_rgb(&img).unwrap();
/// assert_eq!(raster.pixel(2, 1), Pixel::new(10, 20, 30));
/// ```
pub fn raster_from_rgb(img: &RgbImage) -> Result<Raster> {
    let (width, height) = img.dimensions();
    let pixels = img
        .pixels()
        .map(|p| Pixel::new(p.0[0], p.0[1], p.0[2]))
        .collect();
    Ok(Raster::new(width, height, pixels)?)
}
