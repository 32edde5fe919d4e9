use gt_core::error::CoreError;
use gt_core::raster::{Pixel, Raster};

/// Dimensions après padding : plus petite puissance de deux ≥ chaque côté,
/// calculée indépendamment par axe.
///
/// # Example
/// ```
/// use gt_ascii::tiler::padded_size;
/// assert_eq!(padded_size(300, 200), (512, 256));
/// assert_eq!(padded_size(64, 1), (64, 1));
/// ```
#[inline]
#[must_use]
pub fn padded_size(width: u32, height: u32) -> (u32, u32) {
    (width.next_power_of_two(), height.next_power_of_two())
}

/// Pad a raster to power-of-two dimensions, centering it on a white canvas.
///
/// The offset on each axis is `floor((new - old) / 2)`. A raster whose
/// dimensions are already powers of two comes back as an equal copy.
///
/// # Example
/// ```
/// use gt_core::raster::{Pixel, Raster};
/// use gt_ascii::tiler::pad;
///
/// let src = Raster::filled(3, 2, Pixel::BLACK).unwrap();
/// let padded = pad(&src);
/// assert_eq!((padded.width(), padded.height()), (4, 2));
/// assert_eq!(padded.pixel(0, 0), Pixel::BLACK);
/// assert_eq!(padded.pixel(3, 1), Pixel::WHITE);
/// ```
#[must_use]
pub fn pad(raster: &Raster) -> Raster {
    let (width, height) = (raster.width(), raster.height());
    let (new_w, new_h) = padded_size(width, height);
    if new_w == width && new_h == height {
        return raster.clone();
    }

    let x_pad = (new_w - width) / 2;
    let y_pad = (new_h - height) / 2;
    log::trace!("pad {width}×{height} → {new_w}×{new_h} (offset {x_pad},{y_pad})");

    let mut pixels = vec![Pixel::WHITE; new_w as usize * new_h as usize];
    for y in 0..height {
        let dst = (y + y_pad) as usize * new_w as usize + x_pad as usize;
        pixels[dst..dst + width as usize].copy_from_slice(raster.row(y));
    }

    // Dimensions non nulles par construction.
    Raster::new(new_w, new_h, pixels).unwrap_or_else(|_| raster.clone())
}

/// Check that `resolution` tiles evenly into `width × height`.
///
/// # Errors
/// Returns [`CoreError::Resolution`] if the resolution is zero or does not
/// divide both dimensions.
///
/// # Example
/// ```
/// use gt_ascii::tiler::validate_resolution;
/// assert!(validate_resolution(4, 16, 8).is_ok());
/// assert!(validate_resolution(16, 16, 8).is_err());
/// assert!(validate_resolution(0, 16, 8).is_err());
/// ```
pub fn validate_resolution(resolution: u32, width: u32, height: u32) -> Result<(), CoreError> {
    if resolution == 0 || width % resolution != 0 || height % resolution != 0 {
        return Err(CoreError::Resolution {
            resolution,
            width,
            height,
        });
    }
    Ok(())
}

/// Découpe un raster en `resolution × resolution` sous-rasters disjoints.
///
/// Tile size is `(width / resolution) × (height / resolution)`. Tiles are
/// returned row-major: row 0 left to right, then row 1, and so on, so tile
/// `i` sits at column `i % resolution`, row `i / resolution`.
///
/// # Errors
/// Returns [`CoreError::Resolution`] if the resolution does not divide the
/// raster's dimensions.
///
/// # Example
/// ```
/// use gt_core::raster::{Pixel, Raster};
/// use gt_ascii::tiler::divide;
///
/// let src = Raster::filled(8, 4, Pixel::WHITE).unwrap();
/// let tiles = divide(2, &src).unwrap();
/// assert_eq!(tiles.len(), 4);
/// assert_eq!((tiles[0].width(), tiles[0].height()), (4, 2));
/// ```
pub fn divide(resolution: u32, raster: &Raster) -> Result<Vec<Raster>, CoreError> {
    validate_resolution(resolution, raster.width(), raster.height())?;

    let tile_w = raster.width() / resolution;
    let tile_h = raster.height() / resolution;

    let mut tiles = Vec::with_capacity(resolution as usize * resolution as usize);
    for row in 0..resolution {
        for col in 0..resolution {
            tiles.push(raster.crop(col * tile_w, row * tile_h, tile_w, tile_h)?);
        }
    }
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Raster {
        Raster::from_fn(width, height, |x, y| Pixel::new(x as u8, y as u8, 42)).unwrap()
    }

    #[test]
    fn padded_size_per_axis() {
        assert_eq!(padded_size(1, 1), (1, 1));
        assert_eq!(padded_size(5, 17), (8, 32));
        assert_eq!(padded_size(1024, 768), (1024, 1024));
    }

    #[test]
    fn pad_is_identity_on_powers_of_two() {
        let src = gradient(8, 4);
        assert_eq!(pad(&src), src);
    }

    #[test]
    fn pad_is_idempotent() {
        for (w, h) in [(3, 5), (7, 7), (1, 9), (33, 2)] {
            let once = pad(&gradient(w, h));
            assert_eq!(pad(&once), once, "{w}×{h}");
        }
    }

    #[test]
    fn pad_preserves_pixels_and_whitens_border() {
        let src = gradient(5, 3);
        let padded = pad(&src);
        assert_eq!((padded.width(), padded.height()), (8, 4));
        let (x_pad, y_pad) = (1, 0);
        for y in 0..padded.height() {
            for x in 0..padded.width() {
                let inside = (x_pad..x_pad + 5).contains(&x) && (y_pad..y_pad + 3).contains(&y);
                if inside {
                    assert_eq!(padded.pixel(x, y), src.pixel(x - x_pad, y - y_pad));
                } else {
                    assert_eq!(padded.pixel(x, y), Pixel::WHITE, "bord ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn pad_offset_rounds_down() {
        // 6 → 8 : offset 1 ; 3 → 4 : offset 0.
        let src = Raster::filled(6, 3, Pixel::BLACK).unwrap();
        let padded = pad(&src);
        assert_eq!(padded.pixel(0, 0), Pixel::WHITE);
        assert_eq!(padded.pixel(1, 0), Pixel::BLACK);
        assert_eq!(padded.pixel(6, 2), Pixel::BLACK);
        assert_eq!(padded.pixel(7, 2), Pixel::WHITE);
        assert_eq!(padded.pixel(3, 3), Pixel::WHITE);
    }

    #[test]
    fn divide_partitions_without_gaps_or_overlap() {
        let src = gradient(16, 16);
        let resolution = 4;
        let tiles = divide(resolution, &src).unwrap();
        assert_eq!(tiles.len(), 16);

        let mut seen = vec![0u8; 16 * 16];
        for (i, tile) in tiles.iter().enumerate() {
            assert_eq!((tile.width(), tile.height()), (4, 4));
            let col = i as u32 % resolution;
            let row = i as u32 / resolution;
            for y in 0..4 {
                for x in 0..4 {
                    let (sx, sy) = (col * 4 + x, row * 4 + y);
                    assert_eq!(tile.pixel(x, y), src.pixel(sx, sy));
                    seen[(sy * 16 + sx) as usize] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn divide_non_square_raster_gives_square_tile_grid() {
        let src = gradient(16, 4);
        let tiles = divide(4, &src).unwrap();
        assert_eq!(tiles.len(), 16);
        assert_eq!((tiles[0].width(), tiles[0].height()), (4, 1));
        assert_eq!(tiles[5].pixel(0, 0), src.pixel(4, 1));
    }

    #[test]
    fn divide_rejects_bad_resolution() {
        let src = gradient(8, 8);
        assert_eq!(
            divide(3, &src).unwrap_err(),
            CoreError::Resolution {
                resolution: 3,
                width: 8,
                height: 8
            }
        );
        assert!(divide(16, &src).is_err());
        assert!(divide(0, &src).is_err());
    }

    #[test]
    fn divide_resolution_one_is_whole_raster() {
        let src = gradient(4, 2);
        let tiles = divide(1, &src).unwrap();
        assert_eq!(tiles, vec![src]);
    }
}
