use gt_core::raster::{Pixel, Raster};

/// Poids BT.709 (rouge, vert, bleu) en dix-millièmes.
///
/// Integer weights keep the accumulation exact: a uniform white raster
/// yields exactly 1.0, black exactly 0.0.
pub const BT709: (u32, u32, u32) = (2126, 7152, 722);

const WEIGHT_SCALE: u32 = 10_000;

#[inline(always)]
fn weighted(p: Pixel) -> u32 {
    u32::from(p.r) * BT709.0 + u32::from(p.g) * BT709.1 + u32::from(p.b) * BT709.2
}

/// Niveau de gris perceptuel BT.709 d'un pixel, dans [0, 255].
///
/// # Example
/// ```
/// use gt_core::raster::Pixel;
/// use gt_ascii::luminance::pixel_gray;
/// assert_eq!(pixel_gray(Pixel::WHITE), 255.0);
/// assert_eq!(pixel_gray(Pixel::BLACK), 0.0);
/// ```
#[inline(always)]
#[must_use]
pub fn pixel_gray(p: Pixel) -> f64 {
    f64::from(weighted(p)) / f64::from(WEIGHT_SCALE)
}

/// Luminosité moyenne normalisée d'un raster, dans [0, 1].
///
/// Average of [`pixel_gray`] over every pixel, divided by 255.
///
/// # Example
/// ```
/// use gt_core::raster::{Pixel, Raster};
/// use gt_ascii::luminance::brightness;
///
/// let white = Raster::filled(4, 4, Pixel::WHITE).unwrap();
/// assert_eq!(brightness(&white), 1.0);
/// let black = Raster::filled(4, 4, Pixel::BLACK).unwrap();
/// assert_eq!(brightness(&black), 0.0);
/// ```
#[must_use]
pub fn brightness(raster: &Raster) -> f64 {
    let pixels = raster.pixels();
    let total: u64 = pixels.iter().map(|&p| u64::from(weighted(p))).sum();
    let full = pixels.len() as u64 * u64::from(WEIGHT_SCALE) * 255;
    (total as f64 / full as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_scale() {
        assert_eq!(BT709.0 + BT709.1 + BT709.2, WEIGHT_SCALE);
    }

    #[test]
    fn green_dominates_red_and_blue() {
        let r = pixel_gray(Pixel::new(255, 0, 0));
        let g = pixel_gray(Pixel::new(0, 255, 0));
        let b = pixel_gray(Pixel::new(0, 0, 255));
        assert!(g > r && r > b);
    }

    #[test]
    fn half_black_half_white_is_half() {
        let raster =
            Raster::from_fn(2, 2, |x, _| if x == 0 { Pixel::BLACK } else { Pixel::WHITE })
                .unwrap();
        assert_eq!(brightness(&raster), 0.5);
    }

    #[test]
    fn always_within_unit_range() {
        for v in [0u8, 1, 17, 128, 200, 254, 255] {
            let raster = Raster::filled(3, 3, Pixel::new(v, 255 - v, v / 2)).unwrap();
            let b = brightness(&raster);
            assert!((0.0..=1.0).contains(&b), "{v} → {b}");
        }
    }

    #[test]
    fn pure_red_matches_weight() {
        let raster = Raster::filled(1, 1, Pixel::new(255, 0, 0)).unwrap();
        assert!((brightness(&raster) - 0.2126).abs() < 1e-9);
    }
}
