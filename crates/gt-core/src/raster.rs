use crate::error::CoreError;

/// Pixel RGB 8 bits, sans alpha.
///
/// # Example
/// ```
/// use gt_core::raster::Pixel;
/// let p = Pixel::new(255, 128, 0);
/// assert_eq!(p.r, 255);
/// assert_eq!(Pixel::WHITE, Pixel::new(255, 255, 255));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Pixel {
    /// Pure white, used as padding fill.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[inline(always)]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Grille immuable de pixels RGB, row-major.
///
/// Invariant : `pixels.len() == width * height`, et aucune dimension nulle.
/// Les champs sont privés : une fois construit, un raster n'est jamais
/// modifié. Les dérivations (`crop`) produisent une copie.
///
/// # Example
/// ```
/// use gt_core::raster::{Pixel, Raster};
/// let raster = Raster::filled(4, 2, Pixel::BLACK).unwrap();
/// assert_eq!(raster.width(), 4);
/// assert_eq!(raster.pixels().len(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Raster {
    /// Build a raster from a row-major pixel buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either dimension is zero,
    /// and [`CoreError::BufferSize`] if the buffer length is not
    /// `width * height`.
    ///
    /// # Example
    /// ```
    /// use gt_core::raster::{Pixel, Raster};
    /// let r = Raster::new(2, 1, vec![Pixel::BLACK, Pixel::WHITE]).unwrap();
    /// assert_eq!(r.pixel(1, 0), Pixel::WHITE);
    /// assert!(Raster::new(2, 2, vec![Pixel::BLACK]).is_err());
    /// ```
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Raster uniforme d'une seule couleur.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either dimension is zero.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self, CoreError> {
        Self::new(
            width,
            height,
            vec![pixel; width as usize * height as usize],
        )
    }

    /// Build a raster by evaluating `f(x, y)` for every position.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either dimension is zero.
    ///
    /// # Example
    /// ```
    /// use gt_core::raster::{Pixel, Raster};
    /// let checker = Raster::from_fn(2, 2, |x, y| {
    ///     if (x + y) % 2 == 0 { Pixel::WHITE } else { Pixel::BLACK }
    /// }).unwrap();
    /// assert_eq!(checker.pixel(1, 1), Pixel::WHITE);
    /// ```
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Pixel,
    ) -> Result<Self, CoreError> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Width in pixels.
    #[inline(always)]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline(always)]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel buffer.
    #[inline(always)]
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Accès au pixel (x, y).
    ///
    /// # Panics
    /// Panics if (x, y) lies outside the raster.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// One row of pixels.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u32) -> &[Pixel] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Copy the `width × height` block whose top-left corner is (x, y).
    ///
    /// # Errors
    /// Returns [`CoreError::Crop`] if the block does not fit inside the
    /// raster, or [`CoreError::InvalidDimensions`] for an empty block.
    ///
    /// # Example
    /// ```
    /// use gt_core::raster::{Pixel, Raster};
    /// let src = Raster::from_fn(4, 4, |x, _| Pixel::new(x as u8, 0, 0)).unwrap();
    /// let block = src.crop(2, 1, 2, 2).unwrap();
    /// assert_eq!(block.pixel(0, 0), Pixel::new(2, 0, 0));
    /// assert!(src.crop(3, 3, 2, 2).is_err());
    /// ```
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Self, CoreError> {
        let fits = u64::from(x) + u64::from(width) <= u64::from(self.width)
            && u64::from(y) + u64::from(height) <= u64::from(self.height);
        if !fits {
            return Err(CoreError::Crop {
                x,
                y,
                width,
                height,
                src_width: self.width,
                src_height: self.height,
            });
        }
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in y..y + height {
            let line = self.row(row);
            pixels.extend_from_slice(&line[x as usize..(x + width) as usize]);
        }
        Self::new(width, height, pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            Raster::new(0, 3, Vec::new()),
            Err(CoreError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let err = Raster::new(2, 2, vec![Pixel::WHITE; 3]).unwrap_err();
        assert_eq!(
            err,
            CoreError::BufferSize {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn from_fn_is_row_major() {
        let r = Raster::from_fn(3, 2, |x, y| Pixel::new(x as u8, y as u8, 0)).unwrap();
        assert_eq!(r.pixels()[4], Pixel::new(1, 1, 0));
        assert_eq!(r.row(1)[2], Pixel::new(2, 1, 0));
    }

    #[test]
    fn crop_copies_exact_block() {
        let src = Raster::from_fn(4, 3, |x, y| Pixel::new(x as u8, y as u8, 7)).unwrap();
        let block = src.crop(1, 1, 3, 2).unwrap();
        assert_eq!(block.width(), 3);
        assert_eq!(block.height(), 2);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(block.pixel(x, y), src.pixel(x + 1, y + 1));
            }
        }
    }

    #[test]
    fn crop_out_of_bounds_fails() {
        let src = Raster::filled(2, 2, Pixel::BLACK).unwrap();
        assert!(matches!(src.crop(1, 0, 2, 1), Err(CoreError::Crop { .. })));
        assert!(matches!(
            src.crop(0, 0, 0, 1),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }
}
