/// Rendu booléen d'un caractère sur une grille de taille fixe.
///
/// Row-major, `true` = pixel encré.
///
/// # Example
/// ```
/// use gt_core::glyph::GlyphBitmap;
/// let mut glyph = GlyphBitmap::blank(3, 3);
/// glyph.set(1, 1, true);
/// assert_eq!(glyph.ink_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl GlyphBitmap {
    /// An empty (all `false`) bitmap.
    #[must_use]
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Width in cells.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the cell (x, y) is inked.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[y as usize * self.width as usize + x as usize]
    }

    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        self.bits[y as usize * self.width as usize + x as usize] = on;
    }

    /// Nombre de pixels encrés : proxy de la densité visuelle du caractère.
    #[must_use]
    pub fn ink_count(&self) -> u32 {
        self.bits.iter().filter(|&&on| on).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_has_no_ink() {
        let glyph = GlyphBitmap::blank(16, 16);
        assert_eq!(glyph.ink_count(), 0);
        assert_eq!(glyph.width(), 16);
    }

    #[test]
    fn set_and_clear() {
        let mut glyph = GlyphBitmap::blank(2, 2);
        glyph.set(0, 1, true);
        glyph.set(1, 1, true);
        assert!(glyph.get(0, 1));
        glyph.set(0, 1, false);
        assert_eq!(glyph.ink_count(), 1);
    }
}
