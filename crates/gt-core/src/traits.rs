use crate::glyph::GlyphBitmap;
use crate::grid::AsciiGrid;

/// Rasterise un caractère en grille booléenne de taille fixe.
///
/// Implémenté par : `BuiltinGlyphs`, `FontGlyphs` (crate `gt-ascii`).
///
/// # Example
/// ```
/// use gt_core::traits::GlyphSource;
/// use gt_core::glyph::GlyphBitmap;
///
/// struct Solid;
/// impl GlyphSource for Solid {
///     fn glyph(&self, _ch: char) -> GlyphBitmap {
///         let mut g = GlyphBitmap::blank(1, 1);
///         g.set(0, 0, true);
///         g
///     }
/// }
/// assert_eq!(Solid.glyph('x').ink_count(), 1);
/// ```
pub trait GlyphSource: Send + Sync {
    /// Bitmap du caractère. Must be deterministic: the same character
    /// always yields the same bitmap.
    fn glyph(&self, ch: char) -> GlyphBitmap;

    /// Number of inked cells in the glyph of `ch`.
    fn ink_count(&self, ch: char) -> u32 {
        self.glyph(ch).ink_count()
    }
}

impl<T: GlyphSource + ?Sized> GlyphSource for Box<T> {
    fn glyph(&self, ch: char) -> GlyphBitmap {
        (**self).glyph(ch)
    }

    fn ink_count(&self, ch: char) -> u32 {
        (**self).ink_count(ch)
    }
}

/// Présente une grille ASCII (console, fichier HTML, ...).
///
/// # Example
/// ```
/// use gt_core::traits::AsciiOutput;
/// use gt_core::grid::AsciiGrid;
///
/// struct Discard;
/// impl AsciiOutput for Discard {
///     fn out(&mut self, _grid: &AsciiGrid) -> anyhow::Result<()> { Ok(()) }
/// }
/// Discard.out(&AsciiGrid::new(1, 1)).unwrap();
/// ```
pub trait AsciiOutput {
    /// Write the grid to the destination.
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written.
    fn out(&mut self, grid: &AsciiGrid) -> anyhow::Result<()>;
}
