//! Glyph rasterizers: the built-in 5×8 bitmap font and an `ab_glyph`
//! backed TrueType/OpenType rasterizer.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, point};
use anyhow::{Context, Result};
use gt_core::glyph::GlyphBitmap;
use gt_core::traits::GlyphSource;

/// Glyph width of the built-in font, in cells.
pub const BUILTIN_WIDTH: u32 = 5;
/// Glyph height of the built-in font, in cells.
pub const BUILTIN_HEIGHT: u32 = 8;

/// Police 5×8 classique, ASCII 0x20..=0x7E.
///
/// One byte per column, left to right; bit 0 is the top row.
static FONT_5X8: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x56, 0x20, 0x50], // &
    [0x00, 0x08, 0x07, 0x03, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x2A, 0x1C, 0x7F, 0x1C, 0x2A], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x80, 0x70, 0x30, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x00, 0x60, 0x60, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x72, 0x49, 0x49, 0x49, 0x46], // 2
    [0x21, 0x41, 0x49, 0x4D, 0x33], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x31], // 6
    [0x41, 0x21, 0x11, 0x09, 0x07], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x46, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x00, 0x14, 0x00, 0x00], // :
    [0x00, 0x40, 0x34, 0x00, 0x00], // ;
    [0x00, 0x08, 0x14, 0x22, 0x41], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x59, 0x09, 0x06], // ?
    [0x3E, 0x41, 0x5D, 0x59, 0x4E], // @
    [0x7C, 0x12, 0x11, 0x12, 0x7C], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x41, 0x3E], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x73], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x1C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x26, 0x49, 0x49, 0x49, 0x32], // S
    [0x03, 0x01, 0x7F, 0x01, 0x03], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x59, 0x49, 0x4D, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x41], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x41, 0x41, 0x41, 0x7F], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x03, 0x07, 0x08, 0x00], // `
    [0x20, 0x54, 0x54, 0x78, 0x40], // a
    [0x7F, 0x28, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x28], // c
    [0x38, 0x44, 0x44, 0x28, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x00, 0x08, 0x7E, 0x09, 0x02], // f
    [0x18, 0xA4, 0xA4, 0x9C, 0x78], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x40, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x78, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0xFC, 0x18, 0x24, 0x24, 0x18], // p
    [0x18, 0x24, 0x24, 0x18, 0xFC], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x24], // s
    [0x04, 0x04, 0x3F, 0x44, 0x24], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x4C, 0x90, 0x90, 0x90, 0x7C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x77, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x02, 0x01, 0x02, 0x04, 0x02], // ~
];

/// Blocs de trame : quart, moitié, trois quarts, plein.
static SHADES: [(char, [u8; 5]); 4] = [
    ('░', [0x11, 0x44, 0x11, 0x44, 0x11]),
    ('▒', [0x55, 0xAA, 0x55, 0xAA, 0x55]),
    ('▓', [0xEE, 0xBB, 0xEE, 0xBB, 0xEE]),
    ('█', [0xFF, 0xFF, 0xFF, 0xFF, 0xFF]),
];

/// Glyphe de remplacement (`.notdef`) : boîte creuse.
static NOTDEF: [u8; 5] = [0x7F, 0x41, 0x41, 0x41, 0x7F];

/// Police bitmap intégrée, sans dépendance externe.
///
/// Covers printable ASCII plus the shade blocks `░▒▓█`; any other
/// character is drawn as a hollow box.
///
/// # Example
/// ```
/// use gt_ascii::glyphs::BuiltinGlyphs;
/// use gt_core::traits::GlyphSource;
///
/// let glyphs = BuiltinGlyphs;
/// assert_eq!(glyphs.ink_count(' '), 0);
/// assert!(glyphs.ink_count('#') > glyphs.ink_count('.'));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinGlyphs;

impl BuiltinGlyphs {
    fn columns(ch: char) -> &'static [u8; 5] {
        let code = ch as u32;
        if (0x20..=0x7E).contains(&code) {
            return &FONT_5X8[(code - 0x20) as usize];
        }
        SHADES
            .iter()
            .find(|(shade, _)| *shade == ch)
            .map_or(&NOTDEF, |(_, cols)| cols)
    }
}

impl GlyphSource for BuiltinGlyphs {
    fn glyph(&self, ch: char) -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::blank(BUILTIN_WIDTH, BUILTIN_HEIGHT);
        for (x, &column) in Self::columns(ch).iter().enumerate() {
            for y in 0..BUILTIN_HEIGHT {
                if (column >> y) & 1 == 1 {
                    bitmap.set(x as u32, y, true);
                }
            }
        }
        bitmap
    }

    fn ink_count(&self, ch: char) -> u32 {
        Self::columns(ch).iter().map(|c| c.count_ones()).sum()
    }
}

/// Rasterise les caractères d'une police vectorielle sur une grille carrée.
///
/// Coverage is computed by `ab_glyph`; a cell counts as inked when its
/// coverage reaches 50 %.
pub struct FontGlyphs {
    font: FontVec,
    size: u32,
}

impl FontGlyphs {
    /// Wrap font data (TTF/OTF) rasterized on a `size × size` grid.
    ///
    /// # Errors
    /// Returns an error if the font data is invalid.
    pub fn from_bytes(data: Vec<u8>, size: u32) -> Result<Self> {
        let font = FontVec::try_from_vec(data).context("Police invalide")?;
        Ok(Self {
            font,
            size: size.max(1),
        })
    }

    /// Load a font file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid font.
    ///
    /// # Example
    /// ```no_run
    /// use gt_ascii::glyphs::FontGlyphs;
    /// use std::path::Path;
    /// let glyphs = FontGlyphs::load(Path::new("fonts/DejaVuSansMono.ttf"), 16).unwrap();
    /// ```
    pub fn load(path: &Path, size: u32) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Impossible de lire la police {}", path.display()))?;
        let glyphs = Self::from_bytes(data, size)
            .with_context(|| format!("Police invalide : {}", path.display()))?;
        log::debug!("Police chargée : {} ({}px)", path.display(), glyphs.size);
        Ok(glyphs)
    }

    /// Side of the rasterization grid.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl GlyphSource for FontGlyphs {
    fn glyph(&self, ch: char) -> GlyphBitmap {
        let size = self.size;
        let mut bitmap = GlyphBitmap::blank(size, size);

        let scale = PxScale::from(size as f32);
        let baseline = baseline_px(
            self.font.ascent_unscaled(),
            self.font.height_unscaled(),
            scale.y,
        );
        let glyph = self
            .font
            .glyph_id(ch)
            .with_scale_and_position(scale, point(0.0, baseline));

        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            #[allow(clippy::cast_possible_wrap)]
            outline.draw(|x, y, coverage| {
                let px = x as i32 + bounds.min.x as i32;
                let py = y as i32 + bounds.min.y as i32;
                plot(&mut bitmap, px, py, coverage);
            });
        }
        bitmap
    }
}

/// Couverture minimale pour qu'une cellule compte comme encrée.
const INK_COVERAGE: f32 = 0.5;

/// Baseline position from the top of the cell: the ascender takes
/// `ascent / (ascent - descent)` of the cell height.
fn baseline_px(ascent: f32, height: f32, cell_px: f32) -> f32 {
    if height <= 0.0 {
        return cell_px;
    }
    ascent * cell_px / height
}

/// Set (x, y) when `coverage` reaches [`INK_COVERAGE`]; cells outside the
/// bitmap are dropped.
fn plot(bitmap: &mut GlyphBitmap, x: i32, y: i32, coverage: f32) {
    if coverage < INK_COVERAGE || x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < bitmap.width() && y < bitmap.height() {
        bitmap.set(x, y, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_printable_ascii() {
        let glyphs = BuiltinGlyphs;
        for ch in ' '..='~' {
            let glyph = glyphs.glyph(ch);
            assert_eq!(glyph.width(), BUILTIN_WIDTH);
            assert_eq!(glyph.height(), BUILTIN_HEIGHT);
            assert_eq!(glyph.ink_count(), glyphs.ink_count(ch), "{ch:?}");
        }
    }

    #[test]
    fn only_space_is_blank() {
        let glyphs = BuiltinGlyphs;
        for ch in '!'..='~' {
            assert!(glyphs.ink_count(ch) > 0, "{ch:?} sans encre");
        }
        assert_eq!(glyphs.ink_count(' '), 0);
    }

    #[test]
    fn shades_are_monotonic() {
        let glyphs = BuiltinGlyphs;
        let inks: Vec<u32> = ['░', '▒', '▓', '█'].iter().map(|&c| glyphs.ink_count(c)).collect();
        assert!(inks.windows(2).all(|w| w[0] < w[1]), "{inks:?}");
        assert_eq!(inks[3], BUILTIN_WIDTH * BUILTIN_HEIGHT);
    }

    #[test]
    fn unknown_char_is_notdef_box() {
        let glyphs = BuiltinGlyphs;
        assert_eq!(glyphs.glyph('é'), glyphs.glyph('€'));
        assert_eq!(glyphs.ink_count('é'), 7 + 2 + 2 + 2 + 7);
    }

    #[test]
    fn known_counts() {
        let glyphs = BuiltinGlyphs;
        assert_eq!(glyphs.ink_count('.'), 4);
        assert_eq!(glyphs.ink_count('-'), 5);
        assert_eq!(glyphs.ink_count('|'), 6);
    }

    #[test]
    fn glyph_bit_layout() {
        let glyph = BuiltinGlyphs.glyph('.');
        assert!(glyph.get(2, 5) && glyph.get(2, 6) && glyph.get(3, 5) && glyph.get(3, 6));
        assert!(!glyph.get(0, 0));
    }

    #[test]
    fn half_coverage_is_the_ink_threshold() {
        let mut bitmap = GlyphBitmap::blank(4, 4);
        plot(&mut bitmap, 0, 0, 0.49);
        plot(&mut bitmap, 1, 0, 0.5);
        plot(&mut bitmap, 2, 0, 1.0);
        assert!(!bitmap.get(0, 0));
        assert!(bitmap.get(1, 0) && bitmap.get(2, 0));
        assert_eq!(bitmap.ink_count(), 2);
    }

    #[test]
    fn coverage_outside_the_cell_is_dropped() {
        let mut bitmap = GlyphBitmap::blank(4, 4);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (9, 9)] {
            plot(&mut bitmap, x, y, 1.0);
        }
        assert_eq!(bitmap.ink_count(), 0);
        plot(&mut bitmap, 3, 3, 1.0);
        assert!(bitmap.get(3, 3));
    }

    #[test]
    fn baseline_splits_cell_between_ascent_and_descent() {
        // ascent 800, descent -200 : baseline à 80 % de la cellule.
        let baseline = baseline_px(800.0, 1000.0, 16.0);
        assert!((baseline - 12.8).abs() < 1e-5);
        // La descendante finit exactement au bas de la cellule.
        let bottom = baseline + 200.0 * 16.0 / 1000.0;
        assert!((bottom - 16.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_font_metrics_put_baseline_at_bottom() {
        assert!((baseline_px(0.0, 0.0, 16.0) - 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_font_data_is_rejected() {
        assert!(FontGlyphs::from_bytes(vec![0, 1, 2, 3], 16).is_err());
    }
}
