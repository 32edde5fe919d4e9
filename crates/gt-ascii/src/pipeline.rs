use gt_core::config::RenderConfig;
use gt_core::error::CoreError;
use gt_core::grid::AsciiGrid;
use gt_core::raster::Raster;
use gt_core::traits::GlyphSource;
use rayon::prelude::*;

use crate::luminance::brightness;
use crate::matcher::CharBrightnessIndex;
use crate::tiler::{divide, pad, padded_size, validate_resolution};

/// Convertit un raster en grille de caractères.
///
/// Pad → divide → for each tile, brightness then lookup. Tile `i` lands at
/// column `i % resolution`, row `i / resolution`.
///
/// Both the resolution and the index are validated once, before any tile
/// is computed, so a failing render never yields partial output.
///
/// # Errors
/// [`CoreError::Resolution`] if `resolution` does not divide the padded
/// dimensions, [`CoreError::EmptyCharset`] / [`CoreError::DegenerateIndex`]
/// if the index holds no character.
///
/// # Example
/// ```
/// use gt_core::raster::{Pixel, Raster};
/// use gt_ascii::matcher::CharBrightnessIndex;
/// use gt_ascii::pipeline::render;
///
/// let raster = Raster::from_fn(2, 2, |x, y| {
///     if x == y { Pixel::WHITE } else { Pixel::BLACK }
/// }).unwrap();
/// let mut index = CharBrightnessIndex::builtin([]);
/// index.insert_ink('.', 1);
/// index.insert_ink('#', 20);
///
/// let grid = render(&raster, &index, 2).unwrap();
/// assert_eq!(grid.lines(), vec!["#.", ".#"]);
/// ```
pub fn render<G: GlyphSource>(
    raster: &Raster,
    index: &CharBrightnessIndex<G>,
    resolution: u32,
) -> Result<AsciiGrid, CoreError> {
    let tiles = prepare(raster, index, resolution)?;
    let mut grid = AsciiGrid::new(resolution, tile_rows(tiles.len(), resolution));
    for (i, tile) in tiles.iter().enumerate() {
        let ch = index.lookup(brightness(tile))?;
        let i = i as u32;
        grid.set(i % resolution, i / resolution, ch);
    }
    Ok(grid)
}

/// Same output as [`render`], tiles computed in parallel with rayon.
///
/// The index is borrowed for the whole call, so it cannot be mutated while
/// a render is in flight.
///
/// # Errors
/// Same as [`render`].
pub fn render_par<G: GlyphSource>(
    raster: &Raster,
    index: &CharBrightnessIndex<G>,
    resolution: u32,
) -> Result<AsciiGrid, CoreError> {
    let tiles = prepare(raster, index, resolution)?;
    let cells = tiles
        .par_iter()
        .map(|tile| index.lookup(brightness(tile)))
        .collect::<Result<Vec<char>, CoreError>>()?;
    Ok(AsciiGrid {
        height: tile_rows(cells.len(), resolution),
        width: resolution,
        cells,
    })
}

fn prepare<G: GlyphSource>(
    raster: &Raster,
    index: &CharBrightnessIndex<G>,
    resolution: u32,
) -> Result<Vec<Raster>, CoreError> {
    let (padded_w, padded_h) = padded_size(raster.width(), raster.height());
    validate_resolution(resolution, padded_w, padded_h)?;
    index.ensure_ready()?;

    let padded = pad(raster);
    let tiles = divide(resolution, &padded)?;
    log::debug!(
        "rendu {}×{} → {padded_w}×{padded_h}, {} tuiles de {}×{}",
        raster.width(),
        raster.height(),
        tiles.len(),
        padded_w / resolution,
        padded_h / resolution,
    );
    Ok(tiles)
}

fn tile_rows(tiles: usize, resolution: u32) -> u32 {
    (tiles / resolution.max(1) as usize) as u32
}

/// Pipeline configuré : séquentiel ou parallèle.
///
/// # Example
/// ```
/// use gt_core::config::RenderConfig;
/// use gt_core::raster::{Pixel, Raster};
/// use gt_ascii::matcher::CharBrightnessIndex;
/// use gt_ascii::pipeline::RenderPipeline;
///
/// let pipeline = RenderPipeline::from_config(&RenderConfig::default());
/// let index = CharBrightnessIndex::builtin(" #".chars());
/// let raster = Raster::filled(4, 4, Pixel::WHITE).unwrap();
/// let grid = pipeline.render(&raster, &index, 4).unwrap();
/// assert_eq!(grid.to_string(), "####\n####\n####\n####");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderPipeline {
    /// Dispatch tiles to the rayon thread pool.
    pub parallel: bool,
}

impl RenderPipeline {
    #[must_use]
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.parallel)
    }

    /// Render with the configured strategy.
    ///
    /// # Errors
    /// Same as [`render`].
    pub fn render<G: GlyphSource>(
        &self,
        raster: &Raster,
        index: &CharBrightnessIndex<G>,
        resolution: u32,
    ) -> Result<AsciiGrid, CoreError> {
        if self.parallel {
            render_par(raster, index, resolution)
        } else {
            render(raster, index, resolution)
        }
    }
}
