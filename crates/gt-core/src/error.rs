use thiserror::Error;

/// Errors originating from the core types and the rendering engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Invalid width/height dimensions (zero on either axis).
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel buffer length does not match width × height.
    #[error("Taille de buffer incohérente : {actual} pixels pour {expected} attendus")]
    BufferSize {
        /// width × height.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Crop region falls outside the source raster.
    #[error("Région hors limites : {width}×{height} à ({x}, {y}) dans {src_width}×{src_height}")]
    Crop {
        /// Left edge of the region.
        x: u32,
        /// Top edge of the region.
        y: u32,
        /// Region width.
        width: u32,
        /// Region height.
        height: u32,
        /// Source raster width.
        src_width: u32,
        /// Source raster height.
        src_height: u32,
    },

    /// Resolution is zero or does not divide the padded dimensions.
    #[error("Résolution {resolution} incompatible avec une image {width}×{height}")]
    Resolution {
        /// Requested number of characters per row.
        resolution: u32,
        /// Padded width.
        width: u32,
        /// Padded height.
        height: u32,
    },

    /// Lookup attempted on an index that never held any character.
    #[error("Le jeu de caractères est vide")]
    EmptyCharset,

    /// Lookup attempted after every character was removed from the index.
    #[error("L'index de luminosité a été vidé par des suppressions")]
    DegenerateIndex,
}
