use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration complète du rendu et de la session shell.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use gt_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.resolution, 128);
/// assert_eq!(config.charset, "0123456789");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    // === Rendu ===
    /// Nombre de caractères par ligne. Doit diviser la largeur et la hauteur
    /// de l'image après padding.
    pub resolution: u32,
    /// Jeu de caractères initial (ordre d'affichage conservé).
    pub charset: String,
    /// Image chargée au démarrage.
    pub image_path: PathBuf,
    /// Calcul des tuiles en parallèle (rayon).
    pub parallel: bool,

    // === Glyphes ===
    /// Police TrueType/OpenType pour mesurer l'encre des caractères.
    /// `None` = police bitmap intégrée.
    pub font_path: Option<PathBuf>,
    /// Côté de la grille de rasterisation quand `font_path` est utilisé.
    pub glyph_size: u32,

    // === Sortie ===
    /// Destination de la grille.
    pub output: OutputKind,
    /// Fichier écrit par la sortie HTML.
    pub html_path: PathBuf,
    /// Famille de police monospace de la sortie HTML.
    pub html_font: String,
}

/// Output destination.
///
/// # Example
/// ```
/// use gt_core::config::OutputKind;
/// assert_eq!("html".parse::<OutputKind>().unwrap(), OutputKind::Html);
/// assert!("pdf".parse::<OutputKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Standard output.
    #[default]
    Console,
    /// Standalone HTML file.
    Html,
}

impl OutputKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Html => "html",
        }
    }
}

impl FromStr for OutputKind {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "console" => Ok(Self::Console),
            "html" => Ok(Self::Html),
            other => Err(CoreError::Config(format!("sortie inconnue '{other}'"))),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: 128,
            charset: crate::charset::CHARSET_DIGITS.to_string(),
            image_path: PathBuf::from("cat.jpeg"),
            parallel: false,
            font_path: None,
            glyph_size: 16,
            output: OutputKind::Console,
            html_path: PathBuf::from("out.html"),
            html_font: "Courier New".to_string(),
        }
    }
}

impl RenderConfig {
    /// Clamp numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.glyph_size = self.glyph_size.clamp(4, 128);
    }

    /// Reject values that cannot be clamped into something meaningful.
    ///
    /// The resolution is only checked for positivity here: whether it
    /// divides the padded image is known once an image is loaded.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] on a zero resolution or an empty HTML
    /// font family.
    ///
    /// # Example
    /// ```
    /// use gt_core::config::RenderConfig;
    /// let mut config = RenderConfig::default();
    /// assert!(config.validate().is_ok());
    /// config.resolution = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> std::result::Result<(), CoreError> {
        if self.resolution == 0 {
            return Err(CoreError::Config(
                "la résolution doit être strictement positive".into(),
            ));
        }
        if self.html_font.trim().is_empty() {
            return Err(CoreError::Config("police HTML vide".into()));
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    output: Option<OutputSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    resolution: Option<u32>,
    charset: Option<String>,
    image: Option<PathBuf>,
    parallel: Option<bool>,
    font_path: Option<PathBuf>,
    glyph_size: Option<u32>,
}

/// Output section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct OutputSection {
    kind: Option<OutputKind>,
    html_path: Option<PathBuf>,
    html_font: Option<String>,
}

/// Parse un document TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the document is not valid TOML or holds invalid values.
///
/// # Example
/// ```
/// use gt_core::config::{parse_config, OutputKind};
/// let config = parse_config("[render]\nresolution = 64\n[output]\nkind = \"html\"\n").unwrap();
/// assert_eq!(config.resolution, 64);
/// assert_eq!(config.output, OutputKind::Html);
/// assert_eq!(config.charset, "0123456789");
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.resolution {
            config.resolution = v;
        }
        if let Some(v) = r.charset {
            config.charset = v;
        }
        if let Some(v) = r.image {
            config.image_path = v;
        }
        if let Some(v) = r.parallel {
            config.parallel = v;
        }
        if let Some(v) = r.font_path {
            config.font_path = Some(v);
        }
        if let Some(v) = r.glyph_size {
            config.glyph_size = v;
        }
    }

    if let Some(o) = file.output {
        if let Some(v) = o.kind {
            config.output = v;
        }
        if let Some(v) = o.html_path {
            config.html_path = v;
        }
        if let Some(v) = o.html_font {
            config.html_font = v;
        }
    }

    config.clamp_all();
    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gt_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("Config invalide dans {}", path.display()))?;
    log::debug!("Config chargée depuis {}", path.display());
    Ok(config)
}
