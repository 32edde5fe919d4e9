use std::path::PathBuf;

use clap::Parser;

use gt_core::config::{OutputKind, RenderConfig};

/// glyphtile — Image to ASCII art renderer.
#[derive(Parser, Debug)]
#[command(name = "glyphtile", version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF). Défaut : `image_path` de la config.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Nombre de caractères par ligne (puissance de deux).
    #[arg(short, long)]
    pub resolution: Option<u32>,

    /// Jeu de caractères initial, ex. " .:-=+*#%@".
    #[arg(long)]
    pub charset: Option<String>,

    /// Sortie : console ou html.
    #[arg(long)]
    pub output: Option<String>,

    /// Fichier écrit par la sortie HTML.
    #[arg(long)]
    pub html_path: Option<PathBuf>,

    /// Police TTF/OTF pour mesurer l'encre des caractères.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Calcul des tuiles en parallèle.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Rendu unique puis sortie, sans shell interactif.
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    ///
    /// # Errors
    /// Returns an error on an unknown output kind or an invalid result.
    pub fn apply_overrides(&self, config: &mut RenderConfig) -> anyhow::Result<()> {
        if let Some(ref image) = self.image {
            config.image_path.clone_from(image);
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(ref charset) = self.charset {
            config.charset.clone_from(charset);
        }
        if let Some(ref output) = self.output {
            config.output = output.parse::<OutputKind>()?;
        }
        if let Some(ref path) = self.html_path {
            config.html_path.clone_from(path);
        }
        if let Some(ref font) = self.font {
            config.font_path = Some(font.clone());
        }
        if self.parallel {
            config.parallel = true;
        }
        config.clamp_all();
        config.validate()?;
        Ok(())
    }
}
