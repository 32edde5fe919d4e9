use std::io;

use anyhow::Result;
use clap::Parser;

use gt_ascii::glyphs::{BuiltinGlyphs, FontGlyphs};
use gt_ascii::matcher::CharBrightnessIndex;
use gt_ascii::pipeline::RenderPipeline;
use gt_core::config::{OutputKind, RenderConfig};
use gt_core::traits::{AsciiOutput, GlyphSource};
use gt_export::{ConsoleOutput, HtmlOutput};
use gt_source::ImageSource;

pub mod cli;
pub mod shell;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config + overrides CLI
    let config = resolve_config(&cli)?;

    // 4. Source des glyphes (police TTF ou table intégrée)
    let glyphs = glyph_source(&config)?;

    // 5. Charger l'image
    let source = ImageSource::open(&config.image_path)?;
    let (width, height) = source.native_size();
    log::info!("Image {} : {width}×{height}", source.name());

    // 6. Rendu unique
    if cli.once {
        return render_once(&config, glyphs, &source);
    }

    // 7. Shell interactif sur stdin/stdout
    let name = source.name();
    let mut shell = shell::Shell::new(config, glyphs, source.raster().clone(), name);
    shell.run(io::stdin().lock(), io::stdout().lock())
}

/// Load the TOML file (defaults if absent) then apply the command line.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    let mut config = if cli.config.exists() {
        gt_core::config::load_config(&cli.config)?
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        RenderConfig::default()
    };
    cli.apply_overrides(&mut config)?;
    Ok(config)
}

fn glyph_source(config: &RenderConfig) -> Result<Box<dyn GlyphSource>> {
    match config.font_path {
        Some(ref path) => {
            let font = FontGlyphs::load(path, config.glyph_size)?;
            log::info!("Police : {} ({} px)", path.display(), config.glyph_size);
            Ok(Box::new(font))
        }
        None => Ok(Box::new(BuiltinGlyphs)),
    }
}

fn render_once(
    config: &RenderConfig,
    glyphs: Box<dyn GlyphSource>,
    source: &ImageSource,
) -> Result<()> {
    let index = CharBrightnessIndex::new(glyphs, config.charset.chars());
    let grid = RenderPipeline::from_config(config).render(
        source.raster(),
        &index,
        config.resolution,
    )?;
    match config.output {
        OutputKind::Console => ConsoleOutput::stdout().out(&grid),
        OutputKind::Html => {
            HtmlOutput::new(&config.html_path, config.html_font.as_str()).out(&grid)
        }
    }
}
