use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gt_core::grid::AsciiGrid;
use gt_core::traits::AsciiOutput;

/// Largeur cible de la page, en pixels CSS.
const PAGE_WIDTH_PX: u32 = 1200;

/// Écrit la grille dans un document HTML autonome.
///
/// The grid sits in a `<pre>` block styled with the configured monospace
/// family; the font size shrinks with the number of columns so the art
/// keeps roughly the same on-screen width.
///
/// # Example
/// ```no_run
/// use gt_core::grid::AsciiGrid;
/// use gt_core::traits::AsciiOutput;
/// use gt_export::HtmlOutput;
///
/// let grid = AsciiGrid::from_rows(&["#.", ".#"]).unwrap();
/// HtmlOutput::new("out.html", "Courier New").out(&grid).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HtmlOutput {
    path: PathBuf,
    font: String,
}

impl HtmlOutput {
    pub fn new(path: impl Into<PathBuf>, font: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            font: font.into(),
        }
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsciiOutput for HtmlOutput {
    fn out(&mut self, grid: &AsciiGrid) -> Result<()> {
        let html = render_html(grid, &self.font);
        std::fs::write(&self.path, html)
            .with_context(|| format!("Impossible d'écrire {}", self.path.display()))?;
        log::info!("HTML écrit dans {}", self.path.display());
        Ok(())
    }
}

/// Taille de police en px pour `columns` caractères par ligne.
#[must_use]
pub fn font_size_px(columns: u32) -> u32 {
    (PAGE_WIDTH_PX / columns.max(1)).clamp(2, 24)
}

/// Build the HTML document for `grid`.
///
/// # Example
/// ```
/// use gt_core::grid::AsciiGrid;
/// use gt_export::html::render_html;
///
/// let grid = AsciiGrid::from_rows(&["<&>"]).unwrap();
/// let html = render_html(&grid, "Courier New");
/// assert!(html.contains("&lt;&amp;&gt;"));
/// assert!(html.contains("font-family: 'Courier New', monospace"));
/// ```
#[must_use]
pub fn render_html(grid: &AsciiGrid, font: &str) -> String {
    let font: String = font
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '<' | '>' | ';' | '{' | '}' | '\\'))
        .collect();
    let size = font_size_px(grid.width);

    let mut html = String::with_capacity(grid.cells.len() * 2 + 512);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>glyphtile</title>\n<style>\n");
    html.push_str("body { background: #ffffff; color: #000000; margin: 0; }\n");
    html.push_str(&format!(
        "pre {{ font-family: '{font}', monospace; font-size: {size}px; line-height: 1.0; letter-spacing: 0; margin: 0; }}\n"
    ));
    html.push_str("</style>\n</head>\n<body>\n<pre>\n");
    for row in grid.rows() {
        for &ch in row {
            push_escaped(&mut html, ch);
        }
        html.push('\n');
    }
    html.push_str("</pre>\n</body>\n</html>\n");
    html
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}
