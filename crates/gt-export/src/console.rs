use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use gt_core::grid::AsciiGrid;
use gt_core::traits::AsciiOutput;

/// Écrit la grille ligne par ligne sur un flux texte.
///
/// # Example
/// ```
/// use gt_core::grid::AsciiGrid;
/// use gt_core::traits::AsciiOutput;
/// use gt_export::ConsoleOutput;
///
/// let grid = AsciiGrid::from_rows(&["#.", ".#"]).unwrap();
/// let mut out = ConsoleOutput::new(Vec::new());
/// out.out(&grid).unwrap();
/// assert_eq!(out.into_inner(), b"#.\n.#\n");
/// ```
pub struct ConsoleOutput<W: Write = Stdout> {
    writer: W,
}

impl ConsoleOutput<Stdout> {
    /// Console output on the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AsciiOutput for ConsoleOutput<W> {
    fn out(&mut self, grid: &AsciiGrid) -> Result<()> {
        let mut line = String::with_capacity(grid.width as usize);
        for row in grid.rows() {
            line.clear();
            line.extend(row.iter());
            writeln!(self.writer, "{line}").context("Écriture console impossible")?;
        }
        self.writer.flush().context("Écriture console impossible")?;
        Ok(())
    }
}
