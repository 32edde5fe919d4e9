use std::fmt;

/// Grille de sortie ASCII, row-major.
///
/// `width × height` equals the number of tiles the pipeline produced.
///
/// # Example
/// ```
/// use gt_core::grid::AsciiGrid;
/// let mut grid = AsciiGrid::new(3, 2);
/// grid.set(2, 1, '@');
/// assert_eq!(grid.get(2, 1), '@');
/// assert_eq!(grid.to_string(), "   \n  @");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiGrid {
    /// Flat array of characters, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: u32,
    /// Height in characters.
    pub height: u32,
}

impl AsciiGrid {
    /// Crée une grille remplie d'espaces.
    ///
    /// # Example
    /// ```
    /// use gt_core::grid::AsciiGrid;
    /// let grid = AsciiGrid::new(80, 24);
    /// assert_eq!(grid.cells.len(), 80 * 24);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![' '; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Build a grid from rows of equal length. Returns `None` when the rows
    /// are ragged.
    ///
    /// # Example
    /// ```
    /// use gt_core::grid::AsciiGrid;
    /// let grid = AsciiGrid::from_rows(&["#.", ".#"]).unwrap();
    /// assert_eq!(grid.get(1, 0), '.');
    /// assert!(AsciiGrid::from_rows(&["ab", "c"]).is_none());
    /// ```
    #[must_use]
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            let before = cells.len();
            cells.extend(row.as_ref().chars());
            if cells.len() - before != width {
                return None;
            }
        }
        Some(Self {
            cells,
            width: width as u32,
            height: rows.len() as u32,
        })
    }

    /// Set the character at column `x`, row `y`.
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, ch: char) {
        self.cells[y as usize * self.width as usize + x as usize] = ch;
    }

    /// Character at column `x`, row `y`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> char {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Each row collected into a `String`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows().map(|row| row.iter().collect()).collect()
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for ch in row {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
