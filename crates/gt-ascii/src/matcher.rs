//! Index caractère → luminosité, mutable entre deux rendus.

use std::collections::HashMap;

use gt_core::error::CoreError;
use gt_core::traits::GlyphSource;

use crate::glyphs::BuiltinGlyphs;

/// Bornes courantes des comptes d'encre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extremes {
    /// Plus petit compte d'encre indexé.
    pub min: u32,
    /// Plus grand compte d'encre indexé.
    pub max: u32,
}

impl Extremes {
    /// Normalise `ink` dans [0, 1]. When every character shares the same
    /// ink count, everything normalizes to 1.0.
    #[inline(always)]
    #[must_use]
    pub fn normalize(self, ink: u32) -> f64 {
        if self.min == self.max {
            return 1.0;
        }
        f64::from(ink - self.min) / f64::from(self.max - self.min)
    }
}

/// Associe chaque caractère à son compte d'encre et retrouve le caractère
/// dont la luminosité normalisée est la plus proche d'une cible.
///
/// The extremes are cached and kept consistent with the mapping: insertions
/// extend them in O(1), removing (or overwriting) a character that holds an
/// extreme value triggers an O(n) rescan. Character sets are small, so no
/// ordered auxiliary structure is kept.
///
/// Lookups scan the whole mapping with an explicit `(distance, char)`
/// comparison, so the result never depends on the `HashMap`'s iteration
/// order: equal distances resolve to the smallest character code.
///
/// # Example
/// ```
/// use gt_ascii::matcher::CharBrightnessIndex;
///
/// let index = CharBrightnessIndex::builtin(" .:#".chars());
/// assert_eq!(index.lookup(0.0).unwrap(), ' ');
/// assert_eq!(index.lookup(1.0).unwrap(), '#');
/// ```
pub struct CharBrightnessIndex<G: GlyphSource = BuiltinGlyphs> {
    glyphs: G,
    inks: HashMap<char, u32>,
    extremes: Option<Extremes>,
    /// Set when removals emptied a previously populated index.
    drained: bool,
}

impl CharBrightnessIndex<BuiltinGlyphs> {
    /// Index measured with the built-in bitmap font.
    #[must_use]
    pub fn builtin(chars: impl IntoIterator<Item = char>) -> Self {
        Self::new(BuiltinGlyphs, chars)
    }
}

impl<G: GlyphSource> CharBrightnessIndex<G> {
    /// Build an index over `chars`, measuring each glyph with `glyphs`.
    #[must_use]
    pub fn new(glyphs: G, chars: impl IntoIterator<Item = char>) -> Self {
        let mut index = Self {
            glyphs,
            inks: HashMap::new(),
            extremes: None,
            drained: false,
        };
        for ch in chars {
            index.add(ch);
        }
        index
    }

    /// Add `ch`, measuring its glyph. Re-adding an existing character is a
    /// no-op re-insertion.
    pub fn add(&mut self, ch: char) {
        let ink = self.glyphs.ink_count(ch);
        self.insert_ink(ch, ink);
    }

    /// Add `ch` with an explicit ink count, overwriting any previous value.
    ///
    /// # Example
    /// ```
    /// use gt_ascii::matcher::CharBrightnessIndex;
    ///
    /// let mut index = CharBrightnessIndex::builtin([]);
    /// index.insert_ink('.', 1);
    /// index.insert_ink('#', 20);
    /// assert_eq!(index.normalized('.'), Some(0.0));
    /// assert_eq!(index.normalized('#'), Some(1.0));
    /// ```
    pub fn insert_ink(&mut self, ch: char, ink: u32) {
        let previous = self.inks.insert(ch, ink);
        self.drained = false;

        match (previous, self.extremes) {
            (Some(old), Some(ext)) if old != ink && (old == ext.min || old == ext.max) => {
                // L'ancienne valeur tenait une borne : elle peut avoir disparu.
                self.rescan();
            }
            (_, Some(ext)) => {
                self.extremes = Some(Extremes {
                    min: ext.min.min(ink),
                    max: ext.max.max(ink),
                });
            }
            (_, None) => {
                self.extremes = Some(Extremes { min: ink, max: ink });
            }
        }
    }

    /// Remove `ch`. Returns `false` (and does nothing) if it was absent.
    ///
    /// # Example
    /// ```
    /// use gt_ascii::matcher::CharBrightnessIndex;
    ///
    /// let mut index = CharBrightnessIndex::builtin(['.', '#']);
    /// assert!(index.remove('#'));
    /// assert!(!index.remove('#'));
    /// assert_eq!(index.lookup(1.0).unwrap(), '.');
    /// ```
    pub fn remove(&mut self, ch: char) -> bool {
        let Some(ink) = self.inks.remove(&ch) else {
            return false;
        };
        if self.inks.is_empty() {
            self.extremes = None;
            self.drained = true;
            return true;
        }
        if let Some(ext) = self.extremes {
            if ink == ext.min || ink == ext.max {
                self.rescan();
            }
        }
        true
    }

    /// Recompute the extremes from scratch. O(n).
    fn rescan(&mut self) {
        self.extremes = self.inks.values().fold(None, |acc, &ink| {
            Some(match acc {
                None => Extremes { min: ink, max: ink },
                Some(Extremes { min, max }) => Extremes {
                    min: min.min(ink),
                    max: max.max(ink),
                },
            })
        });
        log::trace!("rescan des bornes : {:?}", self.extremes);
    }

    /// Caractère dont la luminosité normalisée est la plus proche de `target`.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if the index never held a
    /// character, [`CoreError::DegenerateIndex`] if removals emptied it.
    ///
    /// # Example
    /// ```
    /// use gt_ascii::matcher::CharBrightnessIndex;
    /// use gt_core::error::CoreError;
    ///
    /// let index = CharBrightnessIndex::builtin([]);
    /// assert_eq!(index.lookup(0.5), Err(CoreError::EmptyCharset));
    /// ```
    pub fn lookup(&self, target: f64) -> Result<char, CoreError> {
        let Some(ext) = self.extremes else {
            return Err(self.empty_error());
        };

        // Ordre total sur (distance, caractère), NaN compris.
        let mut best: Option<(f64, char)> = None;
        for (&ch, &ink) in &self.inks {
            let distance = (ext.normalize(ink) - target).abs();
            let closer = match best {
                None => true,
                Some((best_distance, best_ch)) => distance
                    .total_cmp(&best_distance)
                    .then(ch.cmp(&best_ch))
                    .is_lt(),
            };
            if closer {
                best = Some((distance, ch));
            }
        }
        best.map(|(_, ch)| ch).ok_or_else(|| self.empty_error())
    }

    /// The error a lookup on an empty index reports.
    #[must_use]
    pub fn empty_error(&self) -> CoreError {
        if self.drained {
            CoreError::DegenerateIndex
        } else {
            CoreError::EmptyCharset
        }
    }

    /// Fail fast when no lookup can succeed.
    ///
    /// # Errors
    /// Same as [`Self::lookup`] on an empty index.
    pub fn ensure_ready(&self) -> Result<(), CoreError> {
        if self.inks.is_empty() {
            return Err(self.empty_error());
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inks.is_empty()
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.inks.contains_key(&ch)
    }

    /// Raw ink count of `ch`, if indexed.
    #[must_use]
    pub fn ink(&self, ch: char) -> Option<u32> {
        self.inks.get(&ch).copied()
    }

    /// Luminosité normalisée de `ch` dans [0, 1], if indexed.
    #[must_use]
    pub fn normalized(&self, ch: char) -> Option<f64> {
        let ext = self.extremes?;
        self.ink(ch).map(|ink| ext.normalize(ink))
    }

    /// Current extremes, `None` when empty.
    #[must_use]
    pub fn extremes(&self) -> Option<Extremes> {
        self.extremes
    }

    /// Indexed characters sorted by character code.
    #[must_use]
    pub fn chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.inks.keys().copied().collect();
        chars.sort_unstable();
        chars
    }

    /// The glyph source used to measure characters.
    #[must_use]
    pub fn glyphs(&self) -> &G {
        &self.glyphs
    }
}
