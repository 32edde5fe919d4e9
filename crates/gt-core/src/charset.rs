use std::ops::RangeInclusive;

/// Les 10 chiffres : jeu par défaut du shell.
pub const CHARSET_DIGITS: &str = "0123456789";

/// 10 caractères, compact, bon contraste.
pub const CHARSET_COMPACT: &str = " .:-=+*#%@";

/// Paul Bourke extended, bon équilibre.
pub const CHARSET_STANDARD: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// ASCII imprimable, espace compris.
pub const PRINTABLE: RangeInclusive<char> = ' '..='~';

/// Jeu de caractères distincts qui conserve l'ordre d'insertion.
///
/// L'ordre ne sert qu'à l'affichage : le matcher de luminosité n'en
/// dépend pas.
///
/// # Example
/// ```
/// use gt_core::charset::CharSet;
/// let mut set = CharSet::from_chars("abca".chars());
/// assert_eq!(set.len(), 3);
/// set.insert('z');
/// set.remove('a');
/// assert_eq!(set.to_string(), "b c z");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharSet {
    chars: Vec<char>,
}

impl CharSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect distinct characters, first occurrence wins.
    #[must_use]
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut set = Self::new();
        set.extend(chars);
        set
    }

    /// Insert `ch` at the end. Returns `false` if it was already present.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.contains(ch) {
            return false;
        }
        self.chars.push(ch);
        true
    }

    /// Remove `ch`, keeping the order of the rest. Returns `false` if absent.
    pub fn remove(&mut self, ch: char) -> bool {
        match self.chars.iter().position(|&c| c == ch) {
            Some(idx) => {
                self.chars.remove(idx);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// Characters in insertion order, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

impl Extend<char> for CharSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for ch in iter {
            self.insert(ch);
        }
    }
}

impl std::fmt::Display for CharSet {
    /// Space-separated listing, in insertion order.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, ch) in self.chars.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_insertion_order() {
        let set = CharSet::from_chars("cabac".chars());
        assert_eq!(set.as_slice(), &['c', 'a', 'b']);
    }

    #[test]
    fn insert_and_remove_report_changes() {
        let mut set = CharSet::new();
        assert!(set.insert('x'));
        assert!(!set.insert('x'));
        assert!(set.remove('x'));
        assert!(!set.remove('x'));
        assert!(set.is_empty());
    }

    #[test]
    fn printable_range_has_95_chars() {
        let set = CharSet::from_chars(PRINTABLE);
        assert_eq!(set.len(), 95);
        assert!(set.contains(' '));
        assert!(set.contains('~'));
    }

    #[test]
    fn presets_are_distinct() {
        for preset in [CHARSET_DIGITS, CHARSET_COMPACT, CHARSET_STANDARD] {
            let set = CharSet::from_chars(preset.chars());
            assert_eq!(set.len(), preset.chars().count(), "doublon dans {preset:?}");
        }
    }
}
