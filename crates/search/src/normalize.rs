//! Case and accent folding.
//!
//! Every character is canonically decomposed, combining marks are dropped and
//! what remains is lowercased, so `Á`, `á` and `a` all fold to `a`. Scripts
//! whose decomposition is not a base letter plus marks keep every part: a
//! Hangul syllable folds to its full jamo sequence. Folding keeps a map back
//! to the original character positions so match spans can be reported against
//! the raw text.

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Folds a single character, passing each folded character to `emit`.
///
/// Combining marks emit nothing; most other characters emit exactly one.
#[inline]
pub fn fold_char(c: char, mut emit: impl FnMut(char)) {
    decompose_canonical(c, |d| {
        if is_combining_mark(d) {
            return;
        }
        for lower in d.to_lowercase() {
            if !is_combining_mark(lower) {
                emit(lower);
            }
        }
    });
}

/// Folds a whole string.
pub fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        fold_char(c, |f| folded.push(f));
    }
    folded
}

/// Returns true if two strings are equal after trimming and folding.
pub fn folded_eq(a: &str, b: &str) -> bool {
    fold(a.trim()) == fold(b.trim())
}

/// Folded text with a position map back to the original `char` indices.
#[derive(Debug, Clone, Default)]
pub struct FoldedText {
    chars: Vec<char>,
    origin: Vec<usize>,
}

impl FoldedText {
    /// Folds `text`, remembering where each folded character came from.
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());

        for (idx, c) in text.chars().enumerate() {
            fold_char(c, |folded| {
                chars.push(folded);
                origin.push(idx);
            });
        }

        Self { chars, origin }
    }

    /// Folded characters.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of folded characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if nothing survived folding.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Maps a half-open folded range to a half-open range of original `char`
    /// indices. Empty ranges map to `None`.
    pub fn original_span(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        if start >= end || end > self.origin.len() {
            return None;
        }
        Some((self.origin[start], self.origin[end - 1] + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_folding() {
        assert_eq!(fold("TOYOTA Hilux"), "toyota hilux");
    }

    #[test]
    fn test_accents_fold_to_base() {
        assert_eq!(fold("Oxígeno"), "oxigeno");
        assert_eq!(fold("CAMIÓN"), "camion");
        assert_eq!(fold("Citroën"), "citroen");
        assert_eq!(fold("ñandú"), "nandu");
    }

    #[test]
    fn test_decomposed_input_matches_precomposed() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT
        let decomposed = "cafe\u{301}";
        assert_eq!(fold(decomposed), fold("café"));
    }

    #[test]
    fn test_folded_eq() {
        assert!(folded_eq(" Nuevo ", "nuevo"));
        assert!(folded_eq("Alternativo", "alternatívo"));
        assert!(!folded_eq("nuevo", "usado"));
    }

    #[test]
    fn test_origin_map_skips_combining_marks() {
        let text = FoldedText::new("e\u{301}x");
        assert_eq!(text.chars(), ['e', 'x']);
        // 'x' is the third original char
        assert_eq!(text.original_span(1, 2), Some((2, 3)));
        assert_eq!(text.original_span(0, 2), Some((0, 3)));
    }

    #[test]
    fn test_empty_span() {
        let text = FoldedText::new("abc");
        assert_eq!(text.original_span(1, 1), None);
        assert_eq!(text.original_span(0, 9), None);
    }

    #[test]
    fn test_hangul_keeps_every_jamo() {
        assert_ne!(fold("한국"), fold("학교"));
        assert_eq!(fold("한").chars().count(), 3);
        assert!(!folded_eq("한국", "학교"));
        assert!(folded_eq("한국", "한국"));
    }

    #[test]
    fn test_hangul_origin_map() {
        let text = FoldedText::new("한국 차");
        assert_eq!(text.len(), 9);
        // the first syllable's three jamo all point back to index 0
        assert_eq!(text.original_span(0, 3), Some((0, 1)));
        assert_eq!(text.original_span(0, 6), Some((0, 2)));
        assert_eq!(text.original_span(7, 9), Some((3, 4)));
    }

    #[test]
    fn test_greek_and_cyrillic() {
        assert_eq!(fold("ΆΘΗΝΑ"), "αθηνα");
        assert_eq!(fold("МОСКВА"), "москва");
        assert!(folded_eq("Ελαστικό", "ελαστικο"));
    }
}
