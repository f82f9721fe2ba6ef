//! Diacritic-insensitive text folding and collation.
//!
//! Names in the calendar are Spanish ("Declaración", "Nómina"); searching for
//! `declaracion` must match. Folding decomposes to NFD, drops combining marks
//! and lowercases.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold text for matching: strip diacritics and lowercase.
#[must_use]
pub fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `haystack` contains an already-folded `needle`.
#[must_use]
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || fold(haystack).contains(folded_needle)
}

/// Locale-style comparison: folded text first, raw text as tie-break.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}
