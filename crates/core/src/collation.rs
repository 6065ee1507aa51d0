//! Locale-aware title ordering.
//!
//! Approximates a default Unicode collation: letters compare without regard to
//! accents or case first, then accents break ties, then case (lowercase
//! before uppercase), then raw code points.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Precomputed sort key for a title.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    base: String,
    accents: String,
    case: Vec<bool>,
    raw: String,
}

impl CollationKey {
    #[must_use]
    pub fn new(s: &str) -> Self {
        let base =
            s.nfkd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect();
        let accents = s.nfc().flat_map(char::to_lowercase).collect();
        let case = s.chars().map(char::is_uppercase).collect();
        Self { base, accents, case, raw: s.to_owned() }
    }
}

/// Compare two titles the way a locale-aware string compare would.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
