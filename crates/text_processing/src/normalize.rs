//! Diacritic folding for robust keyword matching

use unicode_normalization::UnicodeNormalization;

/// Fold `text` to plain ASCII.
///
/// Applies NFKD decomposition and drops every non-ASCII code point, so
/// accented letters lose their combining marks (`"Información"` becomes
/// `"Informacion"`) and symbols without an ASCII decomposition disappear.
/// Case is preserved; callers lower-case separately.
pub fn normalize(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

/// Lower-case then fold, the form every matcher in this crate works on.
pub fn normalize_lower(text: &str) -> String {
    normalize(&text.to_lowercase())
}
