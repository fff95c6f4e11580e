//! Text folding for matching: accents, punctuation and case are ignored.
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Punctuation removed before matching. Only these characters go; digits
/// and signs such as `+`, `/` or `=` are kept.
const PUNCTUATION: &[char] = &['`', '!', '*', '(', ')', '-', '?', ';', ':', '\'', '"', ',', '.'];

/// Fold text for full-text matching.
///
/// Decomposes to NFD, drops combining marks, strips [`PUNCTUATION`],
/// lowercases and trims.
pub fn fold(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| return !is_combining_mark(*c) && !PUNCTUATION.contains(c))
        .collect();
    return stripped.to_lowercase().trim().to_string();
}

/// Fold a book name or typed book token for comparison: like [`fold`], but
/// all whitespace is removed so `"1 John"` and `"1john"` compare equal.
pub fn fold_compact(text: &str) -> String {
    return fold(text).chars().filter(|c| return !c.is_whitespace()).collect();
}
