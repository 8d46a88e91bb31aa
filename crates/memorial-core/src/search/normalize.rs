//! Accent and case folding for search comparisons

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Fold text to its comparison form
///
/// Decomposes to NFD, drops combining marks, lower-cases and collapses
/// whitespace runs to one space, so "José  Silva" and "jose silva" compare
/// equal.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
