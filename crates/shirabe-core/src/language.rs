//! # Language Detection
//!
//! Fuses the structural guess's language codes with lexical markers found in
//! the raw filename.

use crate::types::LanguageSet;

/// ISO 639-1 (and a few legacy) codes to display names.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("hi", "Hindi"),
    ("en", "English"),
    ("ja", "Japanese"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("ml", "Malayalam"),
    ("kn", "Kannada"),
    ("mr", "Marathi"),
    ("gu", "Gujarati"),
    ("ko", "Korean"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("th", "Thai"),
    ("in", "Indonesian"),
    ("vi", "Vietnamese"),
];

/// Substrings of the lowercased filename and the label each one implies.
const LEXICAL_MARKERS: &[(&str, &str)] = &[
    ("dual", "Dual Audio"),
    ("multi", "Multi Audio"),
    ("hin", "Hindi"),
    ("tam", "Tamil"),
    ("tel", "Telugu"),
    ("kor", "Korean"),
];

/// Display name for a language code, capitalizing unknown codes.
#[must_use]
pub fn language_name(code: &str) -> String {
    let lower = code.trim().to_lowercase();
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == lower)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| capitalize(&lower))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Detects the spoken languages of a file.
///
/// Hint codes come first, in their given order. Lexical markers follow in the
/// order they appear in the filename, and a marker only adds its label when
/// the label is not already present.
#[must_use]
pub fn detect_languages<S: AsRef<str>>(filename: &str, hints: &[S]) -> LanguageSet {
    let mut set: LanguageSet = hints.iter().map(|h| language_name(h.as_ref())).collect();

    let lower = filename.to_lowercase();
    let mut found: Vec<(usize, &str)> = LEXICAL_MARKERS
        .iter()
        .filter_map(|(marker, label)| lower.find(marker).map(|pos| (pos, *label)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);

    for (_, label) in found {
        set.insert(label);
    }
    set
}
