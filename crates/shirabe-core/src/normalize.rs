//! # Filename Normalizer
//!
//! Strips uploader noise from raw media filenames before they are handed to
//! the structural guesser.

use regex::Regex;

use crate::error::Result;

/// Literal junk substrings removed case-insensitively.
pub const JUNK_LITERALS: &[&str] = &["DA Rips"];

/// Removes handles, promo links, bracket tags and separators from a filename.
///
/// Passes run in a fixed order: `@handle` tokens, junk literals,
/// `t.me/handle` promos, `[...]` segments, `.`/`_` runs, then trimming.
/// The pipeline is re-applied until the output stops changing, so
/// normalizing twice is the same as normalizing once.
#[derive(Debug, Clone)]
pub struct FilenameNormalizer {
    re_handle: Regex,
    re_junk: Regex,
    re_promo: Regex,
    re_brackets: Regex,
    re_separators: Regex,
}

impl FilenameNormalizer {
    /// Constructs a normalizer with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `ShirabeError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let junk = JUNK_LITERALS
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            re_handle: Regex::new(r"@[a-zA-Z0-9_]+")?,
            re_junk: Regex::new(&format!("(?i)(?:{junk})"))?,
            re_promo: Regex::new(r"(?i)t\.me/[a-zA-Z0-9_]+")?,
            re_brackets: Regex::new(r"\[.*?\]")?,
            re_separators: Regex::new(r"[._]+")?,
        })
    }

    /// Cleans a raw filename. Never fails; the result may be empty.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        // A pass that changes its input either shortens it or replaces a
        // `.`/`_` with a space, so this always reaches a fixed point.
        let mut current = self.single_pass(raw);
        loop {
            let next = self.single_pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn single_pass(&self, input: &str) -> String {
        let f = self.re_handle.replace_all(input, "");
        let f = self.re_junk.replace_all(&f, "");
        let f = self.re_promo.replace_all(&f, "");
        let f = self.re_brackets.replace_all(&f, "");
        let f = self.re_separators.replace_all(&f, " ");
        f.trim().to_string()
    }
}
