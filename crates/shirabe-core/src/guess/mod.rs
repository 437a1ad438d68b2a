//! # Structural Guess
//!
//! Best-effort split of a cleaned filename into title, year, language codes
//! and a screen-size token. Any field may be absent.

pub mod heuristic;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use heuristic::HeuristicGuesser;

/// Structured guess for one cleaned filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralGuess {
    pub title: Option<String>,
    pub year: Option<u16>,
    /// Language codes (ISO 639-1 where known) in order of appearance.
    pub languages: Vec<String>,
    /// Screen-size token such as `"1080p"`.
    pub screen_size: Option<String>,
}

impl StructuralGuess {
    /// Returns `true` if the guess extracted at least a title.
    #[must_use]
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }
}

/// Free-text filename parser consumed by the resolver.
pub trait StructuralGuesser: Send + Sync {
    /// Parses a cleaned filename.
    ///
    /// # Errors
    ///
    /// Implementations fail on input they cannot interpret at all, such as an
    /// empty string.
    fn guess(&self, cleaned: &str) -> Result<StructuralGuess>;
}

impl<G: StructuralGuesser + ?Sized> StructuralGuesser for std::sync::Arc<G> {
    fn guess(&self, cleaned: &str) -> Result<StructuralGuess> {
        (**self).guess(cleaned)
    }
}
