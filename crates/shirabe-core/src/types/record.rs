use std::fmt;

use serde::{Deserialize, Serialize};

use super::content::ContentType;
use super::quality::ResolutionTier;

/// Sentinel for an unresolved rating or date.
pub const NOT_AVAILABLE: &str = "N/A";
/// Sentinel for unresolved genres.
pub const MISC_GENRES: &str = "Misc";
/// Sentinel for an empty language set.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// The record accumulated across the provider cascade.
///
/// Every update consumes the record and returns a new one, so each cascade
/// step can be checked in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub title: String,
    pub rating: String,
    pub genres: String,
    pub date: String,
    pub content_type: ContentType,
}

impl MetadataRecord {
    /// A record holding only the query title and default sentinels.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rating: NOT_AVAILABLE.to_string(),
            genres: MISC_GENRES.to_string(),
            date: NOT_AVAILABLE.to_string(),
            content_type: ContentType::default(),
        }
    }

    #[must_use]
    pub fn has_rating(&self) -> bool {
        self.rating != NOT_AVAILABLE
    }

    #[must_use]
    pub fn has_genres(&self) -> bool {
        self.genres != MISC_GENRES
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = rating.into();
        self
    }

    #[must_use]
    pub fn with_genres(mut self, genres: impl Into<String>) -> Self {
        self.genres = genres.into();
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Applies a classification signal without ever losing specificity.
    ///
    /// A generic label (`movie`/`series`) accepts any candidate. A specific label
    /// is kept: the first specific classification wins.
    #[must_use]
    pub fn refine_content_type(mut self, candidate: ContentType) -> Self {
        if self.content_type.is_generic() {
            self.content_type = candidate;
        }
        self
    }

    /// Unconditionally sets the content type. Reserved for authoritative sources.
    #[must_use]
    pub fn force_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }
}

/// Ordered, de-duplicated list of human-readable language labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageSet(Vec<String>);

impl LanguageSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a label unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if label.is_empty() || self.contains(&label) {
            return false;
        }
        self.0.push(label);
        true
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str(UNKNOWN_LANGUAGE)
        } else {
            f.write_str(&self.0.join(" & "))
        }
    }
}

/// The final, display-ready record. Every field holds a value or a sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub title: String,
    pub content_type: ContentType,
    pub rating: String,
    pub genres: String,
    pub date: String,
    /// Rendered language set, `"Unknown"` when empty.
    pub languages: String,
    pub quality: ResolutionTier,
    pub size: String,
}

impl fmt::Display for DisplayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.content_type.label(), self.title)?;
        writeln!(f, "  Rating  : {}", self.rating)?;
        writeln!(f, "  Genres  : {}", self.genres)?;
        writeln!(f, "  Release : {}", self.date)?;
        writeln!(f, "  Audio   : {}", self.languages)?;
        writeln!(f, "  Quality : {}", self.quality)?;
        write!(f, "  Size    : {}", self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_defaults() {
        let r = MetadataRecord::new("Parasite");
        assert_eq!(r.title, "Parasite");
        assert_eq!(r.rating, "N/A");
        assert_eq!(r.genres, "Misc");
        assert_eq!(r.date, "N/A");
        assert_eq!(r.content_type, ContentType::Movie);
        assert!(!r.has_rating());
        assert!(!r.has_genres());
    }

    #[test]
    fn refine_upgrades_generic_labels() {
        let r = MetadataRecord::new("x").refine_content_type(ContentType::Series);
        assert_eq!(r.content_type, ContentType::Series);
        let r = r.refine_content_type(ContentType::KDrama);
        assert_eq!(r.content_type, ContentType::KDrama);
    }

    #[test]
    fn refine_never_loses_specificity() {
        let r = MetadataRecord::new("x").force_content_type(ContentType::KDrama);
        for candidate in ContentType::ALL {
            let refined = r.clone().refine_content_type(candidate);
            assert_eq!(refined.content_type, ContentType::KDrama);
        }
    }

    #[test]
    fn language_set_dedups_and_keeps_order() {
        let set: LanguageSet = ["Hindi", "Tamil", "Hindi", "Dual Audio"].into_iter().collect();
        assert_eq!(set.labels(), ["Hindi", "Tamil", "Dual Audio"]);
        assert_eq!(set.to_string(), "Hindi & Tamil & Dual Audio");
    }

    #[test]
    fn empty_language_set_renders_unknown() {
        assert_eq!(LanguageSet::new().to_string(), "Unknown");
    }
}
