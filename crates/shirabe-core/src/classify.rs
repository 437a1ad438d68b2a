//! # Content Classification
//!
//! Content type is derived from catalog signals through ordered rule tables.
//! The first matching rule wins.

use crate::types::{ContentType, MediaKind};

/// Original-language codes that mark an Indian production.
pub const INDIAN_LANGUAGES: &[&str] = &["hi", "ta", "te", "ml"];

/// Signals a multi-type catalog candidate exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals<'a> {
    pub kind: MediaKind,
    /// ISO 3166-1 alpha-2 origin country, empty if unknown.
    pub country: &'a str,
    /// ISO 639-1 original language, empty if unknown.
    pub language: &'a str,
    /// The candidate carries the animation genre.
    pub animation: bool,
}

impl Signals<'_> {
    fn japanese(&self) -> bool {
        self.country == "JP" || self.language == "ja"
    }

    fn korean(&self) -> bool {
        self.country == "KR" || self.language == "ko"
    }

    fn chinese(&self) -> bool {
        self.country == "CN" || self.language == "zh"
    }

    fn indian(&self) -> bool {
        self.country == "IN" || INDIAN_LANGUAGES.contains(&self.language)
    }

    fn series(&self) -> bool {
        self.kind == MediaKind::Series
    }

    fn movie(&self) -> bool {
        self.kind == MediaKind::Movie
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Signals<'_>) -> bool,
    pub yields: ContentType,
}

/// Classification precedence, evaluated top-down.
pub const RULES: &[Rule] = &[
    Rule {
        name: "animated-japanese",
        matches: |s| s.animation && s.japanese(),
        yields: ContentType::Anime,
    },
    Rule {
        name: "korean-series",
        matches: |s| s.series() && s.korean(),
        yields: ContentType::KDrama,
    },
    Rule {
        name: "chinese-series",
        matches: |s| s.series() && s.chinese(),
        yields: ContentType::CDrama,
    },
    Rule {
        name: "japanese-series",
        matches: |s| s.series() && s.japanese(),
        yields: ContentType::JDrama,
    },
    Rule {
        name: "indian-movie",
        matches: |s| s.movie() && s.indian(),
        yields: ContentType::Indian,
    },
    Rule {
        name: "korean-movie",
        matches: |s| s.movie() && s.korean(),
        yields: ContentType::KMovie,
    },
    Rule {
        name: "japanese-movie",
        matches: |s| s.movie() && s.japanese(),
        yields: ContentType::JMovie,
    },
];

/// Classifies a candidate; falls back to the generic label for its kind.
#[must_use]
pub fn classify(signals: &Signals<'_>) -> ContentType {
    matching_rule(signals)
        .map(|rule| rule.yields)
        .unwrap_or_else(|| signals.kind.generic())
}

/// The first rule matching the signals, if any.
#[must_use]
pub fn matching_rule(signals: &Signals<'_>) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.matches)(signals))
}

/// Regional drama label from a network/channel country code.
#[must_use]
pub fn drama_for_country_code(code: &str) -> Option<ContentType> {
    match code {
        "KR" => Some(ContentType::KDrama),
        "CN" => Some(ContentType::CDrama),
        "JP" => Some(ContentType::JDrama),
        _ => None,
    }
}

/// Classification from a free-text country list such as `"South Korea, USA"`.
///
/// Series always classify (plain `series` when no region matches). Movies only
/// classify on a regional match.
#[must_use]
pub fn classify_by_country_name(kind: MediaKind, countries: &str) -> Option<ContentType> {
    let table: &[(&str, ContentType)] = match kind {
        MediaKind::Series => &[
            ("South Korea", ContentType::KDrama),
            ("China", ContentType::CDrama),
            ("Japan", ContentType::JDrama),
        ],
        MediaKind::Movie => &[
            ("India", ContentType::Indian),
            ("South Korea", ContentType::KMovie),
            ("Japan", ContentType::JMovie),
        ],
    };

    let regional = table
        .iter()
        .find(|(name, _)| countries.contains(name))
        .map(|(_, ty)| *ty);

    match (regional, kind) {
        (Some(ty), _) => Some(ty),
        (None, MediaKind::Series) => Some(ContentType::Series),
        (None, MediaKind::Movie) => None,
    }
}
