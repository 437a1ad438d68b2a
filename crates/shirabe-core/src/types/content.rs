use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad media kind reported by a catalog before regional refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Feature film, short, TV movie.
    Movie,
    /// Episodic show.
    Series,
}

impl MediaKind {
    /// The generic content type for this kind.
    #[must_use]
    pub fn generic(self) -> ContentType {
        match self {
            Self::Movie => ContentType::Movie,
            Self::Series => ContentType::Series,
        }
    }
}

/// Closed classification label assigned to a resolved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Movie,
    Series,
    Anime,
    #[serde(rename = "kdrama")]
    KDrama,
    #[serde(rename = "cdrama")]
    CDrama,
    #[serde(rename = "jdrama")]
    JDrama,
    Indian,
    #[serde(rename = "kmovie")]
    KMovie,
    #[serde(rename = "jmovie")]
    JMovie,
}

impl ContentType {
    /// Every content type, generic ones first.
    pub const ALL: [ContentType; 9] = [
        Self::Movie,
        Self::Series,
        Self::Anime,
        Self::KDrama,
        Self::CDrama,
        Self::JDrama,
        Self::Indian,
        Self::KMovie,
        Self::JMovie,
    ];

    /// `true` for the plain `movie`/`series` labels.
    #[must_use]
    pub fn is_generic(self) -> bool {
        matches!(self, Self::Movie | Self::Series)
    }

    /// `true` for labels that describe an episodic show.
    #[must_use]
    pub fn is_series_like(self) -> bool {
        matches!(
            self,
            Self::Series | Self::KDrama | Self::CDrama | Self::JDrama
        )
    }

    /// Machine identifier, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Anime => "anime",
            Self::KDrama => "kdrama",
            Self::CDrama => "cdrama",
            Self::JDrama => "jdrama",
            Self::Indian => "indian",
            Self::KMovie => "kmovie",
            Self::JMovie => "jmovie",
        }
    }

    /// Human-readable label for front-ends.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "Series",
            Self::Anime => "Anime",
            Self::KDrama => "K-Drama",
            Self::CDrama => "C-Drama",
            Self::JDrama => "J-Drama",
            Self::Indian => "Indian Cinema",
            Self::KMovie => "Korean Movie",
            Self::JMovie => "Japanese Movie",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
