//! # Shirabe Core
//!
//! Network-free half of the Shirabe metadata resolution engine: filename
//! normalization, structural guessing, language detection, content-type
//! classification, resolution tiers and display-record assembly.
//!
//! ## Quick Start
//!
//! ```rust
//! use shirabe_core::{FilenameNormalizer, HeuristicGuesser, detect_languages};
//!
//! let normalizer = FilenameNormalizer::new().unwrap();
//! let cleaned = normalizer.normalize("@Uploader [Tag] Jawan.2023.Hindi.1080p.mkv");
//! assert_eq!(cleaned, "Jawan 2023 Hindi 1080p mkv");
//!
//! let guess = HeuristicGuesser::new().unwrap().parse(&cleaned).unwrap();
//! assert_eq!(guess.title.as_deref(), Some("Jawan"));
//! assert_eq!(guess.year, Some(2023));
//!
//! let languages = detect_languages("Jawan.2023.Hindi.1080p.mkv", &guess.languages);
//! assert_eq!(languages.to_string(), "Hindi");
//! ```
pub mod assemble;
pub mod classify;
pub mod error;
pub mod guess;
pub mod language;
pub mod normalize;
pub mod types;

// Re-export primary API
pub use assemble::{assemble, format_size, sanitize};
pub use classify::{Signals, classify, classify_by_country_name, drama_for_country_code};
pub use error::{Result, ShirabeError};
pub use guess::{HeuristicGuesser, StructuralGuess, StructuralGuesser};
pub use language::{detect_languages, language_name};
pub use normalize::FilenameNormalizer;
pub use types::{
    ContentType, Dimensions, DisplayRecord, LanguageSet, MISC_GENRES, MediaKind, MetadataRecord,
    NOT_AVAILABLE, ResolutionTier, UNKNOWN_LANGUAGE,
};
