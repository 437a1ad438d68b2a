pub mod content;
pub mod quality;
pub mod record;

pub use content::{ContentType, MediaKind};
pub use quality::{Dimensions, ResolutionTier};
pub use record::{
    DisplayRecord, LanguageSet, MISC_GENRES, MetadataRecord, NOT_AVAILABLE, UNKNOWN_LANGUAGE,
};
