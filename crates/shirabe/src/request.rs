use serde::{Deserialize, Serialize};
use shirabe_catalog::CascadeReport;
use shirabe_core::{DisplayRecord, StructuralGuess};
use shirabe_probe::FileHandle;

/// One resolution request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveRequest {
    /// Raw filename as uploaded.
    pub filename: String,
    pub file_size: u64,
    /// Where the bytes live; without it the quality comes from the filename.
    pub file_handle: Option<FileHandle>,
    /// Re-resolve with the first word of the title only.
    pub deep_match: bool,
    /// Title to search instead of the guessed one, e.g. the title a previous
    /// resolution displayed.
    pub title: Option<String>,
}

impl ResolveRequest {
    pub fn new(filename: impl Into<String>, file_size: u64) -> Self {
        Self {
            filename: filename.into(),
            file_size,
            ..Self::default()
        }
    }

    pub fn with_handle(mut self, handle: FileHandle) -> Self {
        self.file_handle = Some(handle);
        self
    }

    pub fn with_deep_match(mut self, deep_match: bool) -> Self {
        self.deep_match = deep_match;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The display record plus everything that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub display: DisplayRecord,
    pub guess: StructuralGuess,
    /// `None` when catalogs were not consulted (offline).
    pub report: Option<CascadeReport>,
    /// Quality came from the container header rather than the filename.
    pub probed: bool,
}
