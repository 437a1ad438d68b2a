//! # Result Assembly
//!
//! Pure merge of cascade output, detected languages, probed quality and file
//! size into the final [`DisplayRecord`].

use crate::types::{DisplayRecord, LanguageSet, MetadataRecord, NOT_AVAILABLE, ResolutionTier};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary prefixes, e.g. `1048576` → `"1.0 MB"`.
///
/// Values are rounded to two decimals and printed with at least one decimal
/// digit. Zero is rendered as `"0B"`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    let mut unit = 0usize;
    let mut scale = 1u64;
    while unit + 1 < SIZE_UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = ((bytes as f64 / scale as f64) * 100.0).round() / 100.0;
    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

/// Two-decimal rendering with trailing zeros dropped, keeping one decimal digit.
fn trim_decimals(value: f64) -> String {
    let mut s = format!("{value:.2}");
    while s.ends_with('0') && !s.ends_with(".0") {
        s.pop();
    }
    s
}

/// Replaces empty or null-like values with `"N/A"`.
#[must_use]
pub fn sanitize(value: &str) -> String {
    let trimmed = value.trim();
    let lower = trimmed.to_lowercase();
    if trimmed.is_empty() || matches!(lower.as_str(), "none" | "nan" | "null") {
        NOT_AVAILABLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Combines the pieces of one resolution request into a display record.
#[must_use]
pub fn assemble(
    record: MetadataRecord,
    languages: &LanguageSet,
    quality: ResolutionTier,
    file_size: u64,
) -> DisplayRecord {
    DisplayRecord {
        title: sanitize(&record.title),
        content_type: record.content_type,
        rating: sanitize(&record.rating),
        genres: sanitize(&record.genres),
        date: sanitize(&record.date),
        languages: languages.to_string(),
        quality,
        size: format_size(file_size),
    }
}
