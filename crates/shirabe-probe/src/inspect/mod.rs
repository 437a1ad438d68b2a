//! # Container Inspection
//!
//! Recovers the video track's pixel dimensions from the leading bytes of a
//! file. Only the header structures are parsed; no frames are decoded.

pub mod matroska;
pub mod mp4;

use shirabe_core::Dimensions;

use crate::error::{ProbeError, Result};

/// Container families recognized from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// EBML based: Matroska and WebM.
    Matroska,
    /// ISO base media: MP4, MOV, M4V.
    IsoBmff,
}

impl Container {
    #[must_use]
    pub fn sniff(sample: &[u8]) -> Option<Self> {
        if sample.starts_with(&matroska::EBML_MAGIC) {
            Some(Self::Matroska)
        } else if sample.len() >= 8 && &sample[4..8] == b"ftyp" {
            Some(Self::IsoBmff)
        } else {
            None
        }
    }
}

/// Extracts video dimensions from a file sample.
pub trait ContainerInspector: Send + Sync {
    /// # Errors
    ///
    /// Fails on samples whose container is not understood. A recognized
    /// container without a complete video header yields empty dimensions.
    fn dimensions(&self, sample: &[u8]) -> Result<Dimensions>;
}

/// Default inspector: sniffs the container and walks its header.
#[derive(Debug, Clone, Copy, Default)]
pub struct SniffInspector;

impl ContainerInspector for SniffInspector {
    fn dimensions(&self, sample: &[u8]) -> Result<Dimensions> {
        let dims = match Container::sniff(sample) {
            Some(Container::Matroska) => matroska::video_dimensions(sample),
            Some(Container::IsoBmff) => mp4::video_dimensions(sample),
            None => return Err(ProbeError::UnsupportedContainer),
        };
        Ok(dims.unwrap_or_default())
    }
}
