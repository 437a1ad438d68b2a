use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel dimensions recovered from a container sample. Either side may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Both sides, if both are known and non-zero.
    #[must_use]
    pub fn complete(self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }
}

/// Display-quality bucket for a video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum ResolutionTier {
    /// 2160p (Ultra HD / 4K)
    Uhd4k,
    /// 1440p (Quad HD)
    Qhd2k,
    /// 1080p (Full HD)
    FullHd,
    /// 720p (HD)
    Hd,
    /// 480p (SD)
    Sd,
    /// Anything smaller than SD, shown as `WxHp`.
    Raw { width: u32, height: u32 },
    /// A screen-size token taken verbatim from the filename guess.
    Hint { token: String },
}

/// Thresholds evaluated top-down; either dimension reaching its bound selects the tier.
const TIER_THRESHOLDS: [(u32, u32, ResolutionTier); 5] = [
    (3800, 2160, ResolutionTier::Uhd4k),
    (2500, 1400, ResolutionTier::Qhd2k),
    (1900, 1000, ResolutionTier::FullHd),
    (1200, 700, ResolutionTier::Hd),
    (800, 480, ResolutionTier::Sd),
];

impl ResolutionTier {
    /// Maps probed dimensions to a tier. Returns `None` if either side is missing.
    #[must_use]
    pub fn from_dimensions(dims: Dimensions) -> Option<Self> {
        let (width, height) = dims.complete()?;
        let tier = TIER_THRESHOLDS
            .iter()
            .find(|(min_w, min_h, _)| width >= *min_w || height >= *min_h)
            .map(|(_, _, tier)| tier.clone())
            .unwrap_or(Self::Raw { width, height });
        Some(tier)
    }

    /// Fallback used when the probe cannot determine dimensions.
    ///
    /// `1080p` and `720p` map to their tiers, other tokens pass through verbatim,
    /// and an absent hint assumes Full HD.
    #[must_use]
    pub fn from_screen_size_hint(hint: Option<&str>) -> Self {
        match hint.map(str::trim) {
            None | Some("") => Self::FullHd,
            Some("1080p") => Self::FullHd,
            Some("720p") => Self::Hd,
            Some(other) => Self::Hint {
                token: other.to_string(),
            },
        }
    }
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uhd4k => write!(f, "4K (2160p)"),
            Self::Qhd2k => write!(f, "2K (1440p)"),
            Self::FullHd => write!(f, "FHD (1080p)"),
            Self::Hd => write!(f, "HD (720p)"),
            Self::Sd => write!(f, "SD (480p)"),
            Self::Raw { width, height } => write!(f, "{width}x{height}p"),
            Self::Hint { token } => write!(f, "{token}"),
        }
    }
}
