use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bytes read from the start of a file: 1 MiB.
pub const DEFAULT_SAMPLE_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BOT_API_URL: &str = "https://api.telegram.org";

/// Configuration for the resolution probe.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub sample_bytes: u64,
    pub timeout_secs: u64,
    pub bot_api_url: String,
    /// Bot token for resolving opaque file ids. Without it only URL handles resolve.
    pub bot_token: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            sample_bytes: DEFAULT_SAMPLE_BYTES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            bot_api_url: DEFAULT_BOT_API_URL.to_string(),
            bot_token: None,
        }
    }
}

impl fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("sample_bytes", &self.sample_bytes)
            .field("timeout_secs", &self.timeout_secs)
            .field("bot_api_url", &self.bot_api_url)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bot_token(mut self, token: impl Into<String>) -> Self {
        self.bot_token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    pub fn with_sample_bytes(mut self, bytes: u64) -> Self {
        self.sample_bytes = bytes.max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
