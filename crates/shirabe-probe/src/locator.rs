//! Turns an opaque file handle into a URL that serves the file's bytes.

use std::fmt;
use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProbeError, Result};

/// Reference to a remotely stored file: either a URL or a host-specific id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileHandle(String);

impl FileHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_url(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait FileLocator: Send + Sync {
    /// Resolves `handle` to a download URL.
    fn locate(&self, handle: &FileHandle) -> impl Future<Output = Result<String>> + Send;
}

fn not_a_url(handle: &FileHandle) -> ProbeError {
    ProbeError::Locate {
        handle: handle.to_string(),
        reason: "not an http(s) URL".into(),
    }
}

/// Accepts handles that already are URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectLocator;

impl FileLocator for DirectLocator {
    async fn locate(&self, handle: &FileHandle) -> Result<String> {
        if handle.is_url() {
            Ok(handle.as_str().to_string())
        } else {
            Err(not_a_url(handle))
        }
    }
}

#[derive(Debug, Deserialize)]
struct BotResponse {
    ok: bool,
    result: Option<BotFile>,
    description: Option<String>,
    error_code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct BotFile {
    file_path: Option<String>,
}

/// Resolves file ids through a bot API `getFile` call.
pub struct BotApiLocator {
    http: Client,
    api_url: String,
    token: String,
}

impl BotApiLocator {
    pub fn new(http: Client, api_url: &str, token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn download_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.api_url, self.token, file_path)
    }
}

impl FileLocator for BotApiLocator {
    async fn locate(&self, handle: &FileHandle) -> Result<String> {
        if handle.is_url() {
            return Ok(handle.as_str().to_string());
        }

        debug!(%handle, "bot api getFile");
        let resp = self
            .http
            .get(format!("{}/bot{}/getFile", self.api_url, self.token))
            .query(&[("file_id", handle.as_str())])
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body: BotResponse = resp
            .json()
            .await
            .map_err(|e| ProbeError::Parse(e.to_string()))?;

        if !body.ok {
            return Err(ProbeError::Api {
                status: body.error_code.unwrap_or(status),
                message: body.description.unwrap_or_default(),
            });
        }
        match body.result.and_then(|f| f.file_path) {
            Some(path) => Ok(self.download_url(&path)),
            None => Err(ProbeError::Locate {
                handle: handle.to_string(),
                reason: "no file path in getFile result".into(),
            }),
        }
    }
}

/// Locator picked at runtime from configuration.
pub enum AnyLocator {
    Direct(DirectLocator),
    BotApi(BotApiLocator),
}

impl FileLocator for AnyLocator {
    async fn locate(&self, handle: &FileHandle) -> Result<String> {
        match self {
            Self::Direct(l) => l.locate(handle).await,
            Self::BotApi(l) => l.locate(handle).await,
        }
    }
}
