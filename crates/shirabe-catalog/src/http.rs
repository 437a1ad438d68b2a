use reqwest::{Client, Response};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};

const USER_AGENT: &str = concat!("shirabe/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by all catalogs.
pub fn build_client(config: &CatalogConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(config.timeout())
        .user_agent(USER_AGENT)
        .build()?)
}

/// Maps a non-success status to [`CatalogError::Api`].
pub(crate) async fn check_response(resp: Response) -> Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    Err(CatalogError::Api { status, message })
}

pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T> {
    resp.json()
        .await
        .map_err(|e| CatalogError::Parse(e.to_string()))
}

pub(crate) fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
pub(crate) mod testing {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Raw HTTP/1.1 response with a JSON content type.
    pub(crate) fn reply(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Answers one request on a local port with `response`.
    ///
    /// Returns the base URL and a handle yielding the request head.
    pub(crate) async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&head).into_owned()
        });
        (format!("http://{addr}/"), handle)
    }
}
