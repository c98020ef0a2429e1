use husk_util::errors::HuskError;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use url::Url;

use crate::client::{build_client, read_body, server_message, ARCHIVE_CONTENT_TYPE};

/// Uploads package archives.
pub trait Publisher {
    /// Upload `bytes` and return the server's message.
    fn put(&self, url: &Url, bytes: Vec<u8>) -> Result<String, HuskError>;
}

/// Upload URL for a package: `http://<server>/<name>/<version>?token=<token>`.
///
/// `server` may be a bare `host[:port]` or a full `http(s)://` URL.
pub fn publish_url(server: &str, name: &str, version: &str, token: &str) -> Result<Url, HuskError> {
    let base = if server.starts_with("http://") || server.starts_with("https://") {
        server.to_string()
    } else {
        format!("http://{server}")
    };
    let mut url = Url::parse(&base)
        .map_err(|e| HuskError::format(format!("Invalid server {server:?}: {e}")))?;
    url.set_path(&format!("/{name}/{version}"));
    url.query_pairs_mut().clear().append_pair("token", token);
    Ok(url)
}

/// [`Publisher`] over HTTP PUT.
pub struct HttpPublisher {
    client: Client,
}

impl HttpPublisher {
    pub fn new() -> Result<Self, HuskError> {
        Ok(Self {
            client: build_client()?,
        })
    }
}

impl Publisher for HttpPublisher {
    fn put(&self, url: &Url, bytes: Vec<u8>) -> Result<String, HuskError> {
        let mut shown = url.clone();
        shown.set_query(None);
        tracing::debug!("Putting {} bytes to {shown}", bytes.len());

        let response = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
            .header(CONTENT_LENGTH, bytes.len())
            .body(bytes)
            .send()
            .map_err(|e| HuskError::Network {
                message: format!("Failed to put {shown}: {e}"),
            })?;
        let body = read_body(response).map_err(|e| match e {
            HuskError::Status { code, message, .. } => HuskError::Status {
                code,
                url: shown.to_string(),
                message,
            },
            HuskError::NotFound { .. } => HuskError::NotFound {
                url: shown.to_string(),
            },
            other => other,
        })?;
        Ok(server_message(&body).unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string()))
    }
}
