use std::time::Duration;

use husk_util::errors::HuskError;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;

/// Content type of package archives on the wire.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// `husk/<version>`
pub fn user_agent() -> String {
    format!("husk/{}", env!("CARGO_PKG_VERSION"))
}

/// Blocking client shared by fetcher and publisher.
pub fn build_client() -> Result<Client, HuskError> {
    Client::builder()
        .user_agent(user_agent())
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| HuskError::Network {
            message: format!("Failed to build HTTP client: {e}"),
        })
}

#[derive(Debug, Deserialize)]
struct ServerMessage {
    #[serde(rename = "Message")]
    message: String,
}

/// The `Message` field of a JSON response body, if there is one.
pub fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ServerMessage>(body)
        .ok()
        .map(|m| m.message)
}

/// Read the whole body, turning non-success statuses into errors.
///
/// 404 becomes [`HuskError::NotFound`]; any other non-2xx status becomes
/// [`HuskError::Status`] carrying the server's message, or the raw body when
/// it sent none.
pub fn read_body(response: Response) -> Result<Vec<u8>, HuskError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.bytes().map_err(|e| HuskError::Network {
        message: format!("Failed to read response from {url}: {e}"),
    })?;

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(HuskError::NotFound { url });
    }
    if !status.is_success() {
        let message = server_message(&body)
            .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());
        return Err(HuskError::Status {
            code: status.as_u16(),
            url,
            message,
        });
    }
    tracing::debug!("{status} from {url} ({} bytes)", body.len());
    Ok(body.to_vec())
}
