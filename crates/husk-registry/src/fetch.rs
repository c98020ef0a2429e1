use husk_util::errors::HuskError;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::client::{build_client, read_body, ARCHIVE_CONTENT_TYPE};

/// Downloads package archives.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, HuskError>;
}

/// [`Fetcher`] over plain HTTP GET. No retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, HuskError> {
        Ok(Self {
            client: build_client()?,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, HuskError> {
        tracing::debug!("Getting {url}");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, ARCHIVE_CONTENT_TYPE)
            .send()
            .map_err(|e| HuskError::Network {
                message: format!("Failed to get {url}: {e}"),
            })?;
        read_body(response)
    }
}
