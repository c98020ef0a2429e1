//! Operation: upload archives to a package server.

use std::path::Path;

use husk_archive::archive::Archive;
use husk_core::source::SourceScanner;
use husk_registry::publish::{publish_url, Publisher};
use husk_util::errors::HuskError;

/// Publish each archive to `server` and return the server's messages.
pub fn publish(
    files: &[&Path],
    server: &str,
    token: &str,
    publisher: &impl Publisher,
) -> miette::Result<Vec<String>> {
    if token.is_empty() {
        return Err(HuskError::Generic {
            message: "No token given: pass --token or set `token` in ~/.husk/config.toml"
                .to_string(),
        }
        .into());
    }

    let mut messages = Vec::with_capacity(files.len());
    for file in files {
        let bytes = std::fs::read(file).map_err(HuskError::Io)?;
        let package = Archive::read(&bytes)?.inspect(&SourceScanner)?;
        let url = publish_url(server, package.name(), &package.version().to_string(), token)?;

        husk_util::progress::status(
            "Publishing",
            &format!("{} v{} to {server}", package.name(), package.version()),
        );
        let message = publisher.put(&url, bytes)?;
        tracing::info!("{message}");
        messages.push(message);
    }
    Ok(messages)
}
