use std::path::{Path, PathBuf};

use husk_core::config::GlobalConfig;
use husk_registry::publish::HttpPublisher;
use miette::Result;

pub fn exec(
    config: &GlobalConfig,
    server: Option<String>,
    token: Option<String>,
    files: &[PathBuf],
) -> Result<()> {
    let server = server.unwrap_or_else(|| config.publish_server(&config.import_prefixes()));
    let token = token.or_else(|| config.token.clone()).unwrap_or_default();
    let files: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();

    let publisher = HttpPublisher::new()?;
    for message in husk_ops::ops_publish::publish(&files, &server, &token, &publisher)? {
        println!("{message}");
    }
    Ok(())
}
