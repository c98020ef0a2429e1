use std::fmt;

use husk_core::config::ImportPrefixes;
use husk_util::errors::HuskError;
use url::Url;

/// Where to fetch a package from, and the prefix it installs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub url: Url,
    pub prefix: String,
}

impl Reference {
    /// Resolve a command-line reference or an import path.
    ///
    /// Accepted forms:
    /// - `http://host/vendor/name[/version]`, used as is
    /// - `<known prefix>/vendor/name[/version]`
    /// - `vendor/name[/version]`, under the default prefix
    pub fn parse(arg: &str, prefixes: &ImportPrefixes) -> Result<Self, HuskError> {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            let url = parse_url(arg)?;
            let host = url
                .host_str()
                .ok_or_else(|| HuskError::format(format!("No host in reference {arg:?}")))?;
            let prefix = host.strip_prefix("www.").unwrap_or(host).to_string();
            return Ok(Self { url, prefix });
        }

        let segments: Vec<&str> = arg.split('/').collect();
        if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
            return Err(HuskError::format(format!(
                "Invalid reference {arg:?}: expected vendor/name, an import path or a URL"
            )));
        }

        let (prefix, host, rest) = match prefixes.prefix_of(arg) {
            Some(prefix) => (
                prefix,
                prefixes.host(prefix).unwrap_or(prefixes.default_host()),
                &arg[prefix.len() + 1..],
            ),
            None => (prefixes.default_prefix(), prefixes.default_host(), arg),
        };

        Ok(Self {
            url: parse_url(&format!("http://{host}/{rest}"))?,
            prefix: prefix.to_string(),
        })
    }

    /// Visited-set key: equivalent spellings share it.
    pub fn key(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.url.fmt(f)
    }
}

fn parse_url(text: &str) -> Result<Url, HuskError> {
    Url::parse(text).map_err(|e| HuskError::format(format!("Invalid URL {text:?}: {e}")))
}
