//! The `husk.json` spec document: package metadata that source files cannot
//! express (version, vendor, authors, bundled extra files, homepage).

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use husk_util::errors::HuskError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::version::Version;

/// Well-known name of the spec document, inside a package directory and
/// inside an archive.
pub const SPEC_FILE_NAME: &str = "husk.json";

/// Placeholder author written by `husk generate`.
pub const EXAMPLE_FULL_NAME: &str = "Example Author";
pub const EXAMPLE_EMAIL: &str = "author@example.com";

pub const VENDOR_PATTERN: &str = "^[0-9a-z][0-9a-z_-]*$";

static VENDOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VENDOR_PATTERN).expect("valid vendor regex"));

/// Package metadata stored in `husk.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Spec {
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub authors: Vec<Person>,
    #[serde(default)]
    pub extra_files: Vec<String>,
    #[serde(default)]
    pub homepage: String,
}

/// A package author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

impl Person {
    pub fn example() -> Self {
        Self {
            full_name: EXAMPLE_FULL_NAME.to_string(),
            email: EXAMPLE_EMAIL.to_string(),
        }
    }
}

impl Spec {
    /// Parse a spec document from JSON text.
    pub fn parse(text: &str) -> Result<Self, HuskError> {
        serde_json::from_str(text)
            .map_err(|e| HuskError::format(format!("Invalid {SPEC_FILE_NAME}: {e}")))
    }

    /// Read a spec document from `r` until EOF.
    pub fn read_from(mut r: impl Read) -> Result<Self, HuskError> {
        let mut text = String::new();
        r.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Read a spec document from a file.
    pub fn read_file(path: &Path) -> Result<Self, HuskError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Persisted form: 2-space indented JSON with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, HuskError> {
        let mut text = serde_json::to_string_pretty(self)
            .map_err(|e| HuskError::format(format!("Cannot serialize spec: {e}")))?;
        text.push('\n');
        Ok(text)
    }

    /// Write the persisted form to `path`, replacing any existing file.
    pub fn write_file(&self, path: &Path) -> Result<(), HuskError> {
        std::fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }

    /// Check the spec for problems. Every rule is evaluated; an empty list
    /// means the spec is acceptable.
    pub fn check(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.version.is_zero() {
            issues.push(format!("Version {:?} is invalid.", self.version.to_string()));
        }

        if !VENDOR_RE.is_match(&self.vendor) {
            issues.push(format!(
                "Vendor should contain only lower word characters (match {VENDOR_PATTERN:?})."
            ));
        }

        if self.authors.is_empty() {
            issues.push("No authors given.".to_string());
        } else {
            for author in &self.authors {
                if author.full_name == EXAMPLE_FULL_NAME {
                    issues.push(format!("{:?} is not a real person.", author.full_name));
                }
            }
        }

        if !self.extra_files.iter().any(|f| is_license_file(f)) {
            issues.push(
                "Spec should include license file in ExtraFiles (LICENSE, LICENCE or COPYING)."
                    .to_string(),
            );
        }

        if !self.homepage.is_empty() {
            if let Some(issue) = check_homepage(&self.homepage) {
                issues.push(issue);
            }
        }

        issues
    }
}

fn is_license_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["license", "licence", "copying"]
        .iter()
        .any(|needle| lower.contains(needle))
}

fn check_homepage(homepage: &str) -> Option<String> {
    const NOT_ABSOLUTE: &str = "Homepage should be absolute http:// or https:// URL.";
    match Url::parse(homepage) {
        Ok(url) => {
            let http = matches!(url.scheme(), "http" | "https");
            (!http || url.cannot_be_a_base()).then(|| NOT_ABSOLUTE.to_string())
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => Some(NOT_ABSOLUTE.to_string()),
        Err(e) => Some(format!("Can't parse homepage: {e}")),
    }
}
