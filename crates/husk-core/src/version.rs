//! Three-part package versions.
//!
//! A version is exactly `MAJOR.MINOR.PATCH` with decimal sections. There are
//! no pre-release or build suffixes; ordering is plain lexicographic order on
//! the three numbers.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use husk_util::errors::HuskError;
use regex::Regex;
use serde::{Deserialize, Serialize};

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)$").expect("valid version regex"));

/// A package version. Field order gives the derived lexicographic ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse the canonical `M.N.P` form.
    pub fn parse(text: &str) -> Result<Self, HuskError> {
        let caps = VERSION_RE
            .captures(text)
            .ok_or_else(|| HuskError::format(format!("Bad format for version {text:?}")))?;
        let section = |i: usize| -> Result<u32, HuskError> {
            caps[i].parse().map_err(|e| {
                HuskError::format(format!("Bad format for version {text:?}: {e}"))
            })
        };
        Ok(Self::new(section(1)?, section(2)?, section(3)?))
    }

    /// `0.0.0`, the value of a freshly generated spec.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = HuskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = HuskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}
