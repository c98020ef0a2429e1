//! Constraint expressions: a version range per section, or a VCS revision.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use husk_core::version::Version;
use husk_util::errors::HuskError;
use regex::Regex;

/// Lower sentinel of an open section. Below every real section value.
pub const MIN_SECTION: i64 = -1;
/// Upper sentinel of an open section.
pub const MAX_SECTION: i64 = i64::MAX;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:>=)?\d+|\*)\.((?:>=)?\d+|\*)\.((?:>=)?\d+|\*)$").expect("valid regex")
});

/// Inclusive range of one version section.
///
/// Only non-empty bounds exist: they come from parsing one section or from
/// a successful [`Bound::intersect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bound {
    min: i64,
    max: i64,
}

impl Bound {
    /// `*`
    pub const ANY: Bound = Bound {
        min: MIN_SECTION,
        max: MAX_SECTION,
    };

    /// `n`
    pub fn exact(n: u32) -> Self {
        Self {
            min: i64::from(n),
            max: i64::from(n),
        }
    }

    /// `>=n`
    pub fn at_least(n: u32) -> Self {
        Self {
            min: i64::from(n),
            max: MAX_SECTION,
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, n: u32) -> bool {
        (self.min..=self.max).contains(&i64::from(n))
    }

    /// Common part of both bounds, `None` when they do not overlap.
    pub fn intersect(&self, other: &Bound) -> Option<Bound> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(Bound { min, max })
    }

    fn parse(section: &str) -> Result<Self, String> {
        if section == "*" {
            return Ok(Self::ANY);
        }
        let (open, digits) = match section.strip_prefix(">=") {
            Some(rest) => (true, rest),
            None => (false, section),
        };
        let n: u32 = digits
            .parse()
            .map_err(|e| format!("section {section:?}: {e}"))?;
        Ok(if open { Self::at_least(n) } else { Self::exact(n) })
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (MIN_SECTION, MAX_SECTION) => f.write_str("*"),
            (min, max) if min == max => write!(f, "{min}"),
            (min, MAX_SECTION) => write!(f, ">={min}"),
            (min, max) => unreachable!("bound {min}..={max} has no textual form"),
        }
    }
}

/// Version control systems a constraint can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Vcs {
    Bzr,
    Git,
    Hg,
}

impl Vcs {
    pub const ALL: [Vcs; 3] = [Vcs::Bzr, Vcs::Git, Vcs::Hg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vcs::Bzr => "bzr",
            Vcs::Git => "git",
            Vcs::Hg => "hg",
        }
    }

    /// Name of the metadata directory marking a repository root.
    pub fn marker_dir(&self) -> &'static str {
        match self {
            Vcs::Bzr => ".bzr",
            Vcs::Git => ".git",
            Vcs::Hg => ".hg",
        }
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vcs {
    type Err = HuskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Vcs::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| HuskError::format(format!("Unknown version control system {s:?}")))
    }
}

/// A parsed dependency requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint {
    Range {
        major: Bound,
        minor: Bound,
        patch: Bound,
    },
    Pinned {
        vcs: Vcs,
        revision: String,
    },
}

impl Constraint {
    /// `*.*.*`
    pub fn any() -> Self {
        Constraint::Range {
            major: Bound::ANY,
            minor: Bound::ANY,
            patch: Bound::ANY,
        }
    }

    /// Exactly `version`.
    pub fn exact(version: Version) -> Self {
        Constraint::Range {
            major: Bound::exact(version.major),
            minor: Bound::exact(version.minor),
            patch: Bound::exact(version.patch),
        }
    }

    pub fn pinned(vcs: Vcs, revision: impl Into<String>) -> Self {
        Constraint::Pinned {
            vcs,
            revision: revision.into(),
        }
    }

    /// Parse `<vcs>:<revision>` or a three-section range such as `1.>=2.*`.
    pub fn parse(text: &str) -> Result<Self, HuskError> {
        if let Some((system, revision)) = text.split_once(':') {
            let vcs: Vcs = system.parse()?;
            if revision.is_empty() {
                return Err(HuskError::format(format!(
                    "Bad format for pinned dependency {text:?}: empty revision"
                )));
            }
            return Ok(Constraint::pinned(vcs, revision));
        }

        let caps = RANGE_RE
            .captures(text)
            .ok_or_else(|| HuskError::format(format!("Bad format for dependency {text:?}")))?;
        let section = |i: usize| {
            Bound::parse(&caps[i])
                .map_err(|e| HuskError::format(format!("Bad format for dependency {text:?}: {e}")))
        };
        Ok(Constraint::Range {
            major: section(1)?,
            minor: section(2)?,
            patch: section(3)?,
        })
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, Constraint::Pinned { .. })
    }

    /// Versions allowed by both constraints.
    ///
    /// Pinned constraints only agree with an identical pin. `None` means the
    /// constraints conflict.
    pub fn intersect(&self, other: &Constraint) -> Option<Constraint> {
        match (self, other) {
            (
                Constraint::Range {
                    major,
                    minor,
                    patch,
                },
                Constraint::Range {
                    major: o_major,
                    minor: o_minor,
                    patch: o_patch,
                },
            ) => Some(Constraint::Range {
                major: major.intersect(o_major)?,
                minor: minor.intersect(o_minor)?,
                patch: patch.intersect(o_patch)?,
            }),
            (a, b) => (a == b).then(|| a.clone()),
        }
    }

    /// Whether `version` lies inside every section; `None` for pins.
    pub fn allows(&self, version: &Version) -> Option<bool> {
        match self {
            Constraint::Range {
                major,
                minor,
                patch,
            } => Some(
                major.contains(version.major)
                    && minor.contains(version.minor)
                    && patch.contains(version.patch),
            ),
            Constraint::Pinned { .. } => None,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Range {
                major,
                minor,
                patch,
            } => write!(f, "{major}.{minor}.{patch}"),
            Constraint::Pinned { vcs, revision } => write!(f, "{vcs}:{revision}"),
        }
    }
}

impl FromStr for Constraint {
    type Err = HuskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A constraint together with the import path it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub import_path: String,
    pub constraint: Constraint,
}

impl Dependency {
    pub fn new(import_path: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            import_path: import_path.into(),
            constraint,
        }
    }

    pub fn parse(import_path: &str, text: &str) -> Result<Self, HuskError> {
        if import_path.is_empty() {
            return Err(HuskError::format(format!(
                "Empty import path for dependency {text:?}"
            )));
        }
        Ok(Self::new(import_path, Constraint::parse(text)?))
    }

    /// Whether the package at `import_path` with `version` satisfies this
    /// dependency.
    ///
    /// Pinned dependencies resolve to their revision and are never matched
    /// against versions; asking is an error.
    pub fn matches(&self, import_path: &str, version: &Version) -> Result<bool, HuskError> {
        match self.constraint.allows(version) {
            Some(allowed) => Ok(allowed && self.import_path == import_path),
            None => Err(HuskError::NotARange {
                dependency: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.import_path, self.constraint)
    }
}
