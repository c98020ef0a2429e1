use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all husk operations.
#[derive(Debug, Error, Diagnostic)]
pub enum HuskError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed version, constraint, spec document or archive.
    #[error("Format error: {message}")]
    Format { message: String },

    /// Two constraints for the same import path have no common version.
    #[error("{message}")]
    #[diagnostic(help("Relax one of the requirements or pin both to the same revision"))]
    Conflict { message: String },

    /// A version was matched against a constraint pinned to a VCS revision.
    #[error("{dependency} is pinned to a revision and has no version range")]
    NotARange { dependency: String },

    /// Remote resource does not exist.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Remote server answered with a non-success status.
    #[error("HTTP {code} from {url}: {message}")]
    Status {
        code: u16,
        url: String,
        message: String,
    },

    /// Network request could not be performed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A spec or package failed its checks.
    #[error("Found issues in {subject}:{}", IssueList(.issues))]
    #[diagnostic(help("Run `husk check` and fix every listed issue"))]
    Validation {
        subject: String,
        issues: Vec<String>,
    },

    /// Workspace directory is missing or misconfigured.
    #[error("Workspace error: {message}")]
    #[diagnostic(help("Set HUSK_WORKSPACE or `workspace` in ~/.husk/config.toml"))]
    Workspace { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl HuskError {
    /// Shorthand for [`HuskError::Format`].
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}

struct IssueList<'a>(&'a [String]);

impl fmt::Display for IssueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in self.0 {
            write!(f, "\n    {issue}")?;
        }
        Ok(())
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type HuskResult<T> = miette::Result<T>;
