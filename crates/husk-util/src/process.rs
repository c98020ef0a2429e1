//! Running external programs (VCS probes, the post-install build command).

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use crate::errors::HuskError;

/// A program invocation assembled step by step, then run once.
pub struct ExternalCommand {
    inner: Command,
}

impl ExternalCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            inner: Command::new(program),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    /// Run in `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.inner.current_dir(dir);
        self
    }

    /// Program and arguments separated by spaces.
    pub fn command_line(&self) -> String {
        std::iter::once(self.inner.get_program())
            .chain(self.inner.get_args())
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion and capture stdout and stderr.
    pub fn output(mut self) -> Result<Output, HuskError> {
        tracing::debug!(
            "Running `{}` in {:?}",
            self.command_line(),
            self.inner.get_current_dir()
        );
        Ok(self.inner.output()?)
    }

    /// Run to completion and return trimmed stdout; a non-zero exit is an
    /// error carrying stderr.
    pub fn run(self) -> Result<String, HuskError> {
        let line = self.command_line();
        let output = self.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HuskError::Generic {
                message: format!("`{line}` failed ({}): {}", output.status, stderr.trim()),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
