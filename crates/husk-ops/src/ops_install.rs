//! Operation: install local archive files into the workspace.

use std::path::Path;

use husk_archive::archive::Archive;
use husk_core::source::SourceScanner;
use husk_util::errors::HuskError;

use crate::installer::WorkspaceInstaller;

/// Prefix used by `husk install` when none is given.
pub const DEFAULT_INSTALL_PREFIX: &str = "localhost";

/// Install each archive under `prefix`, in the order given.
pub fn install(
    installer: &WorkspaceInstaller<'_>,
    files: &[&Path],
    prefix: &str,
    check: bool,
) -> miette::Result<()> {
    for file in files {
        let bytes = std::fs::read(file).map_err(HuskError::Io)?;
        let archive = Archive::read(&bytes)?;
        let package = archive.inspect(&SourceScanner)?;

        if package.is_executable() {
            return Err(HuskError::Generic {
                message: format!(
                    r#"{}: executables (package "main") are not supported"#,
                    file.display()
                ),
            }
            .into());
        }
        if check {
            let issues = package.check();
            if !issues.is_empty() {
                return Err(HuskError::Validation {
                    subject: file.display().to_string(),
                    issues,
                }
                .into());
            }
        }

        installer.install_archive(prefix, &package, &archive, &bytes)?;
    }
    Ok(())
}
