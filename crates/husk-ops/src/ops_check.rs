//! Operation: check spec documents and archives for problems.

use std::path::Path;

use husk_archive::archive::{Archive, ARCHIVE_EXT};
use husk_archive::package::Package;
use husk_core::source::{DirSource, MetadataProvider, SourceScanner};
use husk_core::spec::Spec;
use husk_util::errors::HuskError;

/// Check each file: a `.json` spec together with the package in `dir`, or
/// a `.husk` archive on its own.
///
/// Stops at the first file with issues, reporting all of that file's issues.
pub fn check(dir: &Path, files: &[String]) -> miette::Result<()> {
    for file in files {
        let path = dir.join(file);
        let issues = match Path::new(file).extension().and_then(|e| e.to_str()) {
            Some("json") => {
                let spec = Spec::read_file(&path)?;
                let info = SourceScanner.inspect(&DirSource::new(dir))?;
                Package::new(spec, info).check()
            }
            Some(ARCHIVE_EXT) => Archive::read_file(&path)?
                .inspect(&SourceScanner)?
                .check(),
            _ => {
                return Err(HuskError::Generic {
                    message: format!("{file:?} doesn't end with .json or .{ARCHIVE_EXT}"),
                }
                .into())
            }
        };

        if !issues.is_empty() {
            return Err(HuskError::Validation {
                subject: file.clone(),
                issues,
            }
            .into());
        }
        tracing::info!("{file} looks good");
        husk_util::progress::status("Checked", file);
    }
    Ok(())
}
