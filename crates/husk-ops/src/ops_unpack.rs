//! Operation: extract an archive into a directory.

use std::path::Path;

use husk_archive::archive::Archive;
use husk_core::source::SourceScanner;
use husk_util::errors::HuskError;

/// Extract `file` into `dir`. Existing files are only replaced with
/// `force`.
pub fn unpack(dir: &Path, file: &Path, force: bool, check: bool) -> miette::Result<()> {
    let archive = Archive::read_file(file)?;
    if check {
        let issues = archive.inspect(&SourceScanner)?.check();
        if !issues.is_empty() {
            return Err(HuskError::Validation {
                subject: file.display().to_string(),
                issues,
            }
            .into());
        }
    }
    archive.write(dir, force)?;
    husk_util::progress::status("Unpacked", &file.display().to_string());
    Ok(())
}
