//! Operation: pack the package in a directory into an archive.

use std::io::Write;
use std::path::{Path, PathBuf};

use husk_archive::archive::Archive;
use husk_archive::package::Package;
use husk_core::source::SourceScanner;
use husk_util::errors::HuskError;
use husk_util::hash::short_digest;

/// Pack `dir` into `output` (default: `dir/<name>-<version>.husk`).
///
/// Returns the path of the written archive.
pub fn pack(dir: &Path, output: Option<&Path>, check: bool) -> miette::Result<PathBuf> {
    let package = Package::from_dir(dir, &SourceScanner)?;
    if package.is_executable() {
        return Err(HuskError::Generic {
            message: r#"Executables (package "main") can't be packed"#.to_string(),
        }
        .into());
    }
    if check {
        let issues = package.check();
        if !issues.is_empty() {
            return Err(HuskError::Validation {
                subject: package.name().to_string(),
                issues,
            }
            .into());
        }
    }

    let archive = Archive::build(dir, &package.files())?;
    let bytes = archive.to_bytes()?;

    let target = match output {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => dir.join(path),
        None => dir.join(package.file_name()),
    };
    let target_dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(dir);

    let mut tmp = tempfile::NamedTempFile::new_in(target_dir).map_err(HuskError::Io)?;
    tmp.write_all(&bytes).map_err(HuskError::Io)?;
    tmp.persist(&target).map_err(|e| HuskError::Io(e.error))?;
    husk_util::fs::set_file_mode(&target, 0o644).map_err(HuskError::Io)?;

    husk_util::progress::status(
        "Packed",
        &format!(
            "{} v{} ({} files, sha256 {})",
            package.name(),
            package.version(),
            archive.entries().len(),
            short_digest(&bytes)
        ),
    );
    Ok(target)
}
