//! Operation: create or update `husk.json` for the package in a directory.

use std::path::Path;

use globset::{GlobBuilder, GlobSetBuilder};
use husk_archive::package::Package;
use husk_core::source::{DirSource, MetadataProvider, SourceScanner};
use husk_core::spec::{Person, Spec, SPEC_FILE_NAME};
use husk_util::errors::HuskError;

/// Files bundled as extra files by default.
const EXTRA_FILE_PATTERNS: &[&str] = &[
    "read*", "licen?e*", "copying*", "contrib*", "author*", "thank*", "news*", "change*",
    "install*", "bug*", "todo*",
];

/// Result of a generate operation.
#[derive(Debug)]
pub struct GenerateResult {
    pub created: bool,
    pub spec: Spec,
    /// Issues left for the author to fix.
    pub issues: Vec<String>,
}

/// Write `dir/husk.json`, keeping whatever an existing one already says.
///
/// A placeholder author is added when none is listed, and extra files are
/// discovered when none are listed.
pub fn generate(dir: &Path) -> miette::Result<GenerateResult> {
    let spec_path = dir.join(SPEC_FILE_NAME);
    let created = !spec_path.exists();
    let mut spec = if created {
        Spec::default()
    } else {
        Spec::read_file(&spec_path)?
    };

    let info = SourceScanner.inspect(&DirSource::new(dir))?;

    if spec.authors.is_empty() {
        spec.authors.push(Person::example());
    }
    if spec.extra_files.is_empty() {
        spec.extra_files = find_extra_files(dir)?;
    }

    spec.write_file(&spec_path)?;
    let issues = Package::new(spec.clone(), info).check();

    Ok(GenerateResult {
        created,
        spec,
        issues,
    })
}

/// Regular files in `dir` matching the extra file patterns, any case, sorted.
pub fn find_extra_files(dir: &Path) -> Result<Vec<String>, HuskError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in EXTRA_FILE_PATTERNS {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|e| HuskError::Generic {
                message: format!("Invalid pattern {pattern:?}: {e}"),
            })?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|e| HuskError::Generic {
        message: format!("Invalid extra file patterns: {e}"),
    })?;

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if set.is_match(name) {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    Ok(files)
}
