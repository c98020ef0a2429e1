//! Operation: list everything the packages under a directory use.

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use husk_core::config::ImportPrefixes;
use husk_core::source::{DirSource, MetadataProvider, SourceScanner};
use husk_resolver::dependencies::Dependencies;
use husk_resolver::dependency::{Constraint, Dependency};
use husk_util::errors::HuskError;

use crate::workspace::{package_dirs, Workspace};

/// Build the bundle document for the packages at or below `dir`: a
/// wildcard constraint for every workspace package they import,
/// transitively. Test imports count for the packages under `dir` only.
///
/// Imports without sources in the workspace are skipped, unless they are
/// managed by a known prefix, in which case they must have been fetched.
pub fn bundle(
    dir: &Path,
    workspace: &Workspace,
    prefixes: &ImportPrefixes,
) -> miette::Result<Dependencies> {
    let mut queue = VecDeque::new();
    for package_dir in package_dirs(dir)? {
        let info = SourceScanner.inspect(&DirSource::new(&package_dir))?;
        queue.extend(info.all_imports());
    }

    let mut deps = Dependencies::new();
    let mut seen = HashSet::new();
    while let Some(import_path) = queue.pop_front() {
        if !seen.insert(import_path.clone()) {
            continue;
        }
        if import_path.starts_with('.') || import_path.starts_with('/') {
            tracing::warn!("Skipping import path {import_path:?}");
            continue;
        }
        if !workspace.contains(&import_path) {
            if prefixes.is_managed(&import_path) {
                return Err(HuskError::Workspace {
                    message: format!("{import_path} is not installed; run `husk get` first"),
                }
                .into());
            }
            tracing::debug!("{import_path} is not a workspace package");
            continue;
        }

        let info = SourceScanner.inspect(&DirSource::new(workspace.source_dir(&import_path)))?;
        deps.add(Dependency::new(import_path, Constraint::any()))?;
        queue.extend(info.imports);
    }
    Ok(deps)
}
