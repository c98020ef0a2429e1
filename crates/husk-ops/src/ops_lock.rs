//! Operation: pin every repository in the workspace to its current revision.

use std::collections::HashSet;
use std::path::Path;

use husk_resolver::dependencies::Dependencies;
use husk_resolver::dependency::{Constraint, Dependency};

use crate::vcs::{find_root, VcsProbe};
use crate::workspace::{package_dirs, Workspace};

/// Build the lock document: one pinned constraint per repository root
/// holding workspace packages, keyed by the root's path below `src/`.
pub fn lock(workspace: &Workspace, probe: &impl VcsProbe) -> miette::Result<Dependencies> {
    let src = workspace.src_dir();
    let mut deps = Dependencies::new();
    let mut seen_roots = HashSet::new();

    for dir in package_dirs(&src)? {
        let Some((vcs, root)) = find_root(&dir, &src) else {
            tracing::debug!("{} is not under version control", dir.display());
            continue;
        };
        if !seen_roots.insert(root.clone()) {
            continue;
        }
        let Some(import_path) = workspace.import_path_of(&root) else {
            tracing::warn!("Skipping repository outside the workspace: {}", root.display());
            continue;
        };

        let revision = probe.current_revision(vcs, &root)?;
        deps.add(Dependency::new(import_path, Constraint::pinned(vcs, revision)))?;
    }
    Ok(deps)
}

/// Write `deps` to `path`, printing a status line.
pub fn write_document(deps: &Dependencies, path: &Path) -> miette::Result<()> {
    deps.write_file(path)?;
    husk_util::progress::status(
        "Wrote",
        &format!("{} ({} entries)", path.display(), deps.len()),
    );
    Ok(())
}
