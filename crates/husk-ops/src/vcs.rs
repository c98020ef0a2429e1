//! Version control probing for `husk lock`.

use std::path::{Path, PathBuf};

use husk_resolver::dependency::Vcs;
use husk_util::errors::HuskError;
use husk_util::process::ExternalCommand;

/// Reports the revision a repository is checked out at.
pub trait VcsProbe {
    fn current_revision(&self, vcs: Vcs, root: &Path) -> Result<String, HuskError>;
}

/// [`VcsProbe`] that runs the VCS binaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandVcs;

impl VcsProbe for CommandVcs {
    fn current_revision(&self, vcs: Vcs, root: &Path) -> Result<String, HuskError> {
        let args: &[&str] = match vcs {
            Vcs::Bzr => &["testament"],
            Vcs::Git => &["rev-parse", "--verify", "HEAD"],
            Vcs::Hg => &["identify", "--debug", "-i"],
        };
        let output = ExternalCommand::new(vcs.as_str())
            .args(args)
            .in_dir(root)
            .run()?;
        parse_revision(vcs, &output).ok_or_else(|| HuskError::Generic {
            message: format!("Can't find current {vcs} revision in {}", root.display()),
        })
    }
}

/// Extract the revision from the output of the probe command.
pub fn parse_revision(vcs: Vcs, output: &str) -> Option<String> {
    let output = output.trim();
    let revision = match vcs {
        Vcs::Bzr => output
            .lines()
            .find_map(|line| line.strip_prefix("revision-id: "))?
            .trim(),
        Vcs::Git => output,
        Vcs::Hg => output.strip_suffix('+').unwrap_or(output),
    };
    (!revision.is_empty()).then(|| revision.to_string())
}

/// Walk up from `dir` towards `stop` (exclusive) looking for a repository
/// root.
pub fn find_root(dir: &Path, stop: &Path) -> Option<(Vcs, PathBuf)> {
    let mut current = dir;
    while current != stop && current.starts_with(stop) {
        for vcs in Vcs::ALL {
            if current.join(vcs.marker_dir()).is_dir() {
                return Some((vcs, current.to_path_buf()));
            }
        }
        current = current.parent()?;
    }
    None
}
