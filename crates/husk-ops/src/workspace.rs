//! Workspace layout.
//!
//! ```text
//! <root>/src/<import path>/                            sources
//! <root>/husk/<prefix>/<vendor>/<name>-<version>.husk  archives
//! ```

use std::path::{Component, Path, PathBuf};

use husk_core::config::GlobalConfig;
use husk_core::source::is_source_file;
use husk_util::errors::HuskError;

pub const SRC_DIR: &str = "src";
pub const ARCHIVE_DIR: &str = "husk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The workspace named by `HUSK_WORKSPACE` or the configuration.
    pub fn from_config(config: &GlobalConfig) -> Result<Self, HuskError> {
        Ok(Self::new(config.workspace_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.root.join(ARCHIVE_DIR)
    }

    /// Directory holding the sources of `import_path`.
    pub fn source_dir(&self, import_path: &str) -> PathBuf {
        import_path
            .split('/')
            .fold(self.src_dir(), |dir, segment| dir.join(segment))
    }

    /// Where an archive with the given relative file path is stored.
    pub fn archive_path(&self, file_path: &Path) -> PathBuf {
        self.archive_dir().join(file_path)
    }

    /// Import path of a directory below `src/`, or `None` outside of it.
    pub fn import_path_of(&self, dir: &Path) -> Option<String> {
        let rel = dir.strip_prefix(self.src_dir()).ok()?;
        let segments: Vec<&str> = rel
            .components()
            .map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect::<Option<_>>()?;
        (!segments.is_empty()).then(|| segments.join("/"))
    }

    /// Whether `import_path` has sources in this workspace.
    pub fn contains(&self, import_path: &str) -> bool {
        has_sources(&self.source_dir(import_path))
    }
}

/// Whether `dir` directly holds at least one source file.
pub fn has_sources(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries.filter_map(Result::ok).any(|e| {
                e.file_type().is_ok_and(|t| t.is_file())
                    && e.file_name().to_str().is_some_and(is_source_file)
            })
        })
        .unwrap_or(false)
}

/// Every directory at or below `start` that holds sources, sorted.
/// Directories starting with `.` (VCS metadata) are skipped.
pub fn package_dirs(start: &Path) -> Result<Vec<PathBuf>, HuskError> {
    let mut found = Vec::new();
    let mut pending = vec![start.to_path_buf()];
    while let Some(dir) = pending.pop() {
        if has_sources(&dir) {
            found.push(dir.clone());
        }
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if entry.file_type()?.is_dir() && !hidden {
                pending.push(entry.path());
            }
        }
    }
    found.sort();
    Ok(found)
}
