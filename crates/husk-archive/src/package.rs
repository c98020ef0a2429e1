use std::path::{Path, PathBuf};

use husk_core::source::{DirSource, MetadataProvider, PackageInfo};
use husk_core::spec::{Spec, SPEC_FILE_NAME};
use husk_core::version::Version;
use husk_util::errors::HuskError;

use crate::archive::ARCHIVE_EXT;

/// Package name reserved for executables, which husk does not distribute.
pub const EXECUTABLE_PACKAGE: &str = "main";

/// A package: its spec document plus the metadata read from its sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub spec: Spec,
    pub info: PackageInfo,
}

impl Package {
    pub fn new(spec: Spec, info: PackageInfo) -> Self {
        Self { spec, info }
    }

    /// Read `dir/husk.json` and scan the sources in `dir`.
    pub fn from_dir(dir: &Path, provider: &dyn MetadataProvider) -> Result<Self, HuskError> {
        let spec = Spec::read_file(&dir.join(SPEC_FILE_NAME))?;
        let info = provider.inspect(&DirSource::new(dir))?;
        Ok(Self::new(spec, info))
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn vendor(&self) -> &str {
        &self.spec.vendor
    }

    pub fn version(&self) -> Version {
        self.spec.version
    }

    pub fn is_executable(&self) -> bool {
        self.info.name == EXECUTABLE_PACKAGE
    }

    /// `<name>-<version>.husk`
    pub fn file_name(&self) -> String {
        format!("{}-{}.{ARCHIVE_EXT}", self.name(), self.version())
    }

    /// `<prefix>/<vendor>/<name>-<version>.husk`, with OS separators.
    pub fn file_path(&self, prefix: &str) -> PathBuf {
        Path::new(prefix).join(self.vendor()).join(self.file_name())
    }

    /// `<prefix>/<vendor>/<name>`
    pub fn import_path(&self, prefix: &str) -> String {
        format!("{prefix}/{}/{}", self.vendor(), self.name())
    }

    /// Files that make up the package, in archive order: sources, test
    /// sources, extra files, then the spec document.
    pub fn files(&self) -> Vec<String> {
        self.info
            .source_files
            .iter()
            .chain(&self.info.test_files)
            .chain(&self.spec.extra_files)
            .cloned()
            .chain(std::iter::once(SPEC_FILE_NAME.to_string()))
            .collect()
    }

    /// Spec issues followed by naming issues. Empty means publishable.
    pub fn check(&self) -> Vec<String> {
        let mut issues = self.spec.check();
        issues.extend(self.info.naming_errors.iter().cloned());
        issues
    }
}
