use husk_archive::archive::Archive;
use husk_archive::package::Package;
use husk_resolver::resolver::{Installer, ResolvedPackage};
use husk_util::errors::HuskError;
use husk_util::process::ExternalCommand;

use crate::workspace::Workspace;

/// Installs packages into a workspace.
///
/// The archive is stored under `husk/`, its entries replace
/// `src/<import path>`, and the configured build command (if any) runs with
/// the import path appended.
pub struct WorkspaceInstaller<'a> {
    workspace: &'a Workspace,
    build_command: &'a [String],
}

impl<'a> WorkspaceInstaller<'a> {
    pub fn new(workspace: &'a Workspace, build_command: &'a [String]) -> Self {
        Self {
            workspace,
            build_command,
        }
    }

    pub fn install_archive(
        &self,
        prefix: &str,
        package: &Package,
        archive: &Archive,
        bytes: &[u8],
    ) -> Result<(), HuskError> {
        let import_path = package.import_path(prefix);

        let archive_path = self.workspace.archive_path(&package.file_path(prefix));
        if let Some(parent) = archive_path.parent() {
            husk_util::fs::ensure_dir(parent)?;
        }
        std::fs::write(&archive_path, bytes)?;
        husk_util::fs::set_file_mode(&archive_path, 0o644)?;
        tracing::debug!("Stored {}", archive_path.display());

        let source_dir = self.workspace.source_dir(&import_path);
        husk_util::fs::remove_dir_if_exists(&source_dir)?;
        archive.write(&source_dir, true)?;
        tracing::info!("Unpacked {import_path} into {}", source_dir.display());

        if let Some((program, args)) = self.build_command.split_first() {
            ExternalCommand::new(program)
                .args(args)
                .arg(&import_path)
                .in_dir(self.workspace.root())
                .run()?;
        }

        husk_util::progress::status(
            "Installed",
            &format!("{import_path} v{}", package.version()),
        );
        Ok(())
    }
}

impl Installer for WorkspaceInstaller<'_> {
    fn install(&mut self, _import_path: &str, resolved: &ResolvedPackage) -> Result<(), HuskError> {
        self.install_archive(
            &resolved.prefix,
            &resolved.package,
            &resolved.archive,
            &resolved.bytes,
        )
    }
}
