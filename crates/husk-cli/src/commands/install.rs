use std::path::{Path, PathBuf};

use husk_core::config::GlobalConfig;
use husk_ops::installer::WorkspaceInstaller;
use husk_ops::workspace::Workspace;
use miette::Result;

pub fn exec(config: &GlobalConfig, prefix: &str, files: &[PathBuf], check: bool) -> Result<()> {
    let workspace = Workspace::from_config(config)?;
    let installer = WorkspaceInstaller::new(&workspace, &config.build_command);
    let files: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
    husk_ops::ops_install::install(&installer, &files, prefix, check)
}
