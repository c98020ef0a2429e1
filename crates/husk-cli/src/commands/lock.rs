use husk_core::config::GlobalConfig;
use husk_ops::vcs::CommandVcs;
use husk_ops::workspace::Workspace;
use husk_resolver::dependencies::LOCK_FILE_NAME;
use miette::Result;

pub fn exec(config: &GlobalConfig) -> Result<()> {
    let cwd = super::current_dir()?;
    let workspace = Workspace::from_config(config)?;
    let deps = husk_ops::ops_lock::lock(&workspace, &CommandVcs)?;
    husk_ops::ops_lock::write_document(&deps, &cwd.join(LOCK_FILE_NAME))
}
