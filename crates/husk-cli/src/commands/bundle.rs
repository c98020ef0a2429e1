use husk_core::config::GlobalConfig;
use husk_ops::workspace::Workspace;
use husk_resolver::dependencies::BUNDLE_FILE_NAME;
use miette::Result;

pub fn exec(config: &GlobalConfig) -> Result<()> {
    let cwd = super::current_dir()?;
    let workspace = Workspace::from_config(config)?;
    let deps = husk_ops::ops_bundle::bundle(&cwd, &workspace, &config.import_prefixes())?;
    husk_ops::ops_lock::write_document(&deps, &cwd.join(BUNDLE_FILE_NAME))
}
