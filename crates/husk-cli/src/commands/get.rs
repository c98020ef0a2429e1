use husk_core::config::GlobalConfig;
use husk_ops::installer::WorkspaceInstaller;
use husk_ops::ops_get::GetOptions;
use husk_ops::workspace::Workspace;
use husk_registry::fetch::HttpFetcher;
use miette::Result;

pub fn exec(
    config: &GlobalConfig,
    prefix: Option<String>,
    references: &[String],
    check: bool,
) -> Result<()> {
    let cwd = super::current_dir()?;
    let workspace = Workspace::from_config(config)?;
    let prefixes = config.import_prefixes();
    let fetcher = HttpFetcher::new()?;
    let mut installer = WorkspaceInstaller::new(&workspace, &config.build_command);

    let installed = husk_ops::ops_get::get(
        &cwd,
        references,
        &prefixes,
        &fetcher,
        &mut installer,
        &GetOptions { prefix, check },
    )?;
    if installed.is_empty() {
        husk_util::progress::status_warn("Nothing", "to get");
    }
    Ok(())
}
