use miette::Result;

pub fn exec(files: &[String]) -> Result<()> {
    let cwd = super::current_dir()?;
    husk_ops::ops_check::check(&cwd, files)
}
