use std::path::Path;

use miette::Result;

pub fn exec(output: Option<&Path>, check: bool) -> Result<()> {
    let cwd = super::current_dir()?;
    let path = husk_ops::ops_pack::pack(&cwd, output, check)?;
    println!("{}", path.display());
    Ok(())
}
