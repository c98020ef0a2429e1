use std::path::Path;

use miette::Result;

pub fn exec(file: &Path, force: bool, check: bool) -> Result<()> {
    let cwd = super::current_dir()?;
    husk_ops::ops_unpack::unpack(&cwd, file, force, check)
}
