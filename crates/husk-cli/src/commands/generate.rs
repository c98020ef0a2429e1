use miette::Result;

pub fn exec() -> Result<()> {
    let cwd = super::current_dir()?;
    let result = husk_ops::ops_generate::generate(&cwd)?;

    let label = if result.created { "Created" } else { "Updated" };
    husk_util::progress::status(label, husk_core::spec::SPEC_FILE_NAME);
    if !result.issues.is_empty() {
        husk_util::progress::issues(
            "Now fix the following issues, then run `husk check`:",
            &result.issues,
        );
    }
    Ok(())
}
