//! Command dispatch and handler modules.

mod bundle;
mod check;
mod generate;
mod get;
mod install;
mod lock;
mod pack;
mod publish;
mod unpack;

use std::path::PathBuf;

use husk_core::config::GlobalConfig;
use husk_util::errors::HuskError;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the matching command handler.
pub fn dispatch(cli: Cli, config: GlobalConfig) -> Result<()> {
    match cli.command {
        Command::Generate => generate::exec(),
        Command::Check { files } => check::exec(&files),
        Command::Pack { output, no_check } => pack::exec(output.as_deref(), !no_check),
        Command::Unpack {
            file,
            force,
            no_check,
        } => unpack::exec(&file, force, !no_check),
        Command::Install {
            prefix,
            no_check,
            files,
        } => install::exec(&config, &prefix, &files, !no_check),
        Command::Get {
            prefix,
            no_check,
            references,
        } => get::exec(&config, prefix, &references, !no_check),
        Command::Publish {
            server,
            token,
            files,
        } => publish::exec(&config, server, token, &files),
        Command::Lock => lock::exec(&config),
        Command::Bundle => bundle::exec(&config),
    }
}

fn current_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir().map_err(HuskError::Io)?)
}
