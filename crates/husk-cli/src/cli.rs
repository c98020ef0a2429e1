//! CLI argument definitions for husk.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "husk",
    version,
    about = "Package manager for versioned source packages",
    long_about = "husk packs source packages into versioned archives, checks them, \
                  publishes them to a package server and installs them together with \
                  their dependencies into a workspace."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or update husk.json for the package in the current directory
    Generate,

    /// Check spec documents (.json) and archives (.husk) for problems
    Check {
        /// Files to check
        #[arg(default_value = "husk.json")]
        files: Vec<String>,
    },

    /// Pack the package in the current directory into an archive
    Pack {
        /// Output file (default: <name>-<version>.husk)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip package checks
        #[arg(long)]
        no_check: bool,
    },

    /// Extract an archive into the current directory
    Unpack {
        /// Archive to extract
        file: PathBuf,
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
        /// Skip package checks
        #[arg(long)]
        no_check: bool,
    },

    /// Install local archives into the workspace
    Install {
        /// Import path prefix to install under
        #[arg(short, long, default_value = husk_ops::ops_install::DEFAULT_INSTALL_PREFIX)]
        prefix: String,
        /// Skip package checks
        #[arg(long)]
        no_check: bool,
        /// Archives to install
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Download packages and their dependencies, then install them
    Get {
        /// Install under this prefix instead of each package's own
        #[arg(short, long)]
        prefix: Option<String>,
        /// Skip package checks
        #[arg(long)]
        no_check: bool,
        /// Packages to get (default: imports of the current package)
        references: Vec<String>,
    },

    /// Upload archives to a package server
    Publish {
        /// Server to publish to (host[:port] or URL)
        #[arg(long)]
        server: Option<String>,
        /// Access token
        #[arg(long)]
        token: Option<String>,
        /// Archives to publish
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Pin every workspace repository to its current revision (husk-lock.json)
    Lock,

    /// List the workspace packages used by the current directory (husk-bundle.json)
    Bundle,
}

pub fn parse() -> Cli {
    Cli::parse()
}
