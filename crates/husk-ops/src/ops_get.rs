//! Operation: fetch packages and their dependencies, then install them.

use std::path::Path;

use husk_core::config::ImportPrefixes;
use husk_core::source::{DirSource, MetadataProvider, SourceScanner};
use husk_registry::fetch::Fetcher;
use husk_resolver::dependencies::{Dependencies, BUNDLE_FILE_NAME};
use husk_resolver::resolver::{Installer, Resolver};

/// Options of a get operation.
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    /// Install prefix; by default each reference's own.
    pub prefix: Option<String>,
    pub check: bool,
}

/// Fetch `references` (or, with none, the managed imports of the package in
/// `dir`) with everything they depend on, then install them all.
///
/// When `dir` holds a bundle document, fetched versions must satisfy it.
/// Returns the installed import paths, ascending.
pub fn get(
    dir: &Path,
    references: &[String],
    prefixes: &ImportPrefixes,
    fetcher: &impl Fetcher,
    installer: &mut impl Installer,
    options: &GetOptions,
) -> miette::Result<Vec<String>> {
    let bundle_path = dir.join(BUNDLE_FILE_NAME);
    let wishlist = if bundle_path.is_file() {
        tracing::debug!("Using {}", bundle_path.display());
        Some(Dependencies::read_file(&bundle_path)?)
    } else {
        None
    };

    let mut resolver = Resolver::new(fetcher, &SourceScanner, prefixes)
        .with_check(options.check)
        .with_install_prefix(options.prefix.clone());
    if let Some(wishlist) = &wishlist {
        resolver = resolver.with_constraints(wishlist);
    }

    let references = if references.is_empty() {
        let info = SourceScanner.inspect(&DirSource::new(dir))?;
        let defaults = resolver.default_references(&info);
        if !defaults.is_empty() {
            tracing::info!("{} depends on {}", info.name, defaults.join(", "));
        }
        defaults
    } else {
        references.to_vec()
    };

    let spinner = husk_util::progress::spinner("Fetching packages...");
    let resolution = resolver.resolve(&references);
    spinner.finish_and_clear();
    let resolution = resolution?;

    resolution.install(installer)?;
    Ok(resolution
        .import_paths()
        .into_iter()
        .map(str::to_string)
        .collect())
}
