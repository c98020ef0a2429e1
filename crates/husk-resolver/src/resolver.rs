//! Transitive package fetching.
//!
//! The resolver walks the package graph breadth-first: it pops a reference,
//! fetches and reads the archive it points to, queues the archive's managed
//! imports, and records where the package installs. Nothing is installed
//! until the whole graph has been fetched, and then in ascending import path
//! order. Every error aborts the walk.

use std::collections::{BTreeMap, HashSet, VecDeque};

use husk_archive::archive::Archive;
use husk_archive::package::Package;
use husk_core::config::ImportPrefixes;
use husk_core::source::{MetadataProvider, PackageInfo};
use husk_registry::fetch::Fetcher;
use husk_util::errors::HuskError;

use crate::dependencies::Dependencies;
use crate::dependency::{Constraint, Dependency};
use crate::reference::Reference;

/// A fetched package and everything needed to install it.
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    pub reference: Reference,
    /// Prefix the package installs under.
    pub prefix: String,
    /// Archive bytes as fetched.
    pub bytes: Vec<u8>,
    pub archive: Archive,
    pub package: Package,
}

/// Puts a resolved package into place.
pub trait Installer {
    fn install(&mut self, import_path: &str, resolved: &ResolvedPackage) -> Result<(), HuskError>;
}

/// Fetches a package graph starting from a set of references.
pub struct Resolver<'a, F, M> {
    fetcher: &'a F,
    provider: &'a M,
    prefixes: &'a ImportPrefixes,
    check: bool,
    install_prefix: Option<String>,
    wishlist: Option<&'a Dependencies>,
}

impl<'a, F, M> Resolver<'a, F, M>
where
    F: Fetcher,
    M: MetadataProvider,
{
    pub fn new(fetcher: &'a F, provider: &'a M, prefixes: &'a ImportPrefixes) -> Self {
        Self {
            fetcher,
            provider,
            prefixes,
            check: true,
            install_prefix: None,
            wishlist: None,
        }
    }

    /// Validate every fetched package (on by default).
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Install everything under `prefix` instead of the reference's own.
    pub fn with_install_prefix(mut self, prefix: Option<String>) -> Self {
        self.install_prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    /// Require fetched versions to satisfy these constraints. Pinned
    /// entries are not checked.
    pub fn with_constraints(mut self, wishlist: &'a Dependencies) -> Self {
        self.wishlist = Some(wishlist);
        self
    }

    /// The managed imports of a local package: what `husk get` fetches when
    /// given no references.
    pub fn default_references(&self, info: &PackageInfo) -> Vec<String> {
        self.prefixes.managed(&info.imports)
    }

    /// Walk the graph reachable from `references`.
    pub fn resolve(&self, references: &[String]) -> Result<Resolution, HuskError> {
        let mut queue: VecDeque<String> = references.iter().cloned().collect();
        let mut visited: HashSet<String> = HashSet::new();
        let mut versions = Dependencies::new();
        let mut packages = BTreeMap::new();

        while let Some(arg) = queue.pop_front() {
            let reference = Reference::parse(&arg, self.prefixes)?;
            if !visited.insert(reference.key().to_string()) {
                tracing::trace!("Already fetched {reference}");
                continue;
            }

            let bytes = self.fetcher.fetch(reference.key())?;
            let archive = Archive::read(&bytes)?;
            let package = archive.inspect(self.provider)?;

            if package.is_executable() {
                return Err(HuskError::Generic {
                    message: format!("{reference}: executable packages are not supported"),
                });
            }
            if self.check {
                let issues = package.check();
                if !issues.is_empty() {
                    return Err(HuskError::Validation {
                        subject: reference.to_string(),
                        issues,
                    });
                }
            }

            let prefix = self
                .install_prefix
                .clone()
                .unwrap_or_else(|| reference.prefix.clone());
            let import_path = package.import_path(&prefix);
            let version = package.version();

            versions.add(Dependency::new(import_path.as_str(), Constraint::exact(version)))?;
            if let Some(wanted) = self.wishlist.and_then(|w| w.get(&import_path)) {
                if !wanted.constraint.is_pinned() && !wanted.matches(&import_path, &version)? {
                    return Err(HuskError::Conflict {
                        message: format!("{import_path} {version} does not satisfy {wanted}"),
                    });
                }
            }

            let imports = self.prefixes.managed(&package.info.imports);
            if !imports.is_empty() {
                tracing::debug!("{import_path} depends on {}", imports.join(", "));
            }
            queue.extend(imports);

            packages.insert(
                import_path,
                ResolvedPackage {
                    reference,
                    prefix,
                    bytes,
                    archive,
                    package,
                },
            );
        }

        Ok(Resolution { packages })
    }
}

/// Outcome of a resolver walk: packages keyed by install path.
#[derive(Debug, Default)]
pub struct Resolution {
    packages: BTreeMap<String, ResolvedPackage>,
}

impl Resolution {
    /// Install paths in ascending order.
    pub fn import_paths(&self) -> Vec<&str> {
        self.packages.keys().map(String::as_str).collect()
    }

    pub fn get(&self, import_path: &str) -> Option<&ResolvedPackage> {
        self.packages.get(import_path)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Install every package once, in ascending import path order. Stops
    /// at the first failure.
    pub fn install(&self, installer: &mut impl Installer) -> Result<(), HuskError> {
        for (import_path, resolved) in &self.packages {
            installer.install(import_path, resolved)?;
        }
        Ok(())
    }
}
