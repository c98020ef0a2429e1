//! A set of constraints keyed by import path.
//!
//! The same store backs the bundle document (`husk-bundle.json`, wildcard
//! constraints for everything a workspace uses) and the lock document
//! (`husk-lock.json`, every repository pinned to its current revision).

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use husk_util::errors::HuskError;

use crate::conflict::ConflictError;
use crate::dependency::{Constraint, Dependency};

/// File name of the wildcard wishlist document.
pub const BUNDLE_FILE_NAME: &str = "husk-bundle.json";
/// File name of the pinned-revision document.
pub const LOCK_FILE_NAME: &str = "husk-lock.json";

/// Constraints keyed by import path, iterated in ascending path order.
///
/// The stored constraint for a path is the intersection of everything
/// added for it, so the result does not depend on add order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    deps: BTreeMap<String, Constraint>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `dep` into the store.
    ///
    /// On conflict the stored constraint is left untouched.
    pub fn add(&mut self, dep: Dependency) -> Result<(), ConflictError> {
        let Some(existing) = self.deps.get_mut(&dep.import_path) else {
            self.deps.insert(dep.import_path, dep.constraint);
            return Ok(());
        };

        match existing.intersect(&dep.constraint) {
            Some(merged) => {
                *existing = merged;
                Ok(())
            }
            None => Err(ConflictError {
                existing: existing.clone(),
                import_path: dep.import_path,
                incoming: dep.constraint,
            }),
        }
    }

    pub fn get(&self, import_path: &str) -> Option<Dependency> {
        self.deps
            .get(import_path)
            .map(|c| Dependency::new(import_path, c.clone()))
    }

    pub fn contains(&self, import_path: &str) -> bool {
        self.deps.contains_key(import_path)
    }

    /// Import paths in ascending order.
    pub fn import_paths(&self) -> Vec<&str> {
        self.deps.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Constraint)> {
        self.deps.iter().map(|(p, c)| (p.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    /// Flat JSON object of path to constraint text, keys ascending, two-space
    /// indent, trailing newline.
    pub fn to_document(&self) -> String {
        let flat: BTreeMap<&str, String> =
            self.iter().map(|(p, c)| (p, c.to_string())).collect();
        let mut text = serde_json::to_string_pretty(&flat).unwrap_or_else(|_| "{}".to_string());
        text.push('\n');
        text
    }

    /// Parse a document written by [`Dependencies::to_document`].
    pub fn from_document(text: &str) -> Result<Self, HuskError> {
        let flat: BTreeMap<String, String> = serde_json::from_str(text)
            .map_err(|e| HuskError::format(format!("Invalid dependencies document: {e}")))?;
        let mut deps = Self::new();
        for (path, constraint) in flat {
            deps.add(Dependency::parse(&path, &constraint)?)?;
        }
        Ok(deps)
    }

    pub fn read_file(path: &Path) -> Result<Self, HuskError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_document(&text).map_err(|e| match e {
            HuskError::Format { message } => {
                HuskError::format(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    pub fn write_file(&self, path: &Path) -> Result<(), HuskError> {
        std::fs::write(path, self.to_document())?;
        Ok(())
    }
}

impl fmt::Display for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, constraint)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{path} ({constraint})")?;
        }
        Ok(())
    }
}
