use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use husk_util::errors::HuskError;
use serde::{Deserialize, Serialize};

/// Prefix under which short references (`vendor/name`) are installed.
pub const DEFAULT_PREFIX: &str = "husk.dev";

/// Host serving the default prefix.
pub const DEFAULT_HOST: &str = "www.husk.dev";

/// Overrides the host of the default prefix.
pub const SERVER_ENV: &str = "HUSK_SERVER";

/// Overrides the configured workspace directory.
pub const WORKSPACE_ENV: &str = "HUSK_WORKSPACE";

/// Global user configuration loaded from `~/.husk/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Token sent with `husk publish`.
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub debug: bool,

    /// Workspace root holding `src/` and `husk/`.
    #[serde(default)]
    pub workspace: Option<PathBuf>,

    /// Host receiving published archives.
    #[serde(default)]
    pub server: Option<String>,

    /// Command run after each install, with the import path appended.
    #[serde(default, rename = "build-command")]
    pub build_command: Vec<String>,

    /// Extra prefix to host mappings, on top of the default prefix.
    #[serde(default)]
    pub prefixes: BTreeMap<String, String>,
}

impl GlobalConfig {
    /// Load the global configuration from `~/.husk/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| HuskError::Generic {
            message: format!("Failed to read global config: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| {
            HuskError::Generic {
                message: format!("Failed to parse global config {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Prefix map from this configuration and the process environment.
    pub fn import_prefixes(&self) -> ImportPrefixes {
        self.import_prefixes_with(std::env::var(SERVER_ENV).ok().as_deref())
    }

    /// Prefix map with an explicit default-host override.
    pub fn import_prefixes_with(&self, server_override: Option<&str>) -> ImportPrefixes {
        let mut prefixes = ImportPrefixes::default();
        for (prefix, host) in &self.prefixes {
            prefixes.insert(prefix, host);
        }
        if let Some(host) = server_override.filter(|h| !h.is_empty()) {
            prefixes.insert(DEFAULT_PREFIX, host);
        }
        prefixes
    }

    /// Workspace root: `HUSK_WORKSPACE` wins over the `workspace` setting.
    pub fn workspace_dir(&self) -> Result<PathBuf, HuskError> {
        self.workspace_dir_with(std::env::var_os(WORKSPACE_ENV).map(PathBuf::from))
    }

    pub fn workspace_dir_with(&self, env_override: Option<PathBuf>) -> Result<PathBuf, HuskError> {
        env_override
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| self.workspace.clone())
            .ok_or_else(|| HuskError::Workspace {
                message: format!("no workspace configured (set {WORKSPACE_ENV})"),
            })
    }

    /// Host receiving published archives: `server`, else the default prefix's host.
    pub fn publish_server(&self, prefixes: &ImportPrefixes) -> String {
        self.server
            .clone()
            .unwrap_or_else(|| prefixes.default_host().to_string())
    }
}

/// Returns the path to the husk data directory (`~/.husk/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".husk")
}

/// Mapping from import prefix (`husk.dev`) to the host serving it
/// (`www.husk.dev`).
///
/// Built once per invocation and passed to whatever needs to turn a
/// reference into a URL or decide whether an import is managed by husk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPrefixes {
    default_prefix: String,
    hosts: BTreeMap<String, String>,
}

impl Default for ImportPrefixes {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_HOST)
    }
}

impl ImportPrefixes {
    pub fn new(default_prefix: &str, default_host: &str) -> Self {
        let mut hosts = BTreeMap::new();
        hosts.insert(default_prefix.to_string(), default_host.to_string());
        Self {
            default_prefix: default_prefix.to_string(),
            hosts,
        }
    }

    /// Add or replace the host for `prefix`.
    pub fn insert(&mut self, prefix: &str, host: &str) {
        self.hosts.insert(
            prefix.trim_end_matches('/').to_string(),
            host.to_string(),
        );
    }

    pub fn default_prefix(&self) -> &str {
        &self.default_prefix
    }

    pub fn default_host(&self) -> &str {
        self.hosts
            .get(&self.default_prefix)
            .map(String::as_str)
            .unwrap_or(DEFAULT_HOST)
    }

    pub fn host(&self, prefix: &str) -> Option<&str> {
        self.hosts.get(prefix).map(String::as_str)
    }

    /// The known prefix `import_path` lives under, if any.
    ///
    /// The longest matching prefix wins, so `husk.dev/mirror` can be mapped
    /// separately from `husk.dev`.
    pub fn prefix_of(&self, import_path: &str) -> Option<&str> {
        self.hosts
            .keys()
            .filter(|prefix| {
                import_path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|prefix| prefix.len())
            .map(String::as_str)
    }

    pub fn is_managed(&self, import_path: &str) -> bool {
        self.prefix_of(import_path).is_some()
    }

    /// Only the imports served by a known prefix, order preserved.
    pub fn managed<'a>(&self, imports: impl IntoIterator<Item = &'a String>) -> Vec<String> {
        imports
            .into_iter()
            .filter(|import| self.is_managed(import))
            .cloned()
            .collect()
    }
}
