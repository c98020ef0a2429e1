//! Package sources and the metadata derived from them.
//!
//! A [`PackageSource`] is a flat set of named files. It is implemented by a
//! real directory ([`DirSource`]) and by an in-memory archive, so a
//! [`MetadataProvider`] can identify a package the same way in both cases
//! without extracting anything.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::LazyLock;

use husk_util::errors::HuskError;
use regex::Regex;

/// One file of a package source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub size: u64,
    /// Unix permission bits.
    pub mode: u32,
}

/// Read access to the files of a package, directory or archive alike.
pub trait PackageSource {
    /// All entries, sorted by name.
    fn list_entries(&self) -> Result<Vec<EntryInfo>, HuskError>;

    /// The full contents of the named entry.
    fn open_entry(&self, name: &str) -> Result<Vec<u8>, HuskError>;
}

/// Reject names that would escape a flat package directory.
pub fn check_entry_name(name: &str) -> Result<(), HuskError> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(HuskError::format(format!(
            "Invalid entry name {name:?}: packages are flat file sets"
        )));
    }
    Ok(())
}

/// A package directory on disk. Only regular files directly inside it are
/// entries.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PackageSource for DirSource {
    fn list_entries(&self) -> Result<Vec<EntryInfo>, HuskError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
                continue;
            };
            entries.push(EntryInfo {
                size: meta.len(),
                mode: husk_util::fs::file_mode(&entry.path())?,
                name,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn open_entry(&self, name: &str) -> Result<Vec<u8>, HuskError> {
        check_entry_name(name)?;
        Ok(std::fs::read(self.root.join(name))?)
    }
}

/// What a metadata provider learns about a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    /// First sentence of the package documentation.
    pub doc: String,
    /// Imports of non-test sources, sorted and unique.
    pub imports: Vec<String>,
    /// Imports of test sources, sorted and unique.
    pub test_imports: Vec<String>,
    pub source_files: Vec<String>,
    pub test_files: Vec<String>,
    pub naming_errors: Vec<String>,
}

impl PackageInfo {
    /// Imports of sources and tests together, sorted and unique.
    pub fn all_imports(&self) -> Vec<String> {
        self.imports
            .iter()
            .chain(&self.test_imports)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Derives [`PackageInfo`] from a package source.
pub trait MetadataProvider {
    fn inspect(&self, source: &dyn PackageSource) -> Result<PackageInfo, HuskError>;
}

/// Naming diagnostics for a package name and its documentation summary.
pub fn check_package(name: &str, doc: &str) -> Vec<String> {
    let mut issues = Vec::new();

    if name.to_lowercase() != name {
        issues.push("Package name should be lower case.".to_string());
    }
    if name.starts_with('_') {
        issues.push(r#"Package name should not start with "_"."#.to_string());
    }
    if name.ends_with('_') {
        issues.push(r#"Package name should not end with "_"."#.to_string());
    }
    if name.ends_with("_test") {
        issues.push(r#"Package name should not end with "_test"."#.to_string());
    }

    let summary = Regex::new(&format!(r"Package {} .+\.", regex::escape(name)));
    if !summary.is_ok_and(|re| re.is_match(doc)) {
        issues.push(format!(
            r#"Package summary in code should be in form "Package {name} ... ."."#
        ));
    }

    issues
}

const SOURCE_EXT: &str = ".go";
const TEST_SUFFIX: &str = "_test.go";

static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^package\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex"));
static SINGLE_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:[A-Za-z_.][A-Za-z0-9_]*\s+)?"([^"]+)""#).expect("valid regex")
});
static GROUP_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)^\s*import\s*\((.*?)\)").expect("valid regex"));
static GROUP_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:[A-Za-z_.][A-Za-z0-9_]*\s+)?"([^"]+)""#).expect("valid regex")
});
static DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(func|type|var|const)\b").expect("valid regex"));

/// Whether `name` is a source file the scanner reads (tests included).
pub fn is_source_file(name: &str) -> bool {
    name.ends_with(SOURCE_EXT) && !name.starts_with('_') && !name.starts_with('.')
}

/// Metadata provider for Go-style source packages.
///
/// Reads the package clause, the doc comment directly above it and the
/// import declarations of every `*.go` entry. `*_test.go` entries are test
/// sources; entries starting with `_` or `.` are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceScanner;

#[derive(Debug, Default, PartialEq, Eq)]
struct SourceFile {
    package: String,
    doc: String,
    imports: Vec<String>,
}

impl MetadataProvider for SourceScanner {
    fn inspect(&self, source: &dyn PackageSource) -> Result<PackageInfo, HuskError> {
        let mut info = PackageInfo::default();
        let mut imports = BTreeSet::new();
        let mut test_imports = BTreeSet::new();

        for entry in source.list_entries()? {
            let name = entry.name;
            if !is_source_file(&name) {
                continue;
            }
            let bytes = source.open_entry(&name)?;
            let parsed = scan_source(&String::from_utf8_lossy(&bytes))
                .map_err(|e| HuskError::format(format!("{name}: {e}")))?;

            if name.ends_with(TEST_SUFFIX) {
                test_imports.extend(parsed.imports);
                info.test_files.push(name);
                continue;
            }

            if info.name.is_empty() {
                info.name = parsed.package;
            } else if info.name != parsed.package {
                return Err(HuskError::format(format!(
                    "Found packages {} and {} in one directory ({name})",
                    info.name, parsed.package
                )));
            }
            if info.doc.is_empty() {
                info.doc = parsed.doc;
            }
            imports.extend(parsed.imports);
            info.source_files.push(name);
        }

        if info.source_files.is_empty() {
            return Err(HuskError::format("No buildable source files in package"));
        }

        info.imports = imports.into_iter().collect();
        info.test_imports = test_imports.into_iter().collect();
        info.naming_errors = check_package(&info.name, &info.doc);
        tracing::debug!(
            "Scanned package {} ({} sources, {} imports)",
            info.name,
            info.source_files.len(),
            info.imports.len()
        );
        Ok(info)
    }
}

fn scan_source(text: &str) -> Result<SourceFile, String> {
    let mut comment: Vec<String> = Vec::new();
    let mut in_block = false;
    let mut offset = 0;
    let mut package = None;

    for line in text.split_inclusive('\n') {
        offset += line.len();
        let trimmed = line.trim();

        if in_block {
            match trimmed.split_once("*/") {
                Some((body, _)) => {
                    comment.push(strip_block_line(body));
                    in_block = false;
                }
                None => comment.push(strip_block_line(trimmed)),
            }
            continue;
        }

        if trimmed.is_empty() {
            comment.clear();
        } else if let Some(body) = trimmed.strip_prefix("//") {
            comment.push(body.trim().to_string());
        } else if let Some(body) = trimmed.strip_prefix("/*") {
            match body.split_once("*/") {
                Some((inner, _)) => comment.push(inner.trim().to_string()),
                None => {
                    comment.push(body.trim().to_string());
                    in_block = true;
                }
            }
        } else if let Some(caps) = PACKAGE_RE.captures(trimmed) {
            package = Some(caps[1].to_string());
            break;
        } else {
            return Err(format!("expected package clause, found {trimmed:?}"));
        }
    }

    let package = package.ok_or_else(|| "missing package clause".to_string())?;
    let doc = synopsis(&comment.join(" "));

    let rest = &text[offset..];
    let header = match DECL_RE.find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    };

    let mut imports: Vec<String> = SINGLE_IMPORT_RE
        .captures_iter(header)
        .map(|c| c[1].to_string())
        .collect();
    for group in GROUP_IMPORT_RE.captures_iter(header) {
        imports.extend(GROUP_LINE_RE.captures_iter(&group[1]).map(|c| c[1].to_string()));
    }

    Ok(SourceFile {
        package,
        doc,
        imports,
    })
}

fn strip_block_line(line: &str) -> String {
    line.trim().trim_start_matches('*').trim().to_string()
}

/// First sentence of `text` with whitespace collapsed.
fn synopsis(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.find(". ") {
        Some(end) => collapsed[..=end].to_string(),
        None => collapsed,
    }
}
