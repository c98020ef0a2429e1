use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{Cursor, Read, Write};
use std::path::Path;

use husk_core::source::{check_entry_name, EntryInfo, MetadataProvider, PackageSource};
use husk_core::spec::{Spec, SPEC_FILE_NAME};
use husk_util::errors::HuskError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::package::Package;

/// File extension of package archives.
pub const ARCHIVE_EXT: &str = "husk";

const DEFAULT_MODE: u32 = 0o644;

/// Most bytes [`Archive::read`] will decompress from one container.
pub const MAX_UNPACKED_SIZE: u64 = 256 * 1024 * 1024;

/// One file inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub data: Vec<u8>,
    /// Unix permission bits.
    pub mode: u32,
}

impl Entry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>, mode: u32) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            mode: mode & 0o777,
        }
    }
}

/// An in-memory package archive.
///
/// Entries keep their insertion order; the spec entry is conventionally the
/// last one. Archives are immutable once built.
#[derive(Debug, Clone)]
pub struct Archive {
    entries: Vec<Entry>,
    spec: Spec,
}

impl Archive {
    /// Build an archive from in-memory entries.
    ///
    /// Entry names must be unique, flat file names, and one of them must be
    /// `husk.json`.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, HuskError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            check_entry_name(&entry.name)?;
            if !seen.insert(entry.name.as_str()) {
                return Err(HuskError::format(format!(
                    "Duplicate archive entry {:?}",
                    entry.name
                )));
            }
        }

        let spec_entry = entries
            .iter()
            .rev()
            .find(|e| e.name == SPEC_FILE_NAME)
            .ok_or_else(|| HuskError::format(format!("Archive has no {SPEC_FILE_NAME}")))?;
        let spec = Spec::read_from(spec_entry.data.as_slice())?;

        Ok(Self { entries, spec })
    }

    /// Build an archive from files in `dir`, in the given order, keeping
    /// their permission bits.
    pub fn build(dir: &Path, files: &[String]) -> Result<Self, HuskError> {
        let mut entries = Vec::with_capacity(files.len());
        for name in files {
            check_entry_name(name)?;
            let path = dir.join(name);
            let data = fs::read(&path).map_err(|e| HuskError::Generic {
                message: format!("Can't read {}: {e}", path.display()),
            })?;
            let mode = husk_util::fs::file_mode(&path)?;
            tracing::debug!("Adding {name} ({} bytes, mode {mode:o})", data.len());
            entries.push(Entry::new(name.as_str(), data, mode));
        }
        Self::from_entries(entries)
    }

    /// Parse a zip container held in memory, decompressing at most
    /// [`MAX_UNPACKED_SIZE`] bytes.
    pub fn read(bytes: &[u8]) -> Result<Self, HuskError> {
        Self::read_with_limit(bytes, MAX_UNPACKED_SIZE)
    }

    /// Parse a zip container, failing once the entries together would
    /// decompress to more than `limit` bytes. Declared entry sizes are not
    /// trusted.
    pub fn read_with_limit(bytes: &[u8], limit: u64) -> Result<Self, HuskError> {
        let mut zip = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| HuskError::format(format!("Invalid archive: {e}")))?;

        let mut entries = Vec::new();
        let mut remaining = limit;
        for i in 0..zip.len() {
            let mut file = zip
                .by_index(i)
                .map_err(|e| HuskError::format(format!("Invalid archive entry #{i}: {e}")))?;
            let name = file.name().to_string();
            let too_large = || {
                HuskError::format(format!(
                    "Archive entry {name:?} unpacks to more than {limit} bytes"
                ))
            };
            if file.size() > remaining {
                return Err(too_large());
            }

            let mut data = Vec::new();
            file.by_ref()
                .take(remaining.saturating_add(1))
                .read_to_end(&mut data)
                .map_err(|e| HuskError::format(format!("Can't read {name}: {e}")))?;
            let read = data.len() as u64;
            if read > remaining {
                return Err(too_large());
            }
            remaining -= read;

            let mode = file.unix_mode().unwrap_or(DEFAULT_MODE);
            entries.push(Entry::new(name, data, mode));
        }

        Self::from_entries(entries)
    }

    /// Buffer the whole stream, then parse it.
    pub fn read_from(mut r: impl Read) -> Result<Self, HuskError> {
        let mut bytes = Vec::new();
        r.read_to_end(&mut bytes)?;
        Self::read(&bytes)
    }

    pub fn read_file(path: &Path) -> Result<Self, HuskError> {
        let bytes = fs::read(path)?;
        Self::read(&bytes).map_err(|e| match e {
            HuskError::Format { message } => {
                HuskError::format(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Serialize to a zip container, deflate-compressed, with unix
    /// permission bits stored per entry.
    pub fn to_bytes(&self) -> Result<Vec<u8>, HuskError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &self.entries {
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(entry.mode);
            zip.start_file(entry.name.as_str(), options)
                .map_err(|e| HuskError::format(format!("Can't add {}: {e}", entry.name)))?;
            zip.write_all(&entry.data)?;
        }
        let cursor = zip
            .finish()
            .map_err(|e| HuskError::format(format!("Can't finish archive: {e}")))?;
        Ok(cursor.into_inner())
    }

    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry names in archive order.
    pub fn entry_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Identify the package held in this archive without extracting it.
    pub fn inspect(&self, provider: &dyn MetadataProvider) -> Result<Package, HuskError> {
        let info = provider.inspect(self)?;
        Ok(Package::new(self.spec.clone(), info))
    }

    /// Extract every entry into `target`, keeping permission bits.
    ///
    /// Without `overwrite`, an existing file stops the extraction. The first
    /// failure aborts; files written before it stay on disk.
    pub fn write(&self, target: &Path, overwrite: bool) -> Result<(), HuskError> {
        husk_util::fs::ensure_dir(target)?;
        for entry in &self.entries {
            let path = target.join(&entry.name);
            let mut options = OpenOptions::new();
            options.write(true);
            if overwrite {
                options.create(true).truncate(true);
            } else {
                options.create_new(true);
            }
            let mut file = options.open(&path).map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => HuskError::Generic {
                    message: format!("{} already exists", path.display()),
                },
                _ => HuskError::Io(e),
            })?;
            file.write_all(&entry.data)?;
            drop(file);
            husk_util::fs::set_file_mode(&path, entry.mode)?;
        }
        Ok(())
    }
}

impl PackageSource for Archive {
    fn list_entries(&self) -> Result<Vec<EntryInfo>, HuskError> {
        let mut infos: Vec<EntryInfo> = self
            .entries
            .iter()
            .map(|e| EntryInfo {
                name: e.name.clone(),
                size: e.data.len() as u64,
                mode: e.mode,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    fn open_entry(&self, name: &str) -> Result<Vec<u8>, HuskError> {
        self.entry(name)
            .map(|e| e.data.clone())
            .ok_or_else(|| HuskError::format(format!("No entry {name:?} in archive")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_json() -> Vec<u8> {
        br#"{"Version": "1.0.0", "Vendor": "acme"}"#.to_vec()
    }

    #[test]
    fn spec_found_scanning_from_end() {
        let archive = Archive::from_entries(vec![
            Entry::new("a.go", "package a\n", 0o644),
            Entry::new(SPEC_FILE_NAME, spec_json(), 0o644),
        ])
        .unwrap();
        assert_eq!(archive.spec().vendor, "acme");
    }

    #[test]
    fn missing_spec_names_it() {
        let err = Archive::from_entries(vec![Entry::new("a.go", "", 0o644)]).unwrap_err();
        assert!(err.to_string().contains(SPEC_FILE_NAME));
    }

    #[test]
    fn duplicate_and_nested_names_rejected() {
        let dup = Archive::from_entries(vec![
            Entry::new(SPEC_FILE_NAME, spec_json(), 0o644),
            Entry::new(SPEC_FILE_NAME, spec_json(), 0o644),
        ]);
        assert!(dup.is_err());
        for name in ["dir/a.go", "..", "a\\b"] {
            let nested = Archive::from_entries(vec![
                Entry::new(name, "", 0o644),
                Entry::new(SPEC_FILE_NAME, spec_json(), 0o644),
            ]);
            assert!(nested.is_err(), "{name}");
        }
    }

    #[test]
    fn entry_mode_is_masked() {
        assert_eq!(Entry::new("x", "", 0o100755).mode, 0o755);
    }

    #[test]
    fn garbage_is_a_format_error() {
        let err = Archive::read(b"not a zip").unwrap_err();
        assert!(matches!(err, HuskError::Format { .. }));
    }
}
