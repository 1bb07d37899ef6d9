// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed keyfile backend.
//!
//! This is the default backend. A domain's settings live in one keyfile that
//! is read completely when the domain is opened, changed in memory, and
//! written back on [`flush`](ConfigBackend::flush) or when the backend is
//! dropped. Writes go to a temporary file in the same directory which is then
//! renamed over the keyfile, so readers never see a half-written file.
//!
//! There is no locking between processes: if two processes change the same
//! domain, the last one to write wins.

use crate::adapters::domain_path::DomainPaths;
use crate::adapters::keyfile_format::KeyfileFormat;
use crate::domain::{ConfigError, Keyfile, Result};
use crate::ports::{BackendFactory, ConfigBackend};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name the keyfile backend is registered under.
pub const KEYFILE_BACKEND_NAME: &str = "default";

/// Loads the keyfile at `path`.
///
/// A file that does not exist yields an empty keyfile. Any other failure to
/// read it is an error.
///
/// # Examples
///
/// ```rust
/// use mcs::adapters::keyfile_file;
///
/// let keyfile = keyfile_file::open("/nonexistent/path/config").unwrap();
/// assert!(keyfile.is_empty());
/// ```
pub fn open(path: impl AsRef<Path>) -> Result<Keyfile> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No keyfile at '{}', starting empty", path.display());
            return Ok(Keyfile::new());
        }
        Err(e) => return Err(ConfigError::io(path, e)),
    };

    KeyfileFormat::new()
        .parse(BufReader::new(file))
        .map_err(|e| match e {
            ConfigError::IoError(source) => ConfigError::io(path, source),
            other => other,
        })
}

/// Writes `keyfile` to `path`, replacing the file atomically.
///
/// The text is written to a temporary file next to the destination which is
/// renamed over it once complete. If `path` is a symlink the file it points
/// at is replaced and the link is kept. An existing file's permissions are
/// carried over; a new file gets `0666` less the umask, as `open(2)` would
/// give it. On failure the temporary file is removed and the destination is
/// left untouched.
pub fn write(keyfile: &Keyfile, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_atomic(keyfile, path).inspect_err(|e| {
        tracing::warn!("Failed to write keyfile '{}': {}", path.display(), e);
    })
}

fn write_atomic(keyfile: &Keyfile, path: &Path) -> Result<()> {
    let target = resolve_target(path)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = create_temp(dir).map_err(|e| ConfigError::io(dir, e))?;
    {
        let writer = BufWriter::new(temp.as_file_mut());
        KeyfileFormat::new()
            .write(keyfile, writer)
            .map_err(|e| match e {
                ConfigError::IoError(source) => ConfigError::io(temp.path(), source),
                other => other,
            })?;
    }
    temp.as_file()
        .sync_all()
        .map_err(|e| ConfigError::io(temp.path(), e))?;

    if let Ok(metadata) = fs::metadata(&target) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| ConfigError::io(temp.path(), e))?;
    }

    temp.persist(&target)
        .map_err(|e| ConfigError::io(&target, e.error))?;
    tracing::debug!("Wrote keyfile '{}'", target.display());
    Ok(())
}

/// Follows symlinks so the rename lands on the real file.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => match fs::read_link(path) {
            // dangling link: create the file it names
            Ok(link) => Ok(match path.parent() {
                Some(parent) => parent.join(link),
                None => link,
            }),
            Err(_) => Ok(path.to_path_buf()),
        },
        Err(e) => Err(ConfigError::io(path, e)),
    }
}

#[cfg(unix)]
fn create_temp(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn create_temp(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Configuration backend storing one domain in one keyfile.
///
/// Changes are kept in memory until [`flush`](ConfigBackend::flush) is called
/// or the backend is dropped. Dropping writes only if something changed
/// since the last write; a failure at that point is logged.
///
/// # Examples
///
/// ```rust,no_run
/// use mcs::adapters::KeyfileBackend;
/// use mcs::ports::ConfigBackend;
///
/// let mut backend = KeyfileBackend::open("/home/user/.config/app/config").unwrap();
/// backend.set_int("general", "volume", 100).unwrap();
/// backend.flush().unwrap();
/// ```
#[derive(Debug)]
pub struct KeyfileBackend {
    /// Path of the keyfile
    path: PathBuf,
    /// The loaded store
    keyfile: Keyfile,
    /// Whether the store changed since it was last written
    dirty: bool,
}

impl KeyfileBackend {
    /// Loads the keyfile at `path`; a missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let keyfile = open(&path)?;
        tracing::debug!(
            "Opened keyfile '{}' with {} section(s)",
            path.display(),
            keyfile.sections().len()
        );
        Ok(Self {
            path,
            keyfile,
            dirty: false,
        })
    }

    /// Returns the path of the keyfile.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the in-memory store.
    pub fn keyfile(&self) -> &Keyfile {
        &self.keyfile
    }

    /// Returns `true` if there are changes not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl ConfigBackend for KeyfileBackend {
    fn name(&self) -> &str {
        KEYFILE_BACKEND_NAME
    }

    fn get_string(&self, section: &str, key: &str) -> Result<String> {
        self.keyfile
            .get(section, key)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::not_found(section, key))
    }

    fn set_string(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        if self.keyfile.get(section, key) != Some(value) {
            tracing::trace!("Setting {}/{} in '{}'", section, key, self.path.display());
            self.keyfile.set(section, key, value);
            self.dirty = true;
        }
        Ok(())
    }

    fn unset_key(&mut self, section: &str, key: &str) -> Result<()> {
        if self.keyfile.remove(section, key).is_some() {
            tracing::trace!("Removed {}/{} from '{}'", section, key, self.path.display());
            self.dirty = true;
        }
        Ok(())
    }

    fn sections(&self) -> Result<Vec<String>> {
        Ok(self.keyfile.section_names())
    }

    fn keys(&self, section: &str) -> Result<Vec<String>> {
        self.keyfile
            .keys(section)
            .ok_or_else(|| ConfigError::SectionNotFound {
                section: section.to_string(),
            })
    }

    fn flush(&mut self) -> Result<()> {
        write(&self.keyfile, &self.path)?;
        self.dirty = false;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        // a failed final write is reported here, not retried on drop
        self.dirty = false;
        write(&self.keyfile, &self.path)
    }
}

impl Drop for KeyfileBackend {
    fn drop(&mut self) {
        if self.dirty {
            // write() already logs the failure
            let _ = write(&self.keyfile, &self.path);
        }
    }
}

/// Opens [`KeyfileBackend`]s for domains below a configuration home.
#[derive(Debug, Clone)]
pub struct KeyfileBackendFactory {
    paths: DomainPaths,
}

impl KeyfileBackendFactory {
    /// Creates a factory storing domains below `paths`' base directory.
    pub fn new(paths: DomainPaths) -> Self {
        Self { paths }
    }

    /// Creates a factory using the platform configuration directory.
    pub fn from_platform() -> Result<Self> {
        Ok(Self::new(DomainPaths::from_platform()?))
    }

    /// Returns the path resolver.
    pub fn paths(&self) -> &DomainPaths {
        &self.paths
    }
}

impl BackendFactory for KeyfileBackendFactory {
    fn name(&self) -> &str {
        KEYFILE_BACKEND_NAME
    }

    fn open(&self, domain: &str) -> Result<Box<dyn ConfigBackend>> {
        let path = self.paths.ensure_domain_dir(domain)?;
        Ok(Box::new(KeyfileBackend::open(path)?))
    }
}
