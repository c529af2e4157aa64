//! File-backed seed store.

use super::{Seed, SeedStore, StoreError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Default location of the seed file, relative to the working directory.
pub const DEFAULT_SEED_PATH: &str = "seed.dat";

/// Persists the seed as 32 raw bytes in a single file.
///
/// There is no header, version tag or checksum. Writes go to a sibling
/// temporary file which is then renamed over the target, so a crash never
/// leaves a truncated record behind.
#[derive(Debug, Clone)]
pub struct FileSeedStore {
    path: PathBuf,
}

impl FileSeedStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the seed file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileSeedStore {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_PATH)
    }
}

impl SeedStore for FileSeedStore {
    fn read_seed(&mut self) -> Result<Option<Seed>, StoreError> {
        let mut bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let seed = Seed::try_from(bytes.as_slice()).map_err(|len| StoreError::Malformed { len });
        zeroize::Zeroize::zeroize(&mut bytes);
        seed.map(Some)
    }

    fn save_seed(&mut self, seed: &Seed) -> Result<(), StoreError> {
        let temp = self.temp_path();

        let mut file = open_private(&temp).map_err(|e| self.write_error(e))?;
        file.write_all(seed.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| self.write_error(e))?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(|e| self.write_error(e))?;

        tracing::debug!(path = %self.path.display(), "Seed persisted");
        Ok(())
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
