//! Filesystem-backed store
//!
//! Maps each key to one regular file inside the data directory. There
//! is no in-memory index: the directory contents are the source of
//! truth and every request performs a single filesystem operation.
//!
//! No locking is done. The filesystem provides per-syscall atomicity
//! and only one connection is served at a time.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{FileKvError, Result};
use crate::protocol::MAX_FRAME_SIZE;

/// Upper bound on a value returned by [`Store::get`]; longer files are
/// silently truncated to this many bytes.
pub const VALUE_BUFFER_SIZE: usize = MAX_FRAME_SIZE;

/// Filesystem-backed key/value store
#[derive(Debug)]
pub struct Store {
    /// Directory holding one file per key
    root: PathBuf,
}

impl Store {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Store `value` under `key`, truncating any previous contents.
    ///
    /// The backing file is created with mode 0644.
    pub fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_path(key)?;
        let mut file = create_options().open(&path)?;
        file.write_all(value)?;
        Ok(())
    }

    /// Read the value stored under `key`.
    ///
    /// A key whose file cannot be opened, a rejected key, and a
    /// zero-byte file all report [`FileKvError::KeyNotFound`]. At most
    /// [`VALUE_BUFFER_SIZE`] bytes are returned; longer values are
    /// truncated.
    pub fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.key_path(key).map_err(|_| FileKvError::KeyNotFound)?;
        let mut file = File::open(&path).map_err(|_| FileKvError::KeyNotFound)?;

        let mut value = vec![0u8; VALUE_BUFFER_SIZE];
        let len = file.read(&mut value)?;
        if len == 0 {
            return Err(FileKvError::KeyNotFound);
        }
        value.truncate(len);

        tracing::debug!("Read {} bytes for key {:?}", len, key);
        Ok(value)
    }

    /// Remove `key`.
    ///
    /// Every failure reports [`FileKvError::KeyNotFound`] regardless
    /// of the underlying cause.
    pub fn del(&self, key: &str) -> Result<()> {
        let path = self.key_path(key).map_err(|_| FileKvError::KeyNotFound)?;
        fs::remove_file(&path).map_err(|_| FileKvError::KeyNotFound)
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `key` to its backing path.
    ///
    /// The keyspace is confined to the root directory: empty keys,
    /// path separators, and dot components are rejected.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(FileKvError::KeyRejected(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

/// Open options for SET: create, truncate, mode 0644
fn create_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options
}
