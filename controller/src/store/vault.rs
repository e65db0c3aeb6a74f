//! Vault - durable store of opaque encrypted blobs
//!
//! One file per blob under the vault directory. Writes land in a temporary
//! sibling first and are renamed into place, so readers only ever see a
//! complete blob. The vault never decrypts anything.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::BlobInspection;

/// Suffix marking ciphertext blobs
pub const CIPHERTEXT_SUFFIX: &str = ".enc";

/// Number of leading bytes exposed by `inspect`
pub const INSPECT_PREFIX_LEN: usize = 500;

const PARTIAL_PREFIX: &str = ".partial-";

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("invalid blob name: {0:?}")]
    InvalidName(String),

    #[error("blob not found: {0}")]
    NotFound(String),

    #[error("vault I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug)]
pub struct VaultStore {
    root: PathBuf,
    partial_seq: AtomicU64,
}

impl VaultStore {
    /// Open (and create if needed) the vault directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            partial_seq: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write or overwrite `name`. Returns the stored size.
    pub fn put(&self, name: &str, bytes: &[u8]) -> Result<u64, VaultError> {
        let dest = self.blob_path(name)?;
        let seq = self.partial_seq.fetch_add(1, Ordering::Relaxed);
        let partial = self.root.join(format!("{}{}-{}", PARTIAL_PREFIX, seq, name));

        if let Err(e) = write_synced(&partial, bytes).and_then(|_| fs::rename(&partial, &dest)) {
            let _ = fs::remove_file(&partial);
            return Err(e.into());
        }

        tracing::debug!("Vault stored {} ({} bytes)", name, bytes.len());
        Ok(bytes.len() as u64)
    }

    /// Names of all ciphertext blobs, sorted
    pub fn list(&self) -> Result<Vec<String>, VaultError> {
        let mut names = Vec::new();
        let Some(entries) = read_root(&self.root)? else {
            return Ok(names);
        };
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(CIPHERTEXT_SUFFIX) && !name.starts_with(PARTIAL_PREFIX) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Size, hex prefix and digest of a stored blob
    pub fn inspect(&self, name: &str) -> Result<BlobInspection, VaultError> {
        let path = self.blob_path(name)?;
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => VaultError::NotFound(name.to_string()),
            _ => VaultError::Io(e),
        })?;

        let prefix = &bytes[..bytes.len().min(INSPECT_PREFIX_LEN)];

        Ok(BlobInspection {
            name: name.to_string(),
            hex: hex::encode(prefix),
            size: bytes.len() as u64,
            sha256: hex::encode(Sha256::digest(&bytes)),
        })
    }

    /// Delete every file in the vault. Returns the number removed.
    pub fn clear(&self) -> Result<usize, VaultError> {
        let mut removed = 0;
        let Some(entries) = read_root(&self.root)? else {
            return Ok(removed);
        };
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn blob_path(&self, name: &str) -> Result<PathBuf, VaultError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

/// Blob names are a single plain path component
fn validate_name(name: &str) -> Result<(), VaultError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.starts_with(PARTIAL_PREFIX)
        || name.contains(['/', '\\', '\0']);

    if bad {
        Err(VaultError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// `None` when the vault directory has gone missing
fn read_root(root: &Path) -> io::Result<Option<fs::ReadDir>> {
    match fs::read_dir(root) {
        Ok(entries) => Ok(Some(entries)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
