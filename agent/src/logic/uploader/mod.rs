//! Secure Uploader
//!
//! Encrypt-and-ship path for CRITICAL files, and the drop notice for JUNK
//! ones. Callers log and move on when either fails; nothing is retried.

pub mod cipher;

use std::path::Path;

use sha2::{Digest, Sha256};

use super::error::AgentError;
use super::link::{ControllerLink, EventKind};

pub use cipher::BlobCipher;

/// Appended to every evacuated file name
pub const BLOB_SUFFIX: &str = ".enc";

#[derive(Debug)]
pub struct SecureUploader {
    cipher: BlobCipher,
}

impl Default for SecureUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureUploader {
    /// New uploader with a fresh session key
    pub fn new() -> Self {
        Self { cipher: BlobCipher::generate() }
    }

    /// Vault name for a local file: `<file name>.enc`
    pub fn blob_name(path: &Path) -> Option<String> {
        path.file_name()
            .map(|n| format!("{}{}", n.to_string_lossy(), BLOB_SUFFIX))
    }

    /// Read, encrypt and send `path`. Returns the blob name on success.
    pub async fn upload<L: ControllerLink>(&self, link: &L, path: &Path) -> Result<String, AgentError> {
        let blob_name = Self::blob_name(path)
            .ok_or_else(|| AgentError::Io(format!("No file name in {}", path.display())))?;

        let plaintext = tokio::fs::read(path).await?;
        let blob = self.cipher.seal(&plaintext)?;
        let digest = hex::encode(Sha256::digest(&blob));

        link.upload_blob(&blob_name, blob).await?;

        log::info!("SECURED: {} -> {} (sha256 {})", path.display(), blob_name, &digest[..16]);
        Ok(blob_name)
    }

    /// Tell the controller a JUNK file was left behind
    pub async fn report_dropped<L: ControllerLink>(&self, link: &L, filename: &str) -> Result<(), AgentError> {
        link.push_event(filename, EventKind::Dropped).await
    }

    #[cfg(test)]
    pub fn cipher(&self) -> &BlobCipher {
        &self.cipher
    }
}
