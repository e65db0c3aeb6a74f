//! Blob encryption (AES-256-GCM)
//!
//! Output format: version (1 byte) || nonce (12 bytes) || ciphertext || tag (16 bytes)

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm,
};

use crate::logic::error::AgentError;

pub const BLOB_VERSION: u8 = 1;
pub const NONCE_LEN: usize = 12;
#[cfg(test)]
pub const TAG_LEN: usize = 16;

/// Holds the agent's session key. The key is generated in memory and never
/// leaves this struct.
pub struct BlobCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for BlobCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BlobCipher { .. }")
    }
}

impl BlobCipher {
    /// Fresh random key
    pub fn generate() -> Self {
        let key = Aes256Gcm::generate_key(&mut OsRng);
        Self { cipher: Aes256Gcm::new(&key) }
    }

    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, AgentError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self.cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| AgentError::Crypto)?;

        let mut blob = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
        blob.push(BLOB_VERSION);
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    #[cfg(test)]
    pub fn open(&self, blob: &[u8]) -> Result<Vec<u8>, AgentError> {
        if blob.len() < 1 + NONCE_LEN + TAG_LEN || blob[0] != BLOB_VERSION {
            return Err(AgentError::Crypto);
        }
        let nonce = aes_gcm::Nonce::from_slice(&blob[1..1 + NONCE_LEN]);
        self.cipher
            .decrypt(nonce, &blob[1 + NONCE_LEN..])
            .map_err(|_| AgentError::Crypto)
    }
}
