use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::CoreError;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const KEY_LEN: usize = 32;

/// Argon2id cost parameters, written into every file header so older files
/// stay readable if the defaults change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Iterations
    pub time_cost: u32,
    /// Lanes
    pub parallelism: u32,
}

impl KdfParams {
    /// Bounds accepted when reading a header. Keeps a crafted file from
    /// asking for gigabytes of memory.
    pub const MEMORY_RANGE: std::ops::RangeInclusive<u32> = 8..=1_048_576;
    pub const TIME_RANGE: std::ops::RangeInclusive<u32> = 1..=20;
    pub const PARALLELISM_RANGE: std::ops::RangeInclusive<u32> = 1..=16;

    pub fn check_bounds(&self) -> Result<(), CoreError> {
        let checks = [
            ("memory_cost", self.memory_cost, &Self::MEMORY_RANGE),
            ("time_cost", self.time_cost, &Self::TIME_RANGE),
            ("parallelism", self.parallelism, &Self::PARALLELISM_RANGE),
        ];
        for (field, value, range) in checks {
            if !range.contains(&value) {
                return Err(CoreError::InvalidFileFormat(format!(
                    "KDF {field} out of range: {value} (expected {}..={})",
                    range.start(),
                    range.end()
                )));
            }
        }
        Ok(())
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 65_536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

/// A password-derived AES-256-GCM key.
pub struct SealingKey {
    key: [u8; KEY_LEN],
}

impl SealingKey {
    /// Derive with Argon2id from `password` and a per-file salt.
    pub fn derive(
        password: &str,
        salt: &[u8; SALT_LEN],
        params: &KdfParams,
    ) -> Result<Self, CoreError> {
        let argon_params = Params::new(
            params.memory_cost,
            params.time_cost,
            params.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| CoreError::Encryption(format!("Invalid Argon2 params: {e}")))?;

        let mut key = [0u8; KEY_LEN];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params)
            .hash_password_into(password.as_bytes(), salt, &mut key)
            .map_err(|e| CoreError::Encryption(format!("Key derivation failed: {e}")))?;

        Ok(Self { key })
    }

    /// Encrypt; the 16-byte GCM tag is appended to the output.
    pub fn seal(&self, plaintext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, CoreError> {
        self.cipher()?
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|e| CoreError::Encryption(format!("Encryption failed: {e}")))
    }

    /// Decrypt and verify the tag. A wrong password and a tampered file look
    /// the same: `CoreError::Decryption`.
    pub fn open(&self, ciphertext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, CoreError> {
        Ok(self.cipher()?.decrypt(Nonce::from_slice(nonce), ciphertext)?)
    }

    fn cipher(&self) -> Result<Aes256Gcm, CoreError> {
        Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))
    }
}

/// Fresh random bytes from the OS (or the browser on wasm).
pub fn random_bytes<const N: usize>() -> Result<[u8; N], CoreError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::Encryption(format!("Random generator unavailable: {e}")))?;
    Ok(buf)
}
