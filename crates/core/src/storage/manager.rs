use crate::errors::CoreError;
use crate::models::household::Household;

use super::cipher::{self, KdfParams, SealingKey};
use super::envelope::{Envelope, CURRENT_VERSION};

/// Save/load a household to/from encrypted bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Household → bincode → AES-256-GCM(Argon2id(password)) → envelope bytes.
    ///
    /// Every save draws a fresh salt and nonce.
    pub fn save_to_bytes(household: &Household, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_with_params(household, password, KdfParams::default())
    }

    /// As [`save_to_bytes`](Self::save_to_bytes) with explicit KDF costs.
    pub fn save_with_params(
        household: &Household,
        password: &str,
        kdf: KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        kdf.check_bounds()?;
        let plaintext = bincode::serialize(household)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize household: {e}")))?;

        let salt = cipher::random_bytes()?;
        let nonce = cipher::random_bytes()?;
        let key = SealingKey::derive(password, &salt, &kdf)?;
        let ciphertext = key.seal(&plaintext, &nonce)?;

        let bytes = Envelope {
            version: CURRENT_VERSION,
            kdf,
            salt,
            nonce,
            ciphertext: &ciphertext,
        }
        .to_bytes();

        tracing::info!(bytes = bytes.len(), "household sealed");
        Ok(bytes)
    }

    /// Envelope bytes → header → key from password + stored salt/params → decrypt → Household.
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<Household, CoreError> {
        let envelope = Envelope::parse(data)?;
        let key = SealingKey::derive(password, &envelope.salt, &envelope.kdf)?;
        let plaintext = key.open(envelope.ciphertext, &envelope.nonce)?;

        let household: Household = bincode::deserialize(&plaintext).map_err(|e| {
            CoreError::Deserialization(format!("Failed to deserialize household: {e}"))
        })?;

        tracing::info!(version = envelope.version, "household opened");
        Ok(household)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(
        household: &Household,
        path: &str,
        password: &str,
    ) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(household, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Household, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
