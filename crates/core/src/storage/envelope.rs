//! Byte layout of a `.folio` file.
//!
//! ```text
//! [FOLI: 4B] [version: 2B LE]
//! [memory_cost: 4B LE] [time_cost: 4B LE] [parallelism: 4B LE]
//! [salt: 16B] [nonce: 12B] [ciphertext_len: 8B LE]
//! [ciphertext + GCM tag]
//! ```

use crate::errors::CoreError;

use super::cipher::{KdfParams, NONCE_LEN, SALT_LEN};

pub const MAGIC: &[u8; 4] = b"FOLI";

pub const CURRENT_VERSION: u16 = 1;

/// Everything before the ciphertext.
pub const HEADER_LEN: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Parsed header plus a view of the ciphertext.
#[derive(Debug)]
pub struct Envelope<'a> {
    pub version: u16,
    pub kdf: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: &'a [u8],
}

impl<'a> Envelope<'a> {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.kdf.memory_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf.time_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf.parallelism.to_le_bytes());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&(self.ciphertext.len() as u64).to_le_bytes());
        buf.extend_from_slice(self.ciphertext);
        buf
    }

    pub fn parse(data: &'a [u8]) -> Result<Self, CoreError> {
        if data.len() < HEADER_LEN {
            return Err(CoreError::InvalidFileFormat(
                "File too small to be a folio file".into(),
            ));
        }

        let mut reader = Reader { data, pos: 0 };

        if reader.take::<4>() != *MAGIC {
            return Err(CoreError::InvalidFileFormat(
                "Invalid magic bytes: not a folio file".into(),
            ));
        }

        let version = u16::from_le_bytes(reader.take());
        if version == 0 || version > CURRENT_VERSION {
            return Err(CoreError::UnsupportedVersion(version));
        }

        let kdf = KdfParams {
            memory_cost: u32::from_le_bytes(reader.take()),
            time_cost: u32::from_le_bytes(reader.take()),
            parallelism: u32::from_le_bytes(reader.take()),
        };
        kdf.check_bounds()?;

        let salt = reader.take::<SALT_LEN>();
        let nonce = reader.take::<NONCE_LEN>();
        let declared = u64::from_le_bytes(reader.take());

        let remaining = data.len() - reader.pos;
        let ciphertext_len = usize::try_from(declared)
            .ok()
            .filter(|len| *len <= remaining)
            .ok_or_else(|| {
                CoreError::InvalidFileFormat(format!(
                    "File truncated: header declares {declared} bytes of ciphertext, \
                     {remaining} present"
                ))
            })?;

        Ok(Self {
            version,
            kdf,
            salt,
            nonce,
            ciphertext: &data[reader.pos..reader.pos + ciphertext_len],
        })
    }
}

/// Fixed-width cursor over a buffer already known to hold a full header.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        out
    }
}
