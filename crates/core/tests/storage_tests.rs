// ═══════════════════════════════════════════════════════════════════
// Storage Tests — KDF params, sealing key, envelope, StorageManager
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal::Decimal;

use folio_core::errors::CoreError;
use folio_core::models::budget::Budget;
use folio_core::models::household::Household;
use folio_core::models::item::FinancialItem;
use folio_core::models::loan::LoanReceivable;
use folio_core::models::ownership::{Allocation, Ownership, Perspective};
use folio_core::models::transaction::Transaction;
use folio_core::storage::cipher::{self, KdfParams, SealingKey, NONCE_LEN, SALT_LEN};
use folio_core::storage::envelope::{Envelope, CURRENT_VERSION, HEADER_LEN, MAGIC};
use folio_core::storage::manager::StorageManager;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Cheap Argon2 settings so the suite stays fast.
fn fast() -> KdfParams {
    KdfParams {
        memory_cost: 64,
        time_cost: 1,
        parallelism: 1,
    }
}

fn sample_household() -> Household {
    let mut h = Household::new();
    h.assets.push(
        FinancialItem::asset("Plot", dec("1250000.50"), "Real Estate").with_ownership(
            Ownership::partial(vec![
                Allocation::holder(dec("40")),
                Allocation::new("m1", "Asha", dec("60")),
            ]),
        ),
    );
    h.liabilities
        .push(FinancialItem::liability("Card", dec("18000"), "Credit Card"));
    h.loans
        .push(LoanReceivable::new("Ravi", dec("50000"), d(2025, 1, 10)));
    h.budgets.push(Budget::new("Food", dec("12000")).with_id("b1"));
    h.transactions
        .push(Transaction::new("Veg", dec("450"), d(2025, 3, 2)).in_category("b1"));
    h.income = dec("85000");
    h.settings.default_perspective = Perspective::Personal;
    h
}

// ═══════════════════════════════════════════════════════════════════
// KdfParams
// ═══════════════════════════════════════════════════════════════════

mod kdf_params {
    use super::*;

    #[test]
    fn default_values() {
        let p = KdfParams::default();
        assert_eq!(p.memory_cost, 65_536);
        assert_eq!(p.time_cost, 3);
        assert_eq!(p.parallelism, 4);
        assert!(p.check_bounds().is_ok());
    }

    #[test]
    fn out_of_range_is_invalid_format() {
        let p = KdfParams {
            memory_cost: 4_000_000,
            ..KdfParams::default()
        };
        let err = p.check_bounds().unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(ref m) if m.contains("memory_cost")));

        let p = KdfParams {
            parallelism: 0,
            ..KdfParams::default()
        };
        assert!(p.check_bounds().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// SealingKey
// ═══════════════════════════════════════════════════════════════════

mod sealing_key {
    use super::*;

    #[test]
    fn seal_then_open() {
        let salt = [7u8; SALT_LEN];
        let nonce = [9u8; NONCE_LEN];
        let key = SealingKey::derive("hunter2", &salt, &fast()).unwrap();
        let sealed = key.seal(b"household", &nonce).unwrap();
        assert_ne!(&sealed[..], b"household");
        assert_eq!(key.open(&sealed, &nonce).unwrap(), b"household");
    }

    #[test]
    fn wrong_password_fails_to_open() {
        let salt = [1u8; SALT_LEN];
        let nonce = [2u8; NONCE_LEN];
        let sealed = SealingKey::derive("right", &salt, &fast())
            .unwrap()
            .seal(b"data", &nonce)
            .unwrap();
        let err = SealingKey::derive("wrong", &salt, &fast())
            .unwrap()
            .open(&sealed, &nonce)
            .unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn random_bytes_differ() {
        let a: [u8; SALT_LEN] = cipher::random_bytes().unwrap();
        let b: [u8; SALT_LEN] = cipher::random_bytes().unwrap();
        assert_ne!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Envelope
// ═══════════════════════════════════════════════════════════════════

mod envelope {
    use super::*;

    fn sample_bytes() -> Vec<u8> {
        Envelope {
            version: CURRENT_VERSION,
            kdf: fast(),
            salt: [3u8; SALT_LEN],
            nonce: [4u8; NONCE_LEN],
            ciphertext: b"0123456789",
        }
        .to_bytes()
    }

    #[test]
    fn layout() {
        let bytes = sample_bytes();
        assert_eq!(bytes.len(), HEADER_LEN + 10);
        assert_eq!(&bytes[..4], MAGIC);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), CURRENT_VERSION);
    }

    #[test]
    fn parse_reads_header_back() {
        let bytes = sample_bytes();
        let env = Envelope::parse(&bytes).unwrap();
        assert_eq!(env.version, CURRENT_VERSION);
        assert_eq!(env.kdf, fast());
        assert_eq!(env.salt, [3u8; SALT_LEN]);
        assert_eq!(env.nonce, [4u8; NONCE_LEN]);
        assert_eq!(env.ciphertext, b"0123456789");
    }

    #[test]
    fn too_small() {
        let err = Envelope::parse(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn bad_magic() {
        let mut bytes = sample_bytes();
        bytes[0] = b'X';
        let err = Envelope::parse(&bytes).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn future_version() {
        let mut bytes = sample_bytes();
        bytes[4..6].copy_from_slice(&(CURRENT_VERSION + 1).to_le_bytes());
        let err = Envelope::parse(&bytes).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVersion(v) if v == CURRENT_VERSION + 1));
    }

    #[test]
    fn hostile_kdf_rejected() {
        let mut bytes = sample_bytes();
        bytes[6..10].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = Envelope::parse(&bytes).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn truncated_ciphertext() {
        let bytes = sample_bytes();
        let err = Envelope::parse(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(ref m) if m.contains("truncated")));
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    #[test]
    fn bytes_round_trip() {
        let h = sample_household();
        let bytes = StorageManager::save_with_params(&h, "pw", fast()).unwrap();
        let back = StorageManager::load_from_bytes(&bytes, "pw").unwrap();
        assert_eq!(back, h);
        assert_eq!(back.assets[0].value, dec("1250000.50"));
    }

    #[test]
    fn every_save_uses_fresh_salt_and_nonce() {
        let h = sample_household();
        let a = StorageManager::save_with_params(&h, "pw", fast()).unwrap();
        let b = StorageManager::save_with_params(&h, "pw", fast()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_password() {
        let bytes = StorageManager::save_with_params(&sample_household(), "pw", fast()).unwrap();
        let err = StorageManager::load_from_bytes(&bytes, "not-pw").unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn tampered_ciphertext() {
        let mut bytes =
            StorageManager::save_with_params(&sample_household(), "pw", fast()).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let err = StorageManager::load_from_bytes(&bytes, "pw").unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn invalid_params_refused_on_save() {
        let err = StorageManager::save_with_params(
            &Household::new(),
            "pw",
            KdfParams {
                time_cost: 0,
                ..fast()
            },
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("family.folio");
        let path = path.to_str().unwrap();

        let h = sample_household();
        StorageManager::save_to_file(&h, path, "pw").unwrap();
        let back = StorageManager::load_from_file(path, "pw").unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.folio");
        let err = StorageManager::load_from_file(path.to_str().unwrap(), "pw").unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }
}
