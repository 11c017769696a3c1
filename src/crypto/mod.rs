//! Cryptographic primitives for the encrypted container.
//!
//! Provides key derivation, the streaming cipher, and salt generation.

pub mod cipher;
pub mod kdf;

pub use cipher::{decrypt, encrypt};
pub use kdf::{KeyIv, derive};

use crate::error::{Result, StoreError};
use getrandom::fill;

/// Length of the salt (32 bytes, stored in the clear at the start of the file).
pub const SALT_LEN: usize = 32;
/// Length of the encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the initialization vector (16 bytes, one cipher block).
pub const IV_LEN: usize = 16;
/// Cipher block size (AES, 128 bits).
pub const BLOCK_LEN: usize = 16;
/// Fixed PBKDF2 iteration count used for every file.
pub const PBKDF2_ROUNDS: u32 = 50_000;

/// Generates a fresh random salt for one save operation.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    fill(&mut salt).map_err(|_| StoreError::Rng)?;
    Ok(salt)
}
