//! Password-protected storage of serializable values in encrypted files.
//!
//! A [`Saltbox`] turns one in-memory value into one encrypted file and back,
//! using a caller-supplied password. Values pass through a pluggable
//! [`ValueCodec`] (JSON by default), the password is stretched with
//! PBKDF2-HMAC-SHA1 at 50,000 rounds, and the payload is encrypted with
//! AES-256 in CFB mode with PKCS#7 padding.
//!
//! # File format
//!
//! ```text
//! offset 0..31   salt (32 random bytes, fresh per save)
//! offset 32..EOF ciphertext (AES-256-CFB, PKCS#7-padded)
//! ```
//!
//! There is no magic number, version field, or length prefix; the salt is
//! the only metadata and is stored in the clear so the key can be re-derived
//! on load.
//!
//! # Security
//!
//! The format carries no integrity tag: it provides confidentiality only.
//! A tampered file, or the wrong password, is usually caught by padding or
//! deserialization failures, but can also decrypt "successfully" into
//! garbage. Callers that need tamper detection must add it on top.
//!
//! Passwords are taken by value as [`Zeroizing<String>`] and dropped as soon
//! as the key material has been derived, on every path.
//!
//! Concurrent saves (or a concurrent save and load) on the same path are the
//! caller's responsibility: one writer at a time per path.
//!
//! # Example
//!
//! ```no_run
//! use saltbox::Saltbox;
//! use zeroize::Zeroizing;
//!
//! let store = Saltbox::new("tokens.sbx");
//! store.save(Zeroizing::new("secret".into()), &vec!["a".to_string()])?;
//! let tokens: Vec<String> = store.load(Zeroizing::new("secret".into()))?;
//! # Ok::<(), saltbox::StoreError>(())
//! ```

pub mod codec;
pub mod crypto;
mod error;
pub mod ext;
pub mod paths;
mod storage;

pub use crate::codec::{JsonCodec, RawCodec, ValueCodec};
pub use crate::error::{CodecError, Result, StoreError};
pub use crate::storage::Storage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

use crate::crypto::{PBKDF2_ROUNDS, SALT_LEN};

/// One encrypted file holding one logical value.
pub struct Saltbox<C = JsonCodec> {
    storage: Storage,
    codec: C,
}

impl Saltbox<JsonCodec> {
    /// Creates a store at `path` using the default JSON codec.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_codec(path, JsonCodec)
    }
}

impl<C> Saltbox<C> {
    /// Creates a store at `path` with a custom codec.
    pub fn with_codec(path: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            storage: Storage::new(path.into()),
            codec,
        }
    }

    /// Returns the path of the encrypted file.
    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Returns `true` if the encrypted file exists.
    pub fn exists(&self) -> bool {
        self.storage.exists()
    }

    /// Encrypts `value` under `password` and writes it to the file.
    ///
    /// A fresh random salt is generated for every save, so saving the same
    /// value twice never produces identical files. The write is atomic: on
    /// failure the previous file (or nothing) remains at the path.
    pub fn save<T>(&self, password: Zeroizing<String>, value: &T) -> Result<()>
    where
        C: ValueCodec<T>,
    {
        let plaintext = Zeroizing::new(self.codec.serialize(value)?);
        let salt = crypto::generate_salt()?;
        let keys = crypto::derive(password.as_bytes(), &salt, PBKDF2_ROUNDS);
        drop(password);

        self.storage.save_with(|file| {
            file.write_all(&salt)?;
            crypto::encrypt(&keys, &plaintext[..], file)?;
            Ok(())
        })
    }

    /// Reads the file, decrypts it with `password`, and decodes the value.
    ///
    /// Cannot distinguish a wrong password from a corrupted file: both
    /// surface as [`StoreError::Padding`] or a codec error (and a wrong
    /// password can, rarely, decode into a garbage value of the right
    /// shape — the format has no integrity tag).
    pub fn load<T>(&self, password: Zeroizing<String>) -> Result<T>
    where
        C: ValueCodec<T>,
    {
        let mut file = self.storage.open_read()?;

        let mut salt = [0u8; SALT_LEN];
        file.read_exact(&mut salt).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => StoreError::MissingSalt,
            _ => StoreError::Io(e),
        })?;

        let keys = crypto::derive(password.as_bytes(), &salt, PBKDF2_ROUNDS);
        drop(password);

        let mut plaintext = Zeroizing::new(Vec::new());
        crypto::decrypt(&keys, &mut file, &mut *plaintext)?;

        Ok(self.codec.deserialize(&plaintext)?)
    }

    /// Boolean facade over [`save`](Self::save): every error is logged via
    /// the `log` facade and collapsed into `false`.
    pub fn try_save<T>(&self, password: Zeroizing<String>, value: &T) -> bool
    where
        C: ValueCodec<T>,
    {
        match self.save(password, value) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to save {}: {err}", self.path().display());
                false
            }
        }
    }

    /// Boolean facade over [`load`](Self::load): on any error the value is
    /// left at its default and `false` is returned, with the detail logged.
    pub fn try_load<T>(&self, password: Zeroizing<String>) -> (bool, T)
    where
        C: ValueCodec<T>,
        T: Default,
    {
        match self.load(password) {
            Ok(value) => (true, value),
            Err(err) => {
                log::warn!("failed to load {}: {err}", self.path().display());
                (false, T::default())
            }
        }
    }
}

/// Saves `value` to an encrypted file at `path` with the default JSON codec.
///
/// Returns `true` on success; all errors are logged and collapsed.
pub fn try_save_to_file<T>(
    path: impl Into<PathBuf>,
    password: Zeroizing<String>,
    value: &T,
) -> bool
where
    T: Serialize + DeserializeOwned,
{
    Saltbox::new(path).try_save(password, value)
}

/// Loads a value from an encrypted file at `path` with the default JSON
/// codec.
///
/// Returns `(true, value)` on success and `(false, T::default())` on any
/// failure.
pub fn try_load_from_file<T>(path: impl Into<PathBuf>, password: Zeroizing<String>) -> (bool, T)
where
    T: Serialize + DeserializeOwned + Default,
{
    Saltbox::new(path).try_load(password)
}
