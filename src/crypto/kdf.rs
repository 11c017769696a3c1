use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use zeroize::{Zeroize, Zeroizing};

use super::{IV_LEN, KEY_LEN, SALT_LEN};

/// Key material derived from a password and salt.
///
/// Both halves are wiped when the value is dropped.
pub struct KeyIv {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl Drop for KeyIv {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
    }
}

impl KeyIv {
    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

/// Derives a key/IV pair via PBKDF2-HMAC-SHA1.
///
/// A single 48-byte output stream is produced; the key is bytes 0..32 and
/// the IV is bytes 32..48. Files written by tools that read the key and IV
/// sequentially from one derivation stream decrypt with the same split.
///
/// Deterministic: identical `(password, salt, rounds)` always yield the same
/// pair. The derived key is never persisted, only the salt is, so the load
/// path relies on this to reconstruct the cipher parameters.
///
/// # Panics
///
/// Panics if `rounds` is zero.
pub fn derive(password: &[u8], salt: &[u8; SALT_LEN], rounds: u32) -> KeyIv {
    assert!(rounds > 0, "kdf round count must be positive");

    let mut okm = Zeroizing::new([0u8; KEY_LEN + IV_LEN]);
    derive_into(password, salt, rounds, &mut okm[..]);

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&okm[..KEY_LEN]);
    iv.copy_from_slice(&okm[KEY_LEN..]);

    KeyIv { key, iv }
}

fn derive_into(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    pbkdf2_hmac::<Sha1>(password, salt, rounds, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; SALT_LEN];

        let a = derive(b"password", &salt, 1_000);
        let b = derive(b"password", &salt, 1_000);

        assert_eq!(a.key(), b.key());
        assert_eq!(a.iv(), b.iv());
    }

    #[test]
    fn different_salts_give_different_keys() {
        let a = derive(b"password", &[1u8; SALT_LEN], 1_000);
        let b = derive(b"password", &[2u8; SALT_LEN], 1_000);

        assert_ne!(a.key(), b.key());
        assert_ne!(a.iv(), b.iv());
    }

    #[test]
    fn different_passwords_give_different_keys() {
        let salt = [7u8; SALT_LEN];

        let a = derive(b"password", &salt, 1_000);
        let b = derive(b"Password", &salt, 1_000);

        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn round_count_affects_output() {
        let salt = [7u8; SALT_LEN];

        let a = derive(b"pw", &salt, 1_000);
        let b = derive(b"pw", &salt, 2_000);

        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn empty_password_is_allowed() {
        let salt = [0u8; SALT_LEN];
        let a = derive(b"", &salt, 1_000);
        let b = derive(b"", &salt, 1_000);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    #[should_panic(expected = "kdf round count must be positive")]
    fn zero_rounds_panics() {
        derive(b"pw", &[0u8; SALT_LEN], 0);
    }

    #[test]
    fn key_and_iv_are_one_stream() {
        let salt = [9u8; SALT_LEN];
        let pair = derive(b"pw", &salt, 1_000);

        let mut okm = [0u8; KEY_LEN + IV_LEN];
        derive_into(b"pw", &salt, 1_000, &mut okm);

        assert_eq!(pair.key(), &okm[..KEY_LEN]);
        assert_eq!(pair.iv(), &okm[KEY_LEN..]);
    }

    // PBKDF2-HMAC-SHA1 known-answer vectors from RFC 6070.
    #[test]
    fn rfc6070_vectors() {
        let cases: &[(&[u8], &[u8], u32, &str)] = &[
            (
                b"password",
                b"salt",
                1,
                "0c60c80f961f0e71f3a9b524af6012062fe037a6",
            ),
            (
                b"password",
                b"salt",
                2,
                "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957",
            ),
            (
                b"password",
                b"salt",
                4096,
                "4b007901b765489abead49d926f721d065a429c1",
            ),
            (
                b"passwordPASSWORDpassword",
                b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
                4096,
                "3d2eec4fe41c849b80c8d83662c0e44a8b291a964cf2f07038",
            ),
        ];

        for (password, salt, rounds, expected) in cases {
            let expected = hex::decode(expected).unwrap();
            let mut out = vec![0u8; expected.len()];
            derive_into(password, salt, *rounds, &mut out);
            assert_eq!(out, expected);
        }
    }
}
