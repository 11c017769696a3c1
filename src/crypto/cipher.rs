//! AES-256-CFB streaming with PKCS#7 padding on the final block.
//!
//! Both directions process the input in bounded chunks, so payloads of any
//! size pass through without being held in memory at once. The format has no
//! integrity tag: decrypting with the wrong key/IV usually fails at padding
//! removal, but can also succeed and yield garbage plaintext. Callers that
//! need tamper detection must layer it on top.

use aes::Aes256;
use block_padding::{Pkcs7, RawPadding};
use cfb_mode::cipher::KeyIvInit;
use cfb_mode::{BufDecryptor, BufEncryptor};
use std::io::{self, Read, Write};
use zeroize::Zeroizing;

use super::{BLOCK_LEN, KeyIv};
use crate::error::{Result, StoreError};

/// Chunk size for streaming, a multiple of the block size.
const CHUNK_LEN: usize = 64 * 1024;

/// Encrypts everything from `reader` into `writer`.
///
/// The plaintext is padded with PKCS#7, so the ciphertext is always a
/// non-empty multiple of the block size (an empty plaintext produces one
/// full padding block).
pub fn encrypt<R: Read, W: Write>(keys: &KeyIv, mut reader: R, mut writer: W) -> Result<()> {
    let mut enc = BufEncryptor::<Aes256>::new(keys.key().into(), keys.iv().into());
    let mut buf = Zeroizing::new(vec![0u8; CHUNK_LEN]);

    loop {
        let n = read_full(&mut reader, &mut buf)?;
        if n == CHUNK_LEN {
            enc.encrypt(&mut buf[..]);
            writer.write_all(&buf)?;
            continue;
        }

        // final chunk: pad the last, possibly empty, block
        let full = n - n % BLOCK_LEN;
        let padded = full + BLOCK_LEN;
        Pkcs7::raw_pad(&mut buf[full..padded], n - full);

        enc.encrypt(&mut buf[..padded]);
        writer.write_all(&buf[..padded])?;
        return Ok(());
    }
}

/// Decrypts everything from `reader` into `writer`, stripping the padding.
///
/// Fails with [`StoreError::BlockSize`] if the ciphertext is empty or not a
/// multiple of the block size, and with [`StoreError::Padding`] if the final
/// block does not unpad. `writer` may already have received plaintext when an
/// error is reported.
pub fn decrypt<R: Read, W: Write>(keys: &KeyIv, mut reader: R, mut writer: W) -> Result<()> {
    let mut dec = BufDecryptor::<Aes256>::new(keys.key().into(), keys.iv().into());
    let mut buf = Zeroizing::new(vec![0u8; CHUNK_LEN]);

    // The last block is held back until EOF so the padding can be removed.
    let mut tail: Zeroizing<Vec<u8>> = Zeroizing::new(Vec::with_capacity(BLOCK_LEN));
    let mut total: u64 = 0;

    loop {
        let n = read_full(&mut reader, &mut buf)?;
        if n == 0 {
            break;
        }
        total += n as u64;
        dec.decrypt(&mut buf[..n]);

        if tail.len() + n > BLOCK_LEN {
            let emit = tail.len() + n - BLOCK_LEN;
            if emit >= tail.len() {
                writer.write_all(&tail)?;
                let from_buf = emit - tail.len();
                writer.write_all(&buf[..from_buf])?;
                tail.clear();
                tail.extend_from_slice(&buf[from_buf..n]);
            } else {
                writer.write_all(&tail[..emit])?;
                tail.drain(..emit);
                tail.extend_from_slice(&buf[..n]);
            }
        } else {
            tail.extend_from_slice(&buf[..n]);
        }
    }

    if total == 0 || total % BLOCK_LEN as u64 != 0 {
        return Err(StoreError::BlockSize(total));
    }

    let plaintext = Pkcs7::raw_unpad(&tail).map_err(|_| StoreError::Padding)?;
    writer.write_all(plaintext)?;
    Ok(())
}

/// Reads until `buf` is full or the reader hits EOF.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
