//! Password-based AES cipher used for settings passwords
//!
//! A payload is the base64 encoding of
//!
//! ```text
//! salt (8 bytes) | pad length (1 byte) | AES-128-CBC ciphertext | padding
//! ```
//!
//! Key and IV are the two halves of `SHA-256(password || salt)`. The trailing
//! padding only rounds the whole buffer up to the 16-byte block size and
//! carries no data.

use aes::Aes128;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

use crate::{DecryptError, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

pub const SALT_SIZE: usize = 8;
const CHUNK_SIZE: usize = 16;
const SPICE_SIZE: usize = 16;

fn key_and_iv(password: &str, salt: &[u8]) -> ([u8; SPICE_SIZE], [u8; SPICE_SIZE]) {
    let digest = Sha256::new()
        .chain_update(password.as_bytes())
        .chain_update(salt)
        .finalize();

    let mut key = [0u8; SPICE_SIZE];
    let mut iv = [0u8; SPICE_SIZE];
    key.copy_from_slice(&digest[..SPICE_SIZE]);
    iv.copy_from_slice(&digest[SPICE_SIZE..SPICE_SIZE * 2]);
    (key, iv)
}

/// Decrypt an undecorated base64 payload with `password`
pub fn decrypt(payload: &str, password: &str) -> Result<String> {
    let bytes = STANDARD.decode(payload.trim())?;
    if bytes.len() <= SALT_SIZE {
        return Err(DecryptError::MalformedToken {
            reason: format!("payload is {} bytes, too short for salt and header", bytes.len()),
        });
    }

    let salt = &bytes[..SALT_SIZE];
    let pad_len = bytes[SALT_SIZE] as usize;
    let end = bytes
        .len()
        .checked_sub(pad_len)
        .filter(|end| *end > SALT_SIZE)
        .ok_or_else(|| DecryptError::MalformedToken {
            reason: format!("pad length {pad_len} exceeds payload"),
        })?;
    let ciphertext = &bytes[SALT_SIZE + 1..end];

    let (key, iv) = key_and_iv(password, salt);
    let clear = Aes128CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| DecryptError::Cipher)?;

    Ok(String::from_utf8(clear)?)
}

/// Encrypt `clear` with `password` and a caller-chosen salt
pub fn encrypt_with_salt(clear: &str, password: &str, salt: [u8; SALT_SIZE]) -> String {
    let (key, iv) = key_and_iv(password, &salt);
    let encrypted =
        Aes128CbcEnc::new(&key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(clear.as_bytes());

    let pad_len = CHUNK_SIZE - (SALT_SIZE + encrypted.len() + 1) % CHUNK_SIZE;
    let mut all = Vec::with_capacity(SALT_SIZE + 1 + encrypted.len() + pad_len);
    all.extend_from_slice(&salt);
    all.push(pad_len as u8);
    all.extend_from_slice(&encrypted);
    all.resize(all.len() + pad_len, 0);

    STANDARD.encode(all)
}

/// Encrypt `clear` with `password` and a random salt
pub fn encrypt(clear: &str, password: &str) -> String {
    encrypt_with_salt(clear, password, rand::random())
}
