use crate::error::{PixelveilError, Result};
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use rand::Rng;
use sha1::Sha1;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// CBC initialization vector length in bytes (AES block size).
pub const IV_LEN: usize = 16;
/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count. Part of the wire format: changing it breaks
/// decryption of existing images.
const KDF_ITERATIONS: u32 = 4854;

/// Application-wide KDF salt, identical across all installations.
/// Deliberately constant rather than per-file; confidentiality rests on the
/// password alone.
const SALT: &[u8] = b"Arguing that you don't care about the right to privacy \
because you have nothing to hide is no different than saying you don't care \
about free speech because you have nothing to say.";

/// Derive a 256-bit AES key from a password via PBKDF2-HMAC-SHA1 over the
/// fixed application salt.
pub fn derive_key(password: &str) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha1>(password.as_bytes(), SALT, KDF_ITERATIONS, &mut key);
    key
}

/// Draw a fresh random IV. One per embed operation, transmitted cleartext
/// as the frame prefix.
pub fn generate_iv<R: Rng>(rng: &mut R) -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    rng.fill(&mut iv[..]);
    iv
}

/// Encrypt a frame with AES-256-CBC and PKCS#7 padding.
pub fn encrypt(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| PixelveilError::Decryption(format!("bad key/iv length: {}", e)))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt a frame with AES-256-CBC. Fails on truncated input or invalid
/// padding, which is the usual symptom of a wrong password.
pub fn decrypt(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| PixelveilError::Decryption(format!("bad key/iv length: {}", e)))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| PixelveilError::Decryption("invalid padding".into()))
}
