//! Container codec: the framed byte buffer that gets embedded into pixels.
//!
//! Frame layout (offsets after the optional IV prefix):
//!
//! ```text
//! [IV 16B, only if key non-empty]
//! [version 1B][content type 1B][compressed length u32 LE][MD5 16B][compressed payload]
//! ```

use crate::error::{PixelveilError, Result};
use crate::pipeline::{compress, decompress, decrypt, derive_key, digest, encrypt, generate_iv, IV_LEN};
use rand::Rng;

/// Current frame format version. Decoders accept this version and below.
pub const VERSION_FORMAT: u8 = 0x01;

/// Key used when the caller does not supply one. An explicitly empty key
/// disables encryption instead.
pub const KEY_DEFAULT: &str = "SecureBeneathTheWatchfulEyes";

/// Fixed frame header size: version + content type + length + hash.
const HEADER_LEN: usize = 1 + 1 + 4 + 16;

/// What kind of payload a frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// Unknown tag read from a frame; never produced by the encoder.
    Invalid = 0x00,
    Data = 0x01,
    #[default]
    File = 0x02,
    Text = 0x03,
}

impl ContentType {
    fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => Self::Data,
            0x02 => Self::File,
            0x03 => Self::Text,
            _ => Self::Invalid,
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = PixelveilError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "data" => Ok(Self::Data),
            "file" => Ok(Self::File),
            "text" => Ok(Self::Text),
            _ => Err(PixelveilError::InvalidArgument(format!(
                "content type: {}",
                s
            ))),
        }
    }
}

/// Result of parsing a frame back out of an image.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub content_type: ContentType,
    /// Whether the stored digest matched the extracted compressed bytes.
    /// A mismatch does not abort decoding; the payload is still returned.
    pub hash_matches: bool,
    pub data: Vec<u8>,
}

/// Build the final byte buffer for embedding: compress, frame, and (for a
/// non-empty key) encrypt with a fresh IV drawn from `rng`.
pub fn encode<R: Rng>(
    payload: &[u8],
    content_type: ContentType,
    key: &str,
    rng: &mut R,
) -> Result<Vec<u8>> {
    let compressed = compress(payload)?;
    let hash = digest(&compressed);

    let mut frame = Vec::with_capacity(HEADER_LEN + compressed.len());
    frame.push(VERSION_FORMAT);
    frame.push(content_type as u8);
    frame.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
    frame.extend_from_slice(&hash);
    frame.extend_from_slice(&compressed);

    if key.is_empty() {
        return Ok(frame);
    }

    let iv = generate_iv(rng);
    let ciphertext = encrypt(&derive_key(key), &iv, &frame)?;
    let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Parse a frame recovered from an image.
///
/// With a non-empty key the first 16 bytes are taken as the IV and the rest
/// is decrypted before parsing. A version byte above [`VERSION_FORMAT`] is
/// refused; a digest mismatch only clears `hash_matches` and decompression
/// still runs, so a partially damaged payload can be recovered best-effort.
pub fn decode(raw: &[u8], key: &str) -> Result<Decoded> {
    let decrypted;
    let frame: &[u8] = if key.is_empty() {
        raw
    } else {
        if raw.len() < IV_LEN {
            return Err(PixelveilError::Truncated(format!(
                "need {} bytes for IV, got {}",
                IV_LEN,
                raw.len()
            )));
        }
        let (iv, ciphertext) = raw.split_at(IV_LEN);
        let iv: [u8; IV_LEN] = iv.try_into().expect("split_at returns IV_LEN bytes");
        decrypted = decrypt(&derive_key(key), &iv, ciphertext)?;
        &decrypted
    };

    if frame.len() < HEADER_LEN {
        return Err(PixelveilError::Truncated(format!(
            "frame header needs {} bytes, got {}",
            HEADER_LEN,
            frame.len()
        )));
    }

    let version = frame[0];
    if version > VERSION_FORMAT {
        return Err(PixelveilError::UnsupportedVersion(version));
    }
    let content_type = ContentType::from_byte(frame[1]);
    let length = u32::from_le_bytes(frame[2..6].try_into().expect("4 bytes")) as usize;
    let stored_hash: [u8; 16] = frame[6..22].try_into().expect("16 bytes");

    let rest = &frame[HEADER_LEN..];
    if rest.len() < length {
        return Err(PixelveilError::Truncated(format!(
            "frame declares {} compressed bytes, only {} present",
            length,
            rest.len()
        )));
    }
    let compressed = &rest[..length];

    let hash_matches = digest(compressed) == stored_hash;
    let data = decompress(compressed)?;

    Ok(Decoded {
        content_type,
        hash_matches,
        data,
    })
}
