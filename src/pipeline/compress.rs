use crate::error::{PixelveilError, Result};
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use md5::{Digest, Md5};
use std::io::{Read, Write};

/// Compress data as a raw deflate stream (no zlib/gzip framing).
///
/// The wire format stores the compressed bytes directly behind a 4-byte
/// length, so the stream must carry no outer header or checksum of its own.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(data)
        .map_err(|e| PixelveilError::Compression(format!("deflate: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| PixelveilError::Compression(format!("deflate: {}", e)))
}

/// Decompress a raw deflate stream produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    DeflateDecoder::new(data)
        .read_to_end(&mut output)
        .map_err(|e| PixelveilError::Decompression(format!("inflate: {}", e)))?;
    Ok(output)
}

/// 128-bit content digest over the compressed bytes.
///
/// The hash covers the compressed form, not the plaintext; the stored digest
/// validates the blob as extracted from the image, before decompression.
pub fn digest(data: &[u8]) -> [u8; 16] {
    Md5::digest(data).into()
}
