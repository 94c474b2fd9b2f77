//! Pixel embedder: writes a framed byte buffer into an RGBA canvas as small
//! relative perturbations of the color channels.
//!
//! Each payload bit occupies one slot: a single R, G, or B channel of a pixel
//! whose alpha is nonzero. Slots are enumerated row-major, channels in R, G, B
//! order. Which slots carry bits is decided by a random scatter with
//! deterministic collision probing; the perturbation direction is random, its
//! magnitude encodes the bit (1 for a 0-bit, 2 for a 1-bit). Decoding reads
//! magnitudes only, so the sign carries no information and exists to avoid a
//! directional bias in the modified image.

use crate::container::{self, ContentType};
use crate::error::{PixelveilError, Result};
use image::RgbaImage;
use rand::Rng;

/// Number of payload bytes an image can hold: one bit per color channel of
/// every non-transparent pixel, rounded down to whole bytes.
pub fn capacity_bytes(canvas: &RgbaImage) -> usize {
    let eligible_pixels = canvas.pixels().filter(|p| p[3] > 0).count();
    eligible_pixels * 3 / 8
}

/// Frame `payload` (compress, hash, optionally encrypt) and embed it into
/// `canvas` using a thread-local RNG.
pub fn embed_payload(
    canvas: &mut RgbaImage,
    payload: &[u8],
    content_type: ContentType,
    key: &str,
) -> Result<()> {
    embed_payload_with_rng(canvas, payload, content_type, key, &mut rand::thread_rng())
}

/// [`embed_payload`] with an explicit RNG, so tests can use a seeded source.
pub fn embed_payload_with_rng<R: Rng>(
    canvas: &mut RgbaImage,
    payload: &[u8],
    content_type: ContentType,
    key: &str,
    rng: &mut R,
) -> Result<()> {
    let frame = container::encode(payload, content_type, key, rng)?;
    embed_raw(canvas, &frame, rng)
}

/// Embed an already-framed byte buffer into `canvas`.
pub fn embed_raw<R: Rng>(canvas: &mut RgbaImage, data: &[u8], rng: &mut R) -> Result<()> {
    let eligible_pixels = canvas.pixels().filter(|p| p[3] > 0).count();
    let eligible_bits = eligible_pixels * 3;

    let available = eligible_bits / 8;
    if data.len() > available {
        return Err(PixelveilError::Capacity {
            needed: data.len(),
            available,
        });
    }

    let locations = scatter_locations(eligible_bits, data.len(), rng);

    let mut data_pos = 0usize;
    let mut bit_pos = 0u8;
    let mut slot = 0usize;
    let (width, height) = canvas.dimensions();
    for y in 0..height {
        for x in 0..width {
            let pixel = canvas.get_pixel_mut(x, y);
            if pixel[3] == 0 {
                continue; // transparent pixels contribute no slots
            }
            for channel in 0..3 {
                let selected = locations[slot];
                slot += 1;
                if !selected {
                    continue;
                }
                let negative = rng.gen::<bool>();
                pixel[channel] = embed_bit(pixel[channel], data[data_pos], bit_pos, negative);
                bit_pos += 1;
                if bit_pos == 8 {
                    bit_pos = 0;
                    data_pos += 1;
                }
            }
        }
    }

    // Unreachable given the capacity check above
    if data_pos < data.len() {
        return Err(PixelveilError::Embed(format!(
            "only {} of {} bytes fit into the carrier",
            data_pos,
            data.len()
        )));
    }
    Ok(())
}

/// Pick `8 * data_len` distinct slots out of `eligible_bits`, one bit at a
/// time. On a collision the probe walks linearly (up for even byte indices,
/// down for odd, wrapping) until a free slot is found, so placement stays
/// random without unbounded retries and is reproducible from the RNG seed.
fn scatter_locations<R: Rng>(eligible_bits: usize, data_len: usize, rng: &mut R) -> Vec<bool> {
    let mut locations = vec![false; eligible_bits];
    for byte_index in 0..data_len {
        for _ in 0..8 {
            let mut index = rng.gen_range(0..eligible_bits);
            while locations[index] {
                index = if byte_index % 2 == 0 {
                    if index + 1 == eligible_bits {
                        0
                    } else {
                        index + 1
                    }
                } else if index == 0 {
                    eligible_bits - 1
                } else {
                    index - 1
                };
            }
            locations[index] = true;
        }
    }
    locations
}

/// Perturb one channel value by the bit at `bit_index` of `byte`:
/// magnitude 1 for a 0-bit, 2 for a 1-bit. The direction is `negative` unless
/// the value sits too close to a bound to move 2 in that direction, which
/// keeps the result in range without clamping.
fn embed_bit(value: u8, byte: u8, bit_index: u8, negative: bool) -> u8 {
    let direction: i16 = if value < 2 {
        1 // no room for -2
    } else if value > 253 {
        -1 // no room for +2
    } else if negative {
        -1
    } else {
        1
    };
    let magnitude: i16 = if byte & (1 << bit_index) != 0 { 2 } else { 1 };
    (i16::from(value) + direction * magnitude) as u8
}
