//! Pixelveil - Relative-Difference Image Steganography
//!
//! Hides an arbitrary byte payload inside an RGBA carrier image by nudging
//! color channel values by 1 or 2 in a random direction, and recovers the
//! payload later by diffing the modified image against the original,
//! untouched carrier. Because bits are encoded as *relative* differences,
//! decoding requires the pristine reference image, not just the modified one.
//!
//! ## Embed pipeline
//!
//! ```text
//! Payload → Deflate → MD5 → Frame → AES-256-CBC (optional) → Pixel scatter
//! ```
//!
//! - **Deflate**: raw stream, no zlib/gzip framing
//! - **MD5**: integrity digest over the compressed bytes
//! - **Frame**: version, content type, length, hash, payload
//! - **AES-256-CBC**: PBKDF2-derived key, random IV prefix; an empty key
//!   stores the frame as cleartext with no IV
//! - **Pixel scatter**: each bit lands on a randomly chosen color channel of
//!   a non-transparent pixel, perturbing it by the bit's magnitude
//!
//! Extraction reverses the pipeline from the channel differences of the two
//! images. A digest mismatch is reported as a flag, never an error, so a
//! damaged payload can still be recovered best-effort.
//!
//! ## Example
//!
//! ```no_run
//! use pixelveil::{embed_payload, extract_payload, ContentType};
//!
//! let mut canvas = image::open("carrier.png").unwrap().to_rgba8();
//! let reference = canvas.clone();
//!
//! embed_payload(&mut canvas, b"meet at dawn", ContentType::Text, "password").unwrap();
//! canvas.save("modified.png").unwrap();
//!
//! let decoded = extract_payload(&canvas, &reference, "password").unwrap();
//! assert!(decoded.hash_matches);
//! assert_eq!(decoded.data, b"meet at dawn");
//! ```

pub mod cli;
pub mod container;
pub mod embed;
pub mod error;
pub mod extract;
pub mod pipeline;

pub use container::{decode, encode, ContentType, Decoded, KEY_DEFAULT, VERSION_FORMAT};
pub use embed::{capacity_bytes, embed_payload, embed_payload_with_rng, embed_raw};
pub use error::{PixelveilError, Result};
pub use extract::{extract_payload, extract_raw};
