use crate::cli::OutputOptions;
use crate::container::{ContentType, KEY_DEFAULT};
use crate::embed::{capacity_bytes, embed_payload};
use crate::error::Result;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Options for the embed command
#[derive(Debug, Clone)]
pub struct EmbedOptions {
    /// Encryption key; empty string embeds the data unencrypted.
    pub key: String,
    pub content_type: ContentType,
    /// Byte offset in the data file to start reading at.
    pub offset: u64,
    /// Number of bytes to read; 0 reads to the end of the file.
    pub length: u64,
    pub output: OutputOptions,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            key: KEY_DEFAULT.into(),
            content_type: ContentType::default(),
            offset: 0,
            length: 0,
            output: OutputOptions::default(),
        }
    }
}

/// Embed a slice of `data_path` into the carrier image at `carrier_path` and
/// write the modified image to `output_path`.
pub fn embed_file(
    carrier_path: &Path,
    data_path: &Path,
    output_path: &Path,
    options: &EmbedOptions,
) -> Result<()> {
    let out = options.output;
    out.detail(&format!(
        "Reading data to embed from file '{}'...",
        data_path.display()
    ));
    let payload = read_file_slice(data_path, options.offset, options.length, out)?;
    out.detail(&format!(
        "Payload digest: {}",
        hex::encode(crate::pipeline::digest(&payload))
    ));

    out.detail(&format!(
        "Loading carrier image '{}'...",
        carrier_path.display()
    ));
    let mut canvas = image::open(carrier_path)?.to_rgba8();
    out.detail(&format!(
        "Carrier holds up to {} bytes",
        capacity_bytes(&canvas)
    ));

    embed_payload(&mut canvas, &payload, options.content_type, &options.key)?;

    out.detail(&format!("Exporting '{}'...", output_path.display()));
    canvas.save(output_path)?;
    Ok(())
}

/// Read `length` bytes of a file starting at `offset`. A length of 0, or one
/// reaching past the end of the file, reads everything after the offset.
fn read_file_slice(path: &Path, offset: u64, length: u64, out: OutputOptions) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let rest = file_len.saturating_sub(offset);
    let to_read = if length == 0 || length > rest {
        rest
    } else {
        length
    };
    out.detail(&format!("Reading {} bytes from offset {}...", to_read, offset));

    if offset > 0 {
        file.seek(SeekFrom::Start(offset))?;
    }
    let mut payload = vec![0u8; to_read as usize];
    file.read_exact(&mut payload)?;
    Ok(payload)
}
