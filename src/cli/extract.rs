use crate::cli::OutputOptions;
use crate::container::{Decoded, KEY_DEFAULT};
use crate::error::{PixelveilError, Result};
use crate::extract::extract_payload;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for the extract command
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Decryption key; empty string reads unencrypted data.
    pub key: String,
    /// Additional modified images to decode against the same reference and
    /// append to the result, in order.
    pub append: Vec<PathBuf>,
    /// Write the decoded bytes to stdout as UTF-8 instead of a file.
    pub print: bool,
    pub output: OutputOptions,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            key: KEY_DEFAULT.into(),
            append: Vec::new(),
            print: false,
            output: OutputOptions::default(),
        }
    }
}

/// Extract the payloads of one or more modified images and either write them
/// concatenated to `output_path` or print them to stdout.
///
/// A hash mismatch in any image is a warning, not a failure; the decoded
/// bytes are still emitted.
pub fn extract_file(
    input_path: &Path,
    reference_path: &Path,
    output_path: Option<&Path>,
    options: &ExtractOptions,
) -> Result<()> {
    let out = options.output;
    if output_path.is_none() && !options.print {
        return Err(PixelveilError::InvalidArgument(
            "no output file specified and --print not set".into(),
        ));
    }

    out.detail(&format!(
        "Loading reference image '{}'...",
        reference_path.display()
    ));
    let reference = image::open(reference_path)?.to_rgba8();

    let mut decoded = vec![decode_one(input_path, &reference, options, None)?];
    for (i, path) in options.append.iter().enumerate() {
        decoded.push(decode_one(path, &reference, options, Some(i + 1))?);
    }

    if options.print {
        let mut stdout = std::io::stdout().lock();
        for d in &decoded {
            stdout.write_all(&d.data)?;
        }
        writeln!(stdout)?;
    } else if let Some(path) = output_path {
        let mut combined = Vec::new();
        for d in &decoded {
            combined.extend_from_slice(&d.data);
        }
        std::fs::write(path, &combined)?;
        out.status(&format!("Embedded data extracted to '{}'.", path.display()));
    }
    Ok(())
}

fn decode_one(
    input_path: &Path,
    reference: &image::RgbaImage,
    options: &ExtractOptions,
    append_index: Option<usize>,
) -> Result<Decoded> {
    let out = options.output;
    out.detail(&format!("Loading image '{}'...", input_path.display()));
    let input = image::open(input_path)?.to_rgba8();
    let decoded = extract_payload(&input, reference, &options.key)?;
    out.detail(&format!(
        "Content type: {:?}, {} bytes",
        decoded.content_type,
        decoded.data.len()
    ));
    if !decoded.hash_matches {
        match append_index {
            Some(i) => out.status(&format!(
                "WARNING: Hash does not match data for appended file #{}!",
                i
            )),
            None => out.status("WARNING: Hash does not match data!"),
        }
    }
    Ok(decoded)
}
