use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixelveilError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Not enough space in carrier: payload needs {needed} bytes, image holds {available}")]
    Capacity { needed: usize, available: usize },

    #[error("Data is invalid or uses a newer format version ({0}, only version {max} and below is supported)", max = crate::container::VERSION_FORMAT)]
    UnsupportedVersion(u8),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Decompression error: {0}")]
    Decompression(String),

    #[error("Truncated data: {0}")]
    Truncated(String),

    #[error("Embedding failed: {0}")]
    Embed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PixelveilError>;
