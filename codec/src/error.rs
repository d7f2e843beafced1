use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Output buffer too small: capacity {capacity} bytes")]
    BufferTooSmall {
        capacity: usize,
    },

    #[error("Corrupt compressed data: {0}")]
    CorruptData(String),

    #[error("Invalid compression level {0}, expected 0-9")]
    InvalidLevel(u32),

    #[error("Unknown compression level \"{0}\"")]
    UnknownLevel(String),

    #[error("Deflate error: {0}")]
    Deflate(#[from] flate2::CompressError),
}
