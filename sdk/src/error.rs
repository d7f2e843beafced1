use docz_codec::CodecError;
use docz_model::NodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DoczError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid UTF-8 in unpacked text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
