//! docz
//!
//! This crate ties the document model and the zlib codec together.
//!
//! - `Node` and `TextWriter` (re-exported from docz-model)
//! - `compress` / `decompress` and friends (re-exported from docz-codec)
//! - Pretty printing, and packing a document into a compressed buffer

pub mod demo;
pub mod error;

pub use docz_codec::{
    compress, compress_bound, compress_to_vec, decompress, decompress_to_vec, CodecError,
    CompressionLevel,
};
pub use docz_model::{Node, NodeError, NodeKind, TextWriter};
pub use error::DoczError;

use std::io::Write;

/// Render a document as indented JSON, one member or item per line.
pub fn print_formatted(node: &Node) -> Result<String, DoczError> {
    Ok(serde_json::to_string_pretty(node)?)
}

/// Write a document to `out` followed by a newline, indented when `pretty`
/// is set and compact otherwise.
pub fn write_document<W: Write>(node: &Node, pretty: bool, out: &mut W) -> Result<(), DoczError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, node)?;
    } else {
        write!(out, "{}", node)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print a document compactly and compress the text into a buffer sized with
/// `compress_bound`, so packing cannot fail for lack of space.
pub fn pack_document(node: &Node, level: CompressionLevel) -> Result<Vec<u8>, DoczError> {
    let text = node.print_unformatted();
    let packed = compress_to_vec(text.as_bytes(), compress_bound(text.len()), level)?;
    tracing::debug!(text_len = text.len(), packed_len = packed.len(), "packed document");
    Ok(packed)
}

/// Decompress text produced by [pack_document](fn.pack_document.html). The
/// caller supplies the largest text length it is willing to accept.
pub fn unpack_text(packed: &[u8], capacity: usize) -> Result<String, DoczError> {
    let bytes = decompress_to_vec(packed, capacity)?;
    Ok(String::from_utf8(bytes)?)
}

pub mod model {
    pub use docz_model::{Node, NodeError, NodeKind, TextWriter};
}

pub mod codec {
    pub use docz_codec::*;
}
