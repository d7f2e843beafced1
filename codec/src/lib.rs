//! docz-codec
//!
//! One-shot zlib compression into buffers the caller sizes:
//!  1) `compress` / `decompress` write into a `&mut [u8]` and return the
//!     produced length, failing with `BufferTooSmall` instead of overrunning,
//!  2) `compress_bound` for sizing the compressed buffer up front,
//!  3) `CompressionLevel` for choosing speed versus ratio,
//!  4) Error types (`CodecError`).
//!
//! The stream format is plain zlib (RFC 1950), so anything produced here can
//! be read by any other zlib implementation and vice versa.
//!
//! ```
//! use docz_codec::*;
//!
//! let text = b"Hello, zlib compression!\0";
//! let mut compressed = [0u8; 100];
//! let n = compress(text, &mut compressed, CompressionLevel::Default).unwrap();
//!
//! let mut restored = [0u8; 100];
//! let m = decompress(&compressed[..n], &mut restored).unwrap();
//! assert_eq!(&restored[..m], text);
//! assert_eq!(m, 25);
//! ```

pub mod error;
pub mod level;
pub mod zlib;

pub use error::CodecError;
pub use level::CompressionLevel;
pub use zlib::{compress, compress_bound, compress_to_vec, decompress, decompress_to_vec};
