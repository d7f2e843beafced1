use crate::error::CodecError;

use flate2::Compression;
use std::fmt;
use std::str::FromStr;

/// How hard deflate should work. `Precise` takes zlib's 0-9 scale directly,
/// where 0 stores the input without compressing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    Fast,
    #[default]
    Default,
    Best,
    Precise(u32),
}

impl CompressionLevel {
    /// Validates a numeric zlib level.
    pub fn new(level: u32) -> Result<CompressionLevel, CodecError> {
        if level > 9 {
            Err(CodecError::InvalidLevel(level))
        } else {
            Ok(CompressionLevel::Precise(level))
        }
    }

    /// The equivalent level on zlib's 0-9 scale.
    pub fn as_u32(self) -> u32 {
        match self {
            CompressionLevel::Fast => 1,
            CompressionLevel::Default => 6,
            CompressionLevel::Best => 9,
            CompressionLevel::Precise(level) => level,
        }
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Compression {
        Compression::new(level.as_u32())
    }
}

impl FromStr for CompressionLevel {
    type Err = CodecError;

    /// Accepts `fast`, `default`, `best` or a single digit.
    fn from_str(s: &str) -> Result<CompressionLevel, CodecError> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(CompressionLevel::Fast),
            "default" => Ok(CompressionLevel::Default),
            "best" => Ok(CompressionLevel::Best),
            other => other
                .parse::<u32>()
                .map_err(|_| CodecError::UnknownLevel(s.to_owned()))
                .and_then(CompressionLevel::new),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CompressionLevel::Fast => f.write_str("fast"),
            CompressionLevel::Default => f.write_str("default"),
            CompressionLevel::Best => f.write_str("best"),
            CompressionLevel::Precise(level) => write!(f, "{}", level),
        }
    }
}
