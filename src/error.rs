//! Error types
//!
//! Conversion errors are contained at the item boundary: the pipeline logs
//! them and moves on, they never abort a batch.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single conversion produced no result
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConvertError {
    /// Source bytes could not be interpreted as an image
    #[error("Failed to load image: {0}")]
    Decode(String),

    /// The raster surface could not be serialized to the requested format
    #[error("Failed to convert image: {0}")]
    Encode(String),

    /// The raster surface could not be allocated
    #[error("Could not create a {width}x{height} raster surface")]
    ContextUnavailable { width: u32, height: u32 },

    /// The blocking worker panicked or was cancelled
    #[error("Conversion task failed: {0}")]
    Worker(String),
}

impl ConvertError {
    /// `ContextUnavailable` counts as an encode-side failure
    pub fn is_encode_failure(&self) -> bool {
        matches!(self, ConvertError::Encode(_) | ConvertError::ContextUnavailable { .. })
    }
}

/// Building the ZIP container failed
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A picked or dropped path could not be turned into a source file
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input task failed: {0}")]
    Worker(String),
}

/// Unknown output format identifier
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unsupported output format: {0}")]
pub struct ParseFormatError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::ContextUnavailable { width: 0, height: 12 };
        assert_eq!(err.to_string(), "Could not create a 0x12 raster surface");

        let err = ConvertError::Decode("bad header".into());
        assert_eq!(err.to_string(), "Failed to load image: bad header");
    }

    #[test]
    fn test_context_unavailable_is_encode_class() {
        assert!(ConvertError::ContextUnavailable { width: 0, height: 0 }.is_encode_failure());
        assert!(ConvertError::Encode("x".into()).is_encode_failure());
        assert!(!ConvertError::Decode("x".into()).is_encode_failure());
    }
}
