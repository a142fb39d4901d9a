//! Error handling for the G.711 library
//!
//! Companding itself is a total function and never fails. Errors come from
//! three places: resolving a format pair or building an adapter
//! (configuration), caller-provided buffers that are too small (memory), and
//! the sink or source wrapped by a streaming adapter (I/O).

#![allow(missing_docs)]

use crate::types::Format;
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for G.711 operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for G.711 operations
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input/output pair is not one of the six supported conversions
    #[error("Invalid format pair: {input} -> {output}")]
    InvalidFormatPair { input: Format, output: Format },

    /// A format name did not match any known format tag
    #[error("Unsupported format: {name} (expected alaw, ulaw or lpcm)")]
    UnsupportedFormat { name: String },

    /// Unsupported frame codec type
    #[error("Unsupported codec type: {codec_type}")]
    UnsupportedCodec { codec_type: String },

    /// A streaming adapter was built without a sink or source
    #[error("Missing {endpoint}: a streaming adapter needs one to operate")]
    MissingEndpoint { endpoint: &'static str },

    /// The adapter was closed and can no longer be used
    #[error("Adapter closed")]
    AdapterClosed,

    /// Buffer too small for operation
    #[error("Buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Error raised by the wrapped sink or source, passed through unchanged
    #[error("I/O operation failed: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// Create a new invalid format pair error
    pub fn invalid_format_pair(input: Format, output: Format) -> Self {
        Self::InvalidFormatPair { input, output }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(name: impl Into<String>) -> Self {
        Self::UnsupportedFormat { name: name.into() }
    }

    /// Create a new unsupported codec error
    pub fn unsupported_codec(codec_type: impl Into<String>) -> Self {
        Self::UnsupportedCodec {
            codec_type: codec_type.into(),
        }
    }

    /// Create a new missing endpoint error
    pub fn missing_endpoint(endpoint: &'static str) -> Self {
        Self::MissingEndpoint { endpoint }
    }

    /// Check if this error is recoverable
    ///
    /// Configuration errors never go away by retrying; an I/O error or a
    /// short buffer may.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidFormatPair { .. }
            | Self::UnsupportedFormat { .. }
            | Self::UnsupportedCodec { .. }
            | Self::MissingEndpoint { .. }
            | Self::AdapterClosed => false,

            Self::BufferTooSmall { .. } | Self::Io(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFormatPair { .. }
            | Self::UnsupportedFormat { .. }
            | Self::UnsupportedCodec { .. }
            | Self::MissingEndpoint { .. }
            | Self::AdapterClosed => ErrorCategory::Configuration,

            Self::BufferTooSmall { .. } => ErrorCategory::Memory,

            Self::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Format negotiation, construction and lifecycle errors
    Configuration,
    /// Caller-supplied buffer errors
    Memory,
    /// Errors from the wrapped sink or source
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Memory => write!(f, "Memory"),
            Self::Io => write!(f, "I/O"),
        }
    }
}

/// Convert into I/O errors so the adapters can implement `io::Write`/`io::Read`
impl From<CodecError> for io::Error {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::Io(inner) => inner,
            closed @ CodecError::AdapterClosed => io::Error::new(io::ErrorKind::BrokenPipe, closed),
            short @ CodecError::BufferTooSmall { .. } => {
                io::Error::new(io::ErrorKind::WriteZero, short)
            }
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}
