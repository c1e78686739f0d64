//! Error types for Huffman coding operations.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Codec error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Container or node table is malformed.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Payload bitstream does not decode to the declared symbol count.
    #[error("corrupt stream after {decoded} symbols: {message}")]
    CorruptStream { message: String, decoded: usize },

    /// Input does not fit the 32-bit size field of the container.
    #[error("input too large: {len} bytes exceeds the {max} byte limit")]
    InputTooLarge { len: usize, max: usize },

    /// Tree cannot be represented in the node table format.
    #[error("invalid tree: {0}")]
    InvalidTree(String),

    /// Buffer too small for output.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while loading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// Create a decode error with offset context.
    pub fn decode_at(message: impl Into<String>, offset: usize) -> Self {
        Error::Decode {
            message: format!("{} at offset {}", message.into(), offset),
        }
    }

    /// Create a corrupt stream error.
    pub fn corrupt_stream(message: impl Into<String>, decoded: usize) -> Self {
        Error::CorruptStream {
            message: message.into(),
            decoded,
        }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// Whether the error was caused by the data being decoded rather than by
    /// the caller.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::CorruptStream { .. })
    }

    /// Get error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Decode { .. } => "decode",
            Error::CorruptStream { .. } => "corrupt_stream",
            Error::InputTooLarge { .. } => "input_too_large",
            Error::InvalidTree(_) => "invalid_tree",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::InvalidConfig(_) => "invalid_config",
            Error::Io(_) => "io_error",
        }
    }
}
