use packedserial_core::{DecodeError, EncodeError};
use thiserror::Error;

/// Errors from splitting a byte stream into packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame exceeded {limit} bytes and was dropped")]
    Overflow { limit: usize },
    #[error("malformed COBS frame")]
    Malformed,
}

/// Errors that can occur while moving packets over a link.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("link closed")]
    Closed,
}
