//! Error types for Framecast

use thiserror::Error;

/// Main error type for Framecast operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to allocate frame buffer of {0} bytes")]
    Allocation(usize),

    #[error("Failed to connect to {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    #[error("Stream connection lost: {0}")]
    ConnectionLost(String),

    #[error("Failed to open capture device: {0}")]
    DeviceOpen(String),

    #[error("Failed to start frame delivery: {0}")]
    DeliveryStart(String),

    #[error("Failed to stop frame delivery: {0}")]
    DeliveryStop(String),

    #[error(
        "Source frame {width}x{height} too small for {target_width}x{target_height} at stride {stride_factor}"
    )]
    SourceTooSmall {
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
        stride_factor: u32,
    },

    #[error("Frame buffer holds {actual} bytes, expected at least {expected}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using Framecast's Error
pub type Result<T> = std::result::Result<T, Error>;
