use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Sample rate mismatch: expected {expected} Hz, got {actual} Hz")]
    SampleRateMismatch { expected: u32, actual: u32 },

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
