//! Error types shared across the sync pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The inbound payload matched neither known webhook shape.
    #[error("unrecognized event shape: {0}")]
    UnrecognizedShape(String),

    /// The mapped client record carries no email. The upsert protocol fails
    /// fast on this before any outbound call.
    #[error("contact has no email address")]
    MissingEmail,

    /// Non-success status from the target platform.
    #[error("target platform returned {status}: {message}")]
    Transport { status: u16, message: String },

    /// The target platform answered 2xx but the body could not be decoded.
    #[error("failed to decode target platform response: {0}")]
    Decode(String),

    /// Connection-level failure before any status code was produced.
    #[error("request to target platform failed: {0}")]
    Http(String),
}
