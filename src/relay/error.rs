//! Relay error types
//!
//! Feed errors classify why a tick produced nothing for a stream. None of
//! them are fatal: the feed loops catch every variant, skip the tick (or
//! the one entry, in the mix feed) and keep polling.

use super::codec::CodecError;

/// Why a tick produced no frame for a stream
#[derive(Debug)]
pub enum FeedError {
    /// No payload was ever published for the stream id
    MissingFrame,
    /// The stored payload is not valid base64 or not a decodable image
    Decode(CodecError),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::MissingFrame => write!(f, "no frame published for stream"),
            FeedError::Decode(e) => write!(f, "stored frame is not decodable: {}", e),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::MissingFrame => None,
            FeedError::Decode(e) => Some(e),
        }
    }
}

impl From<CodecError> for FeedError {
    fn from(e: CodecError) -> Self {
        FeedError::Decode(e)
    }
}
