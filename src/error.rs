//! Error types for the h2press crate.

use std::io;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while writing HTTP/2 frames.
///
/// Capacity outcomes of the header-block writer (`MoreHeaders`,
/// `BufferTooSmall`) are ordinary return values, not errors; they only become
/// an [`Error::HeaderFieldTooLarge`] once the frame writer has no larger
/// buffer left to offer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error from the output sink.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A single header field's encoding exceeds the maximum frame payload.
    #[error("header field of ~{size_hint} bytes does not fit a {max_frame_size}-byte frame")]
    HeaderFieldTooLarge {
        size_hint: usize,
        max_frame_size: usize,
    },

    /// SETTINGS_MAX_FRAME_SIZE outside the RFC 9113 range (2^14 ..= 2^24 - 1).
    #[error("invalid max frame size: {0}")]
    InvalidMaxFrameSize(u32),

    /// WINDOW_UPDATE increment of zero (RFC 9113 Section 6.9.1).
    #[error("WINDOW_UPDATE increment must be non-zero")]
    InvalidWindowIncrement,
}

impl Error {
    /// Create a header-field-too-large error.
    pub fn field_too_large(size_hint: usize, max_frame_size: usize) -> Self {
        Self::HeaderFieldTooLarge {
            size_hint,
            max_frame_size,
        }
    }
}
