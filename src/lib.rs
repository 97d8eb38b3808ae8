//! # h2press
//!
//! Server-side HTTP/2 header compression (HPACK, RFC 7541) and frame
//! writing (RFC 9113).
//!
//! One [`DynamicTableEncoder`] per connection compresses response header
//! blocks; a [`FrameWriter`] wraps the connection's output stream and emits
//! WINDOW_UPDATE, GOAWAY, PING, SETTINGS, RST_STREAM, DATA and
//! HEADERS/CONTINUATION frames, splitting oversized header blocks across
//! frames on exact field boundaries.

pub mod block;
pub mod enumerator;
pub mod error;
pub mod frame;
pub mod headers;
pub mod hpack;
pub mod queue;
pub mod writer;

// Re-exports
pub use block::BlockResult;
pub use enumerator::HeaderEnumerator;
pub use error::{Error, Result};
pub use frame::{ErrorCode, FrameHeader, FrameType, SettingsId};
pub use headers::{KnownHeader, ResponseHeaderMap};
pub use hpack::{DynamicTableEncoder, DEFAULT_MAX_TABLE_SIZE};
pub use writer::FrameWriter;
