//! HPACK header compression, encoder side (RFC 7541).
//!
//! This module covers the representations a response-originating endpoint
//! emits: indexed fields, the three literal forms, and the dynamic-table
//! size-update instruction. Decoding is out of scope.

pub mod encoder;
pub mod integer;
pub mod static_table;

pub use encoder::{DynamicTableEncoder, DEFAULT_MAX_TABLE_SIZE};
