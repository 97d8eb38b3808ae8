//! Resumable header-block encoding.
//!
//! A header block can be larger than one output frame. The functions here
//! fill a caller-supplied buffer one frame's worth at a time and report
//! whether the block is complete, so the frame writer can emit a HEADERS
//! frame followed by CONTINUATION frames until [`BlockResult::Done`].
//!
//! Fields are never split: a field either lands whole in the current buffer
//! or is retried at the start of the next one. The enumerator's cursor only
//! advances after a field is fully written, which is what keeps the split
//! points on exact field boundaries.

use crate::enumerator::HeaderEnumerator;
use crate::hpack::DynamicTableEncoder;

/// Static-table index whose name is `:status`; shortens the literal forms of
/// non-static status codes.
const STATUS_NAME_INDEX: usize = 8;

/// Outcome of one buffer's worth of block encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockResult {
    /// Every field was encoded; this buffer holds the final fragment.
    Done,
    /// The buffer filled on a field boundary; call
    /// [`continue_encode_headers`] with a fresh buffer.
    MoreHeaders,
    /// A call wrote nothing because the next field alone exceeds the buffer.
    /// No encoder or cursor state changed.
    BufferTooSmall,
}

/// Encode the first fragment of a header block: any pending table-size-update
/// instruction, then the `:status` pseudo-header when given, then header
/// fields from the enumerator.
///
/// Returns the outcome and the bytes written. On [`BlockResult::BufferTooSmall`]
/// zero bytes are written and a consumed size-update instruction is re-armed.
pub fn begin_encode_headers(
    status: Option<u16>,
    encoder: &mut DynamicTableEncoder,
    enumerator: &mut HeaderEnumerator<'_>,
    dst: &mut [u8],
) -> (BlockResult, usize) {
    let pending = encoder.pending_size_update();
    let mut offset = match encoder.encode_size_update(dst) {
        Some(written) => written,
        // The instruction stays pending inside the encoder.
        None => return (BlockResult::BufferTooSmall, 0),
    };

    if let Some(code) = status {
        let value = code.to_string();
        match encoder.encode_field(
            b":status",
            value.as_bytes(),
            Some(STATUS_NAME_INDEX),
            &mut dst[offset..],
        ) {
            Some(written) => offset += written,
            None => {
                encoder.restore_size_update(pending);
                return (BlockResult::BufferTooSmall, 0);
            }
        }
    }

    encode_fields(encoder, enumerator, dst, offset, status.is_none(), pending)
}

/// Encode the next fragment of a block begun with [`begin_encode_headers`].
pub fn continue_encode_headers(
    encoder: &mut DynamicTableEncoder,
    enumerator: &mut HeaderEnumerator<'_>,
    dst: &mut [u8],
) -> (BlockResult, usize) {
    encode_fields(encoder, enumerator, dst, 0, true, None)
}

/// Drain enumerator fields into `dst[offset..]`.
///
/// `fresh` is true when no header field has been written into this buffer
/// yet; only then does a non-fitting field surface as `BufferTooSmall`.
fn encode_fields(
    encoder: &mut DynamicTableEncoder,
    enumerator: &mut HeaderEnumerator<'_>,
    dst: &mut [u8],
    mut offset: usize,
    mut fresh: bool,
    pending: Option<usize>,
) -> (BlockResult, usize) {
    loop {
        let Some(field) = enumerator.current() else {
            return (BlockResult::Done, offset);
        };
        match encoder.encode_field(field.name, field.value, field.static_index, &mut dst[offset..])
        {
            Some(written) => {
                offset += written;
                fresh = false;
                enumerator.move_next();
            }
            None if fresh => {
                encoder.restore_size_update(pending);
                return (BlockResult::BufferTooSmall, 0);
            }
            None => return (BlockResult::MoreHeaders, offset),
        }
    }
}
