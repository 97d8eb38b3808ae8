//! HPACK integer encoding (RFC 7541 Section 5.1).
//!
//! Encode-side only. Integers target a caller-supplied slice with explicit
//! fit-checking so the block writer can keep whole-field writes atomic.

/// Encode an integer with an N-bit prefix into `dst`.
///
/// `pattern` supplies the representation bits above the prefix (for example
/// `0x80` for an indexed field with a 7-bit prefix) and is written into the
/// first octet. `prefix_bits` must be between 1 and 8.
///
/// Returns the number of bytes written, or `None` if `dst` is too small.
pub fn encode(value: usize, prefix_bits: u8, pattern: u8, dst: &mut [u8]) -> Option<usize> {
    debug_assert!((1..=8).contains(&prefix_bits));

    if dst.is_empty() {
        return None;
    }

    let max_prefix_value = (1usize << prefix_bits) - 1;

    if value < max_prefix_value {
        dst[0] = pattern | value as u8;
        return Some(1);
    }

    // Prefix saturated; the remainder continues in 7-bit groups.
    dst[0] = pattern | max_prefix_value as u8;
    let mut remaining = value - max_prefix_value;
    let mut written = 1;

    while remaining >= 128 {
        if written >= dst.len() {
            return None;
        }
        dst[written] = (remaining % 128 + 128) as u8;
        remaining /= 128;
        written += 1;
    }
    if written >= dst.len() {
        return None;
    }
    dst[written] = remaining as u8;
    Some(written + 1)
}
