//! HPACK dynamic-table encoder (RFC 7541).
//!
//! One [`DynamicTableEncoder`] lives per connection and sees every response
//! header block for that connection in order. For each field it picks the
//! shortest representation available: a static-table index, a dynamic-table
//! index, or one of the literal forms. Literal fields that are safe to cache
//! are inserted into the dynamic table, evicting oldest entries to stay
//! within the configured byte budget.
//!
//! Every encode call is all-or-nothing against the destination slice: when a
//! field does not fit, no bytes are considered written and no table state
//! changes, which is what lets the block writer split header blocks across
//! frames on exact field boundaries.

use crate::queue::MovableHeadQueue;

use super::integer;
use super::static_table::{self, STATIC_TABLE_SIZE};

/// Default SETTINGS_HEADER_TABLE_SIZE (RFC 7541 Section 6.5.2).
pub const DEFAULT_MAX_TABLE_SIZE: usize = 4096;

/// Per-entry accounting overhead (RFC 7541 Section 4.1).
const ENTRY_OVERHEAD: usize = 32;

/// Header names that must never enter any shared compression table.
///
/// Values of these headers carry credentials or per-user state; caching them
/// in the connection-wide dynamic table would leak them across responses.
const NEVER_INDEXED: &[&[u8]] = &[
    b"cookie",
    b"set-cookie",
    b"authorization",
    b"proxy-authorization",
    b"content-disposition",
];

/// Representation chosen for a single field. Converted to wire bit patterns
/// only at serialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// Indexed header field (RFC 7541 Section 6.1).
    Indexed(usize),
    /// Literal with incremental indexing (Section 6.2.1); inserts the field.
    IncrementalIndexing,
    /// Literal without indexing (Section 6.2.2); field too large to cache.
    WithoutIndexing,
    /// Literal never indexed (Section 6.2.3); sensitive field.
    NeverIndexed,
}

#[derive(Debug)]
struct TableEntry {
    name: Vec<u8>,
    value: Vec<u8>,
}

impl TableEntry {
    fn size(&self) -> usize {
        ENTRY_OVERHEAD + self.name.len() + self.value.len()
    }
}

/// Encoder half of the HPACK dynamic table.
#[derive(Debug)]
pub struct DynamicTableEncoder {
    /// Insertion-ordered ring: read cursor at the oldest entry, newest at the
    /// tail, so eviction is a dequeue.
    entries: MovableHeadQueue<TableEntry>,
    table_size: usize,
    max_table_size: usize,
    /// Dynamic-table-size-update instruction owed to the peer, prefixed onto
    /// the next encoded block. Latest change wins.
    pending_size_update: Option<usize>,
}

impl DynamicTableEncoder {
    /// Create an encoder with the default 4096-byte table budget.
    pub fn new() -> Self {
        Self::with_max_table_size(DEFAULT_MAX_TABLE_SIZE)
    }

    /// Create an encoder with an explicit table budget.
    pub fn with_max_table_size(max_table_size: usize) -> Self {
        Self {
            entries: MovableHeadQueue::new(),
            table_size: 0,
            max_table_size,
            pending_size_update: None,
        }
    }

    /// Current sum of live entry sizes.
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Configured byte budget.
    pub fn max_table_size(&self) -> usize {
        self.max_table_size
    }

    /// Number of live entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Update the table budget (SETTINGS_HEADER_TABLE_SIZE side channel).
    ///
    /// Evicts immediately to the new budget and schedules a size-update
    /// instruction for the start of the next encoded block. A no-op when the
    /// size is unchanged.
    pub fn set_max_table_size(&mut self, max_table_size: usize) {
        if max_table_size == self.max_table_size {
            return;
        }
        self.max_table_size = max_table_size;
        self.evict_to(max_table_size);
        self.pending_size_update = Some(max_table_size);
    }

    /// Write any pending size-update instruction into `dst`.
    ///
    /// Returns the bytes written (0 when nothing is pending), or `None` when
    /// `dst` cannot hold the instruction; the instruction then remains
    /// pending.
    pub fn encode_size_update(&mut self, dst: &mut [u8]) -> Option<usize> {
        match self.pending_size_update {
            None => Some(0),
            Some(size) => {
                let written = integer::encode(size, 5, 0x20, dst)?;
                self.pending_size_update = None;
                Some(written)
            }
        }
    }

    /// Size-update instruction currently owed to the peer, if any.
    pub(crate) fn pending_size_update(&self) -> Option<usize> {
        self.pending_size_update
    }

    /// Re-arm a size-update instruction whose block was abandoned before any
    /// field was written.
    pub(crate) fn restore_size_update(&mut self, pending: Option<usize>) {
        if let Some(size) = pending {
            self.pending_size_update = Some(size);
        }
    }

    /// Encode one header field into `dst`.
    ///
    /// `static_name_hint` is the static-table index of the field's name when
    /// the caller knows it (the enumerator's hint); it shortens literal
    /// representations but never changes which representation is chosen.
    ///
    /// Returns the bytes written, or `None` when the field does not fit; in
    /// that case `dst` contents are unspecified but no encoder state changed.
    pub fn encode_field(
        &mut self,
        name: &[u8],
        value: &[u8],
        static_name_hint: Option<usize>,
        dst: &mut [u8],
    ) -> Option<usize> {
        let kind = self.classify(name, value);

        let written = match kind {
            FieldKind::Indexed(index) => integer::encode(index, 7, 0x80, dst)?,
            FieldKind::IncrementalIndexing => {
                write_literal(0x40, 6, static_name_hint, name, value, dst)?
            }
            FieldKind::WithoutIndexing => {
                write_literal(0x00, 4, static_name_hint, name, value, dst)?
            }
            FieldKind::NeverIndexed => write_literal(0x10, 4, static_name_hint, name, value, dst)?,
        };

        // Serialization succeeded; commit the table mutation, if any.
        if kind == FieldKind::IncrementalIndexing {
            self.insert(name, value);
        }
        Some(written)
    }

    /// Pick the representation for a field without touching the table.
    fn classify(&self, name: &[u8], value: &[u8]) -> FieldKind {
        if let Some(index) = static_table::find_field(name, value) {
            return FieldKind::Indexed(index);
        }
        if let Some(index) = self.find_dynamic(name, value) {
            return FieldKind::Indexed(index);
        }
        if NEVER_INDEXED.iter().any(|n| *n == name) {
            return FieldKind::NeverIndexed;
        }
        if ENTRY_OVERHEAD + name.len() + value.len() > self.max_table_size {
            return FieldKind::WithoutIndexing;
        }
        FieldKind::IncrementalIndexing
    }

    /// Find an exact match in the dynamic table, returning its HPACK index
    /// (62 for the newest entry).
    fn find_dynamic(&self, name: &[u8], value: &[u8]) -> Option<usize> {
        let count = self.entries.len();
        self.entries
            .iter()
            .position(|entry| entry.name == name && entry.value == value)
            .map(|oldest_first| STATIC_TABLE_SIZE + count - oldest_first)
    }

    /// Insert a field at the head of the table, evicting oldest entries to
    /// stay within budget. Callers have already ruled out oversized fields.
    fn insert(&mut self, name: &[u8], value: &[u8]) {
        let entry = TableEntry {
            name: name.to_vec(),
            value: value.to_vec(),
        };
        let entry_size = entry.size();
        debug_assert!(entry_size <= self.max_table_size);

        self.evict_to(self.max_table_size - entry_size);
        self.entries.enqueue(entry);
        self.table_size += entry_size;
    }

    fn evict_to(&mut self, budget: usize) {
        while self.table_size > budget {
            match self.entries.try_dequeue() {
                Some(evicted) => self.table_size -= evicted.size(),
                None => break,
            }
        }
    }
}

impl Default for DynamicTableEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a literal representation: prefix octet with the name reference
/// (or zero for a literal name), then the string literals. Raw octets, no
/// Huffman coding.
fn write_literal(
    pattern: u8,
    prefix_bits: u8,
    name_index: Option<usize>,
    name: &[u8],
    value: &[u8],
    dst: &mut [u8],
) -> Option<usize> {
    let mut offset = integer::encode(name_index.unwrap_or(0), prefix_bits, pattern, dst)?;
    if name_index.is_none() {
        offset += write_string(name, &mut dst[offset..])?;
    }
    offset += write_string(value, &mut dst[offset..])?;
    Some(offset)
}

/// String literal (RFC 7541 Section 5.2) with the Huffman bit clear.
fn write_string(data: &[u8], dst: &mut [u8]) -> Option<usize> {
    let prefix = integer::encode(data.len(), 7, 0x00, dst)?;
    let end = prefix.checked_add(data.len())?;
    if end > dst.len() {
        return None;
    }
    dst[prefix..end].copy_from_slice(data);
    Some(end)
}
