//! HPACK static table (RFC 7541 Appendix A).
//!
//! 61 predefined header fields, fixed at build time and never mutated.
//! Dynamic-table indices start immediately after this table.

/// Number of entries in the static table.
pub const STATIC_TABLE_SIZE: usize = 61;

/// Static table entry: (name, value) with a 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticEntry {
    pub name: &'static [u8],
    pub value: &'static [u8],
}

/// Static table with 61 entries from RFC 7541 Appendix A.
///
/// Index 0 is reserved; valid HPACK indices are 1-61 (slot `index - 1`).
pub const STATIC_TABLE: &[StaticEntry; STATIC_TABLE_SIZE] = &[
    StaticEntry { name: b":authority", value: b"" },
    StaticEntry { name: b":method", value: b"GET" },
    StaticEntry { name: b":method", value: b"POST" },
    StaticEntry { name: b":path", value: b"/" },
    StaticEntry { name: b":path", value: b"/index.html" },
    StaticEntry { name: b":scheme", value: b"http" },
    StaticEntry { name: b":scheme", value: b"https" },
    StaticEntry { name: b":status", value: b"200" },
    StaticEntry { name: b":status", value: b"204" },
    StaticEntry { name: b":status", value: b"206" },
    StaticEntry { name: b":status", value: b"304" },
    StaticEntry { name: b":status", value: b"400" },
    StaticEntry { name: b":status", value: b"404" },
    StaticEntry { name: b":status", value: b"500" },
    StaticEntry { name: b"accept-charset", value: b"" },
    StaticEntry { name: b"accept-encoding", value: b"gzip, deflate" },
    StaticEntry { name: b"accept-language", value: b"" },
    StaticEntry { name: b"accept-ranges", value: b"" },
    StaticEntry { name: b"accept", value: b"" },
    StaticEntry { name: b"access-control-allow-origin", value: b"" },
    StaticEntry { name: b"age", value: b"" },
    StaticEntry { name: b"allow", value: b"" },
    StaticEntry { name: b"authorization", value: b"" },
    StaticEntry { name: b"cache-control", value: b"" },
    StaticEntry { name: b"content-disposition", value: b"" },
    StaticEntry { name: b"content-encoding", value: b"" },
    StaticEntry { name: b"content-language", value: b"" },
    StaticEntry { name: b"content-length", value: b"" },
    StaticEntry { name: b"content-location", value: b"" },
    StaticEntry { name: b"content-range", value: b"" },
    StaticEntry { name: b"content-type", value: b"" },
    StaticEntry { name: b"cookie", value: b"" },
    StaticEntry { name: b"date", value: b"" },
    StaticEntry { name: b"etag", value: b"" },
    StaticEntry { name: b"expect", value: b"" },
    StaticEntry { name: b"expires", value: b"" },
    StaticEntry { name: b"from", value: b"" },
    StaticEntry { name: b"host", value: b"" },
    StaticEntry { name: b"if-match", value: b"" },
    StaticEntry { name: b"if-modified-since", value: b"" },
    StaticEntry { name: b"if-none-match", value: b"" },
    StaticEntry { name: b"if-range", value: b"" },
    StaticEntry { name: b"if-unmodified-since", value: b"" },
    StaticEntry { name: b"last-modified", value: b"" },
    StaticEntry { name: b"link", value: b"" },
    StaticEntry { name: b"location", value: b"" },
    StaticEntry { name: b"max-forwards", value: b"" },
    StaticEntry { name: b"proxy-authenticate", value: b"" },
    StaticEntry { name: b"proxy-authorization", value: b"" },
    StaticEntry { name: b"range", value: b"" },
    StaticEntry { name: b"referer", value: b"" },
    StaticEntry { name: b"refresh", value: b"" },
    StaticEntry { name: b"retry-after", value: b"" },
    StaticEntry { name: b"server", value: b"" },
    StaticEntry { name: b"set-cookie", value: b"" },
    StaticEntry { name: b"strict-transport-security", value: b"" },
    StaticEntry { name: b"transfer-encoding", value: b"" },
    StaticEntry { name: b"user-agent", value: b"" },
    StaticEntry { name: b"vary", value: b"" },
    StaticEntry { name: b"via", value: b"" },
    StaticEntry { name: b"www-authenticate", value: b"" },
];

/// Get a static table entry by HPACK index (1-61).
pub fn get(index: usize) -> Option<&'static StaticEntry> {
    if (1..=STATIC_TABLE_SIZE).contains(&index) {
        Some(&STATIC_TABLE[index - 1])
    } else {
        None
    }
}

/// Find the HPACK index (1-61) of an exact (name, value) match.
pub fn find_field(name: &[u8], value: &[u8]) -> Option<usize> {
    STATIC_TABLE
        .iter()
        .position(|entry| entry.name == name && entry.value == value)
        .map(|slot| slot + 1)
}

/// Find the HPACK index (1-61) of the first entry with a matching name.
pub fn find_name(name: &[u8]) -> Option<usize> {
    STATIC_TABLE
        .iter()
        .position(|entry| entry.name == name)
        .map(|slot| slot + 1)
}
