//! Response header collection with well-known-header fast paths.
//!
//! [`ResponseHeaderMap`] is an ordered multi-map: a fixed slot per
//! well-known response header (O(1) lookup, multi-valued, value order
//! preserved) plus append-ordered storage for everything else. It backs both
//! response headers and response trailers.
//!
//! [`KnownHeader`] doubles as the enumerator's priority list: variants are
//! declared in the exact order the header enumerator emits them, ahead of
//! all custom headers.

/// Well-known response headers, in enumeration priority order.
///
/// Membership and ordering are a fixed configuration: headers with an HPACK
/// static-table entry come first, roughly by how often servers emit them,
/// followed by the gRPC trailer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum KnownHeader {
    Date,
    Server,
    ContentType,
    ContentLength,
    CacheControl,
    ContentEncoding,
    AcceptRanges,
    Age,
    Etag,
    Location,
    Vary,
    WwwAuthenticate,
    GrpcStatus,
    GrpcEncoding,
    GrpcMessage,
}

impl KnownHeader {
    /// Number of well-known headers.
    pub const COUNT: usize = 15;

    /// All well-known headers in enumeration priority order.
    pub const ALL: [KnownHeader; Self::COUNT] = [
        KnownHeader::Date,
        KnownHeader::Server,
        KnownHeader::ContentType,
        KnownHeader::ContentLength,
        KnownHeader::CacheControl,
        KnownHeader::ContentEncoding,
        KnownHeader::AcceptRanges,
        KnownHeader::Age,
        KnownHeader::Etag,
        KnownHeader::Location,
        KnownHeader::Vary,
        KnownHeader::WwwAuthenticate,
        KnownHeader::GrpcStatus,
        KnownHeader::GrpcEncoding,
        KnownHeader::GrpcMessage,
    ];

    /// Lowercase wire name.
    pub fn name(self) -> &'static str {
        match self {
            KnownHeader::Date => "date",
            KnownHeader::Server => "server",
            KnownHeader::ContentType => "content-type",
            KnownHeader::ContentLength => "content-length",
            KnownHeader::CacheControl => "cache-control",
            KnownHeader::ContentEncoding => "content-encoding",
            KnownHeader::AcceptRanges => "accept-ranges",
            KnownHeader::Age => "age",
            KnownHeader::Etag => "etag",
            KnownHeader::Location => "location",
            KnownHeader::Vary => "vary",
            KnownHeader::WwwAuthenticate => "www-authenticate",
            KnownHeader::GrpcStatus => "grpc-status",
            KnownHeader::GrpcEncoding => "grpc-encoding",
            KnownHeader::GrpcMessage => "grpc-message",
        }
    }

    /// HPACK static-table index of this header's name, if it has one.
    pub fn static_table_index(self) -> Option<usize> {
        match self {
            KnownHeader::Date => Some(33),
            KnownHeader::Server => Some(54),
            KnownHeader::ContentType => Some(31),
            KnownHeader::ContentLength => Some(28),
            KnownHeader::CacheControl => Some(24),
            KnownHeader::ContentEncoding => Some(26),
            KnownHeader::AcceptRanges => Some(18),
            KnownHeader::Age => Some(21),
            KnownHeader::Etag => Some(34),
            KnownHeader::Location => Some(46),
            KnownHeader::Vary => Some(59),
            KnownHeader::WwwAuthenticate => Some(61),
            KnownHeader::GrpcStatus | KnownHeader::GrpcEncoding | KnownHeader::GrpcMessage => None,
        }
    }

    /// Match a lowercase name against the well-known set.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|header| header.name() == name)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Ordered, multi-valued response header collection.
#[derive(Debug, Default)]
pub struct ResponseHeaderMap {
    known: [Vec<String>; KnownHeader::COUNT],
    /// Custom headers in first-appended order; repeated appends for the same
    /// name extend its value list in place.
    extra: Vec<(String, Vec<String>)>,
    value_count: usize,
}

impl ResponseHeaderMap {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for a header. Names are normalized to lowercase; the
    /// well-known set routes to its fixed slot, everything else keeps append
    /// order.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        self.value_count += 1;

        if let Some(known) = KnownHeader::from_name(&name) {
            self.known[known.slot()].push(value);
            return;
        }
        if let Some((_, values)) = self.extra.iter_mut().find(|(n, _)| *n == name) {
            values.push(value);
        } else {
            self.extra.push((name, vec![value]));
        }
    }

    /// Append a value for a well-known header without the name lookup.
    pub fn append_known(&mut self, header: KnownHeader, value: impl Into<String>) {
        self.known[header.slot()].push(value.into());
        self.value_count += 1;
    }

    /// Values of a well-known header, in append order. Empty when absent.
    pub fn known_values(&self, header: KnownHeader) -> &[String] {
        &self.known[header.slot()]
    }

    /// Values of any header by lowercase name, in append order.
    pub fn get(&self, name: &str) -> &[String] {
        if let Some(known) = KnownHeader::from_name(name) {
            return self.known_values(known);
        }
        self.extra
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Custom (non-well-known) headers in append order.
    pub fn extra_headers(&self) -> &[(String, Vec<String>)] {
        &self.extra
    }

    /// Total number of values across all headers.
    pub fn len(&self) -> usize {
        self.value_count
    }

    /// True when the collection holds no values.
    pub fn is_empty(&self) -> bool {
        self.value_count == 0
    }

    /// Remove all headers; the collection is reused across responses.
    pub fn clear(&mut self) {
        for values in &mut self.known {
            values.clear();
        }
        self.extra.clear();
        self.value_count = 0;
    }
}
