//! Deterministic, restartable enumeration of response headers.
//!
//! The wire order of an encoded header block is fixed: the caller-injected
//! pseudo-header first (handled by the block writer), then the well-known
//! headers in [`KnownHeader::ALL`] order, then custom headers in collection
//! append order. Multi-valued headers yield one step per value, preserving
//! value order.
//!
//! The enumerator is an explicit cursor: the block writer reads
//! [`current`](HeaderEnumerator::current) and only advances with
//! [`move_next`](HeaderEnumerator::move_next) once the field's bytes are
//! fully written, which is what makes header blocks resumable across output
//! frames.

use crate::headers::{KnownHeader, ResponseHeaderMap};

/// One enumerator step: a header field plus the HPACK static-table index of
/// its name when the name is a well-known one.
#[derive(Debug, Clone, Copy)]
pub struct HeaderField<'a> {
    pub name: &'a [u8],
    pub value: &'a [u8],
    pub static_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Known,
    Extra,
    Finished,
}

/// Cursor over a [`ResponseHeaderMap`], used for headers and trailers alike.
#[derive(Debug)]
pub struct HeaderEnumerator<'a> {
    headers: &'a ResponseHeaderMap,
    phase: Phase,
    /// Position in `KnownHeader::ALL` during the well-known pass, or in the
    /// custom-header list afterwards.
    header_pos: usize,
    /// Sub-index within the current header's value list.
    value_pos: usize,
}

impl<'a> HeaderEnumerator<'a> {
    /// Create an enumerator positioned at the first field of `headers`.
    pub fn new(headers: &'a ResponseHeaderMap) -> Self {
        let mut enumerator = Self {
            headers,
            phase: Phase::Known,
            header_pos: 0,
            value_pos: 0,
        };
        enumerator.initialize();
        enumerator
    }

    /// Reset to the first field. Clears all positional state, so the same
    /// enumerator can replay its collection from the start.
    pub fn initialize(&mut self) {
        self.phase = Phase::Known;
        self.header_pos = 0;
        self.value_pos = 0;
        self.skip_absent();
    }

    /// The field under the cursor, or `None` when exhausted.
    pub fn current(&self) -> Option<HeaderField<'a>> {
        match self.phase {
            Phase::Known => {
                let header = KnownHeader::ALL[self.header_pos];
                let value = &self.headers.known_values(header)[self.value_pos];
                Some(HeaderField {
                    name: header.name().as_bytes(),
                    value: value.as_bytes(),
                    static_index: header.static_table_index(),
                })
            }
            Phase::Extra => {
                let (name, values) = &self.headers.extra_headers()[self.header_pos];
                Some(HeaderField {
                    name: name.as_bytes(),
                    value: values[self.value_pos].as_bytes(),
                    static_index: None,
                })
            }
            Phase::Finished => None,
        }
    }

    /// Advance past the current field. Returns true while a field remains.
    pub fn move_next(&mut self) -> bool {
        if self.phase == Phase::Finished {
            return false;
        }
        self.value_pos += 1;
        self.skip_absent();
        self.phase != Phase::Finished
    }

    /// Settle the cursor on the next populated (header, value) slot.
    fn skip_absent(&mut self) {
        if self.phase == Phase::Known {
            loop {
                if self.header_pos == KnownHeader::COUNT {
                    self.phase = Phase::Extra;
                    self.header_pos = 0;
                    break;
                }
                let values = self.headers.known_values(KnownHeader::ALL[self.header_pos]);
                if self.value_pos < values.len() {
                    return;
                }
                self.header_pos += 1;
                self.value_pos = 0;
            }
        }
        if self.phase == Phase::Extra {
            loop {
                if self.header_pos == self.headers.extra_headers().len() {
                    self.phase = Phase::Finished;
                    return;
                }
                let (_, values) = &self.headers.extra_headers()[self.header_pos];
                if self.value_pos < values.len() {
                    return;
                }
                self.header_pos += 1;
                self.value_pos = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(enumerator: &mut HeaderEnumerator<'_>) -> Vec<(String, String, Option<usize>)> {
        let mut fields = Vec::new();
        while let Some(field) = enumerator.current() {
            fields.push((
                String::from_utf8(field.name.to_vec()).unwrap(),
                String::from_utf8(field.value.to_vec()).unwrap(),
                field.static_index,
            ));
            enumerator.move_next();
        }
        fields
    }

    #[test]
    fn test_well_known_before_custom_in_fixed_order() {
        let mut map = ResponseHeaderMap::new();
        map.append("x-custom", "zzz");
        map.append("content-type", "text/plain");
        map.append("date", "Thu, 01 Jan 2026 00:00:00 GMT");

        let mut enumerator = HeaderEnumerator::new(&map);
        let fields = collect(&mut enumerator);

        // date precedes content-type regardless of append order; custom last.
        let names: Vec<_> = fields.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, ["date", "content-type", "x-custom"]);
        assert_eq!(fields[0].2, Some(33));
        assert_eq!(fields[1].2, Some(31));
        assert_eq!(fields[2].2, None);
    }

    #[test]
    fn test_multi_value_yields_one_step_per_value() {
        let mut map = ResponseHeaderMap::new();
        map.append("age", "0");
        map.append("age", "60");
        map.append("x-trace", "a");
        map.append("x-trace", "b");

        let mut enumerator = HeaderEnumerator::new(&map);
        let fields = collect(&mut enumerator);
        let pairs: Vec<_> = fields
            .iter()
            .map(|(n, v, _)| (n.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [("age", "0"), ("age", "60"), ("x-trace", "a"), ("x-trace", "b")]
        );
    }

    #[test]
    fn test_empty_collection() {
        let map = ResponseHeaderMap::new();
        let mut enumerator = HeaderEnumerator::new(&map);
        assert!(enumerator.current().is_none());
        assert!(!enumerator.move_next());
    }

    #[test]
    fn test_initialize_restarts() {
        let mut map = ResponseHeaderMap::new();
        map.append("etag", "\"v1\"");
        map.append("x-a", "1");

        let mut enumerator = HeaderEnumerator::new(&map);
        let first = collect(&mut enumerator);
        assert!(enumerator.current().is_none());

        enumerator.initialize();
        let second = collect(&mut enumerator);
        assert_eq!(first, second);
    }
}
