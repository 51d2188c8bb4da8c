//! Byte-sequence to Unicode fallback tables.
//!
//! A fallback table is what a font's `/ToUnicode` CMap provides: text for a
//! character code, plus the derived reverse direction. The encoding resolver
//! consults it only through [`UnicodeFallback`], so the concrete CMap parser
//! lives with the PDF backend.

use std::collections::BTreeMap;

/// Lookup contract for a Unicode fallback table.
pub trait UnicodeFallback {
    /// Text mapped to the given code bytes (interpreted big-endian), if any.
    fn lookup(&self, bytes: &[u8]) -> Option<&str>;

    /// Scalar to code mapping for every single-character destination whose
    /// source code fits in one byte.
    ///
    /// When several codes map to the same scalar the highest code wins.
    fn reverse_mapping(&self) -> &BTreeMap<char, u32>;

    /// Look up a single byte and return the answer only if it is exactly one
    /// character long.
    fn single_char(&self, code: u8) -> Option<char> {
        let text = self.lookup(&[code])?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

/// A fallback table that holds nothing.
///
/// Resolving against `EmptyFallback` is equivalent to resolving with no
/// fallback table at all.
#[derive(Debug, Clone, Default)]
pub struct EmptyFallback {
    reverse: BTreeMap<char, u32>,
}

impl UnicodeFallback for EmptyFallback {
    fn lookup(&self, _bytes: &[u8]) -> Option<&str> {
        None
    }

    fn reverse_mapping(&self) -> &BTreeMap<char, u32> {
        &self.reverse
    }
}

/// In-memory fallback table keyed by single-byte codes.
///
/// Handy for callers that already hold decoded ToUnicode data.
#[derive(Debug, Clone, Default)]
pub struct MapFallback {
    forward: BTreeMap<u8, String>,
    reverse: BTreeMap<char, u32>,
}

impl MapFallback {
    /// Build a table from `(code, text)` pairs. Later pairs replace earlier
    /// ones for the same code.
    pub fn new(entries: impl IntoIterator<Item = (u8, String)>) -> Self {
        let forward: BTreeMap<u8, String> = entries.into_iter().collect();
        let mut reverse = BTreeMap::new();
        // Ascending code order: the highest code wins a shared scalar.
        for (&code, text) in &forward {
            let mut chars = text.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                reverse.insert(ch, u32::from(code));
            }
        }
        Self { forward, reverse }
    }
}

impl UnicodeFallback for MapFallback {
    fn lookup(&self, bytes: &[u8]) -> Option<&str> {
        match bytes {
            [code] => self.forward.get(code).map(String::as_str),
            _ => None,
        }
    }

    fn reverse_mapping(&self) -> &BTreeMap<char, u32> {
        &self.reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fallback_resolves_nothing() {
        let empty = EmptyFallback::default();
        assert_eq!(empty.lookup(&[0x41]), None);
        assert_eq!(empty.single_char(0x41), None);
        assert!(empty.reverse_mapping().is_empty());
    }

    #[test]
    fn map_fallback_lookup_and_reverse() {
        let table = MapFallback::new([(0x01, "X".to_string()), (0x02, "fi".to_string())]);
        assert_eq!(table.lookup(&[0x01]), Some("X"));
        assert_eq!(table.lookup(&[0x00, 0x01]), None);
        assert_eq!(table.single_char(0x01), Some('X'));
        assert_eq!(table.single_char(0x02), None);
        assert_eq!(table.reverse_mapping().get(&'X'), Some(&1));
        assert!(!table.reverse_mapping().contains_key(&'f'));
    }

    #[test]
    fn map_fallback_highest_code_wins_shared_scalar() {
        let table = MapFallback::new([(0x10, "Q".to_string()), (0x05, "Q".to_string())]);
        assert_eq!(table.reverse_mapping().get(&'Q'), Some(&0x10));
    }
}
