//! Bidirectional code, Unicode and glyph-name mapping for one simple font.

use std::collections::{BTreeMap, HashMap};

use crate::encoding::BaseEncoding;

/// The resolved encoding of a simple font.
///
/// Maps each single-byte code to a Unicode scalar, records glyph names for the
/// codes a `/Differences` array touched, and indexes the reverse direction for
/// encoding text.
///
/// The reverse index is derived, never edited directly: it is the result of
/// writing `scalar -> code` for every code in ascending order and then for
/// every override code in the order the overrides were applied, reading the
/// scalars from the final forward table. Later writes replace earlier ones.
/// [`rebuild_reverse_index`](Self::rebuild_reverse_index) re-runs that pass.
///
/// Tables are produced by [`resolve_encoding`](crate::resolve_encoding) and
/// are immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingTable {
    base: Option<BaseEncoding>,
    code_to_unicode: [Option<char>; 256],
    glyph_names: BTreeMap<u8, String>,
    unicode_to_code: HashMap<char, u8>,
    overrides: Vec<u8>,
}

impl Default for EncodingTable {
    fn default() -> Self {
        Self {
            base: None,
            code_to_unicode: [None; 256],
            glyph_names: BTreeMap::new(),
            unicode_to_code: HashMap::new(),
            overrides: Vec::new(),
        }
    }
}

impl EncodingTable {
    /// Record which built-in encoding the base tier came from.
    pub(crate) fn set_base_encoding(&mut self, base: BaseEncoding) {
        self.base = Some(base);
    }

    /// Set the base-tier scalar for `code`.
    pub(crate) fn set_base(&mut self, code: u8, ch: char) {
        self.code_to_unicode[code as usize] = Some(ch);
    }

    /// Apply an override (Differences entry or fallback overlay) to `code`.
    ///
    /// Overrides always win over the base tier for the forward direction and
    /// are replayed after the ascending pass when indexing.
    pub(crate) fn apply_override(&mut self, code: u8, ch: char, glyph_name: Option<String>) {
        self.code_to_unicode[code as usize] = Some(ch);
        if let Some(name) = glyph_name {
            self.glyph_names.insert(code, name);
        }
        self.overrides.push(code);
    }

    /// Freeze the forward table and derive the reverse index.
    pub(crate) fn seal(mut self) -> Self {
        self.unicode_to_code = self.rebuild_reverse_index();
        self
    }

    /// Re-derive the reverse index from the forward table and override log.
    pub fn rebuild_reverse_index(&self) -> HashMap<char, u8> {
        let mut index = HashMap::with_capacity(256);
        for code in (0..=u8::MAX).chain(self.overrides.iter().copied()) {
            if let Some(ch) = self.code_to_unicode[code as usize] {
                index.insert(ch, code);
            }
        }
        index
    }

    /// The built-in encoding behind the base tier, or `None` for the
    /// identity mapping of symbolic fonts.
    pub fn base_encoding(&self) -> Option<BaseEncoding> {
        self.base
    }

    /// The Unicode scalar for `code`, if one is assigned.
    pub fn unicode(&self, code: u8) -> Option<char> {
        self.code_to_unicode[code as usize]
    }

    /// The code that encodes `ch`, if any.
    pub fn code(&self, ch: char) -> Option<u8> {
        self.unicode_to_code.get(&ch).copied()
    }

    /// The glyph name assigned to `code` by a `/Differences` array.
    ///
    /// When a name resolved only through the fallback table, the recorded
    /// name is the resolved character itself.
    pub fn glyph_name(&self, code: u8) -> Option<&str> {
        self.glyph_names.get(&code).map(String::as_str)
    }

    /// All glyph names, ordered by code.
    pub fn glyph_names(&self) -> &BTreeMap<u8, String> {
        &self.glyph_names
    }

    /// The reverse index, scalar to code.
    pub fn reverse_index(&self) -> &HashMap<char, u8> {
        &self.unicode_to_code
    }

    /// Codes overridden after the base tier, in application order.
    pub fn override_codes(&self) -> &[u8] {
        &self.overrides
    }

    /// True when every code has a scalar.
    pub fn is_total(&self) -> bool {
        self.code_to_unicode.iter().all(Option::is_some)
    }

    /// Encode text to codes. Characters with no code are skipped.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars().filter_map(|ch| self.code(ch)).collect()
    }

    /// Decode codes to text. Unassigned codes are skipped.
    pub fn decode(&self, codes: &[u8]) -> String {
        codes.iter().filter_map(|&code| self.unicode(code)).collect()
    }
}
