//! ToUnicode CMap parser for simple fonts.
//!
//! Parses CMap data embedded in a font's `/ToUnicode` stream into a
//! code → text table. Supports `beginbfchar`/`endbfchar` and
//! `beginbfrange`/`endbfrange` sections (incrementing and array destinations)
//! with UTF-16BE encoded destinations. The parsed table implements
//! [`UnicodeFallback`], so the encoding resolver can use it directly.

use std::collections::BTreeMap;

use simplefont_core::{FontError, UnicodeFallback};
use tracing::debug;

use crate::error::BackendError;

/// Upper bound on the number of codes a single `bfrange` entry may expand to.
const MAX_RANGE_SPAN: u32 = 0x1_0000;

/// A parsed ToUnicode CMap.
///
/// Codes are the source byte strings read big-endian, so `<41>` and `<0041>`
/// address the same entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToUnicodeCMap {
    mappings: BTreeMap<u32, String>,
    reverse: BTreeMap<char, u32>,
}

impl ToUnicodeCMap {
    /// Parse a ToUnicode CMap from its raw (decompressed) byte content.
    ///
    /// Sections apply in stream order, so a later entry overrides an earlier
    /// one for the same code. Entries whose destination is not valid UTF-16
    /// are dropped.
    pub fn parse(data: &[u8]) -> Result<Self, BackendError> {
        let text = String::from_utf8_lossy(data);
        let mut mappings = BTreeMap::new();

        for (kind, section) in sections(&text) {
            match kind {
                SectionKind::BfChar => parse_bfchar_section(section, &mut mappings)?,
                SectionKind::BfRange => parse_bfrange_section(section, &mut mappings)?,
            }
        }

        let reverse = build_reverse(&mappings);
        Ok(Self { mappings, reverse })
    }

    /// Parse, rejecting payloads larger than `max_bytes`.
    pub fn parse_with_limit(data: &[u8], max_bytes: usize) -> Result<Self, BackendError> {
        if data.len() > max_bytes {
            return Err(BackendError::Core(FontError::ResourceLimitExceeded {
                limit_name: "max_tounicode_bytes".to_string(),
                limit_value: max_bytes,
                actual_value: data.len(),
            }));
        }
        Self::parse(data)
    }

    /// Look up the text mapped to a numeric code.
    pub fn lookup_code(&self, code: u32) -> Option<&str> {
        self.mappings.get(&code).map(String::as_str)
    }

    /// Returns the number of mappings in this CMap.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns true if this CMap has no mappings.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// All mappings, ordered by code.
    pub fn mappings(&self) -> &BTreeMap<u32, String> {
        &self.mappings
    }
}

impl UnicodeFallback for ToUnicodeCMap {
    fn lookup(&self, bytes: &[u8]) -> Option<&str> {
        if bytes.is_empty() || bytes.len() > 4 {
            return None;
        }
        let code = bytes
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
        self.lookup_code(code)
    }

    fn reverse_mapping(&self) -> &BTreeMap<char, u32> {
        &self.reverse
    }
}

/// Scalar → code for every one-character destination of a one-byte code.
/// Codes are visited in ascending order, so the highest code wins.
fn build_reverse(mappings: &BTreeMap<u32, String>) -> BTreeMap<char, u32> {
    let mut reverse = BTreeMap::new();
    for (&code, text) in mappings.range(..=0xFF) {
        let mut chars = text.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            reverse.insert(ch, code);
        }
    }
    reverse
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SectionKind {
    BfChar,
    BfRange,
}

impl SectionKind {
    fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            SectionKind::BfChar => ("beginbfchar", "endbfchar"),
            SectionKind::BfRange => ("beginbfrange", "endbfrange"),
        }
    }
}

/// Bodies of every bfchar and bfrange section, in document order.
///
/// An unterminated trailing section is ignored.
fn sections(text: &str) -> Vec<(SectionKind, &str)> {
    let mut found = Vec::new();
    let mut search_from = 0;
    loop {
        let next = [SectionKind::BfChar, SectionKind::BfRange]
            .into_iter()
            .filter_map(|kind| {
                let (begin, _) = kind.delimiters();
                text[search_from..].find(begin).map(|start| (start, kind))
            })
            .min_by_key(|&(start, _)| start);
        let Some((start, kind)) = next else {
            break;
        };
        let (begin, end) = kind.delimiters();
        let body_start = search_from + start + begin.len();
        let Some(len) = text[body_start..].find(end) else {
            break;
        };
        found.push((kind, &text[body_start..body_start + len]));
        search_from = body_start + len + end.len();
    }
    found
}

/// Lexical tokens inside a bf section.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'t> {
    Hex(&'t str),
    ArrayStart,
    ArrayEnd,
}

fn tokenize(section: &str) -> Result<Vec<Token<'_>>, BackendError> {
    let mut tokens = Vec::new();
    let mut rest = section;
    while let Some(pos) = rest.find(['<', '[', ']']) {
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix('<') {
            let close = after
                .find('>')
                .ok_or_else(|| BackendError::Parse("unterminated hex string".to_string()))?;
            tokens.push(Token::Hex(&after[..close]));
            rest = &after[close + 1..];
        } else {
            tokens.push(if tail.starts_with('[') {
                Token::ArrayStart
            } else {
                Token::ArrayEnd
            });
            rest = &tail[1..];
        }
    }
    Ok(tokens)
}

/// Hex digits with embedded whitespace removed.
fn clean_hex(hex: &str) -> String {
    hex.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse a source code like "0041" into a u32.
fn parse_hex_code(hex: &str) -> Result<u32, BackendError> {
    let digits = clean_hex(hex);
    if digits.is_empty() || digits.len() > 8 {
        return Err(BackendError::Parse(format!("invalid hex code '{hex}'")));
    }
    u32::from_str_radix(&digits, 16)
        .map_err(|e| BackendError::Parse(format!("invalid hex code '{hex}': {e}")))
}

/// Parse a UTF-16BE destination into code units.
///
/// A two-digit destination such as `<41>` is read as the single unit 0x0041.
fn parse_utf16_units(hex: &str) -> Result<Vec<u16>, BackendError> {
    let mut digits = clean_hex(hex);
    if digits.len() == 2 {
        digits.insert_str(0, "00");
    }
    if digits.is_empty() || digits.len() % 4 != 0 {
        return Err(BackendError::Parse(format!(
            "UTF-16BE hex string must have length divisible by 4, got '{hex}' (len={})",
            digits.len()
        )));
    }
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| {
            let unit = std::str::from_utf8(chunk)
                .map_err(|e| BackendError::Parse(format!("invalid hex: {e}")))?;
            u16::from_str_radix(unit, 16).map_err(|e| {
                BackendError::Parse(format!("invalid hex in UTF-16BE '{unit}': {e}"))
            })
        })
        .collect()
}

/// Decode destination units, or `None` for unpaired surrogates.
fn decode_units(code: u32, units: &[u16]) -> Option<String> {
    match String::from_utf16(units) {
        Ok(text) => Some(text),
        Err(err) => {
            debug!(code, %err, "dropping ToUnicode entry");
            None
        }
    }
}

/// Parse a beginbfchar...endbfchar section: pairs of `<src> <dst>`.
fn parse_bfchar_section(
    section: &str,
    mappings: &mut BTreeMap<u32, String>,
) -> Result<(), BackendError> {
    let tokens = tokenize(section)?;
    let mut iter = tokens.into_iter();
    while let Some(token) = iter.next() {
        let (Token::Hex(src), Some(Token::Hex(dst))) = (token, iter.next()) else {
            return Err(BackendError::Parse(
                "bfchar entries must be pairs of hex strings".to_string(),
            ));
        };
        let code = parse_hex_code(src)?;
        if let Some(text) = decode_units(code, &parse_utf16_units(dst)?) {
            mappings.insert(code, text);
        }
    }
    Ok(())
}

/// Parse a beginbfrange...endbfrange section.
///
/// Entries are `<lo> <hi> <dst>`, where the last UTF-16 unit of `dst` is
/// incremented across the range, or `<lo> <hi> [<dst1> <dst2> ...]`.
fn parse_bfrange_section(
    section: &str,
    mappings: &mut BTreeMap<u32, String>,
) -> Result<(), BackendError> {
    let tokens = tokenize(section)?;
    let mut pos = 0;
    while pos < tokens.len() {
        let (Some(Token::Hex(lo)), Some(Token::Hex(hi))) = (tokens.get(pos), tokens.get(pos + 1))
        else {
            return Err(BackendError::Parse(
                "bfrange entry must start with two hex codes".to_string(),
            ));
        };
        let lo = parse_hex_code(lo)?;
        let hi = parse_hex_code(hi)?;
        if hi < lo || hi - lo >= MAX_RANGE_SPAN {
            return Err(BackendError::Parse(format!(
                "invalid bfrange <{lo:X}> <{hi:X}>"
            )));
        }
        pos += 2;

        match tokens.get(pos) {
            Some(Token::Hex(dst)) => {
                let units = parse_utf16_units(dst)?;
                for offset in 0..=(hi - lo) {
                    let mut shifted = units.clone();
                    if let Some(last) = shifted.last_mut() {
                        // offset < MAX_RANGE_SPAN, so it fits in a u16.
                        *last = last.wrapping_add(offset as u16);
                    }
                    if let Some(text) = decode_units(lo + offset, &shifted) {
                        mappings.insert(lo + offset, text);
                    }
                }
                pos += 1;
            }
            Some(Token::ArrayStart) => {
                pos += 1;
                let mut code = lo;
                while let Some(Token::Hex(dst)) = tokens.get(pos) {
                    let units = parse_utf16_units(dst)?;
                    if code <= hi {
                        if let Some(text) = decode_units(code, &units) {
                            mappings.insert(code, text);
                        }
                    }
                    code = code.saturating_add(1);
                    pos += 1;
                }
                if tokens.get(pos) != Some(&Token::ArrayEnd) {
                    return Err(BackendError::Parse(
                        "unterminated bfrange destination array".to_string(),
                    ));
                }
                pos += 1;
            }
            _ => {
                return Err(BackendError::Parse(
                    "bfrange entry is missing its destination".to_string(),
                ));
            }
        }
    }
    Ok(())
}
