//! Encoding resolution for simple fonts.
//!
//! Turns a font's encoding description into an [`EncodingTable`] in tiers:
//!
//! 1. a base table: identity for symbolic fonts with no base encoding, one of
//!    the four selectable built-in encodings, or StandardEncoding;
//! 2. the ToUnicode overlay, for non-symbolic, non-standard fonts that carry
//!    no `/Encoding` at all;
//! 3. the `/Differences` array, resolved through the glyph list and then the
//!    fallback table.

use crate::encoding::{ALL_CODES, BaseEncoding};
use crate::encoding_table::EncodingTable;
use crate::error::{FontResult, FontWarning, FontWarningCode};
use crate::fallback::UnicodeFallback;
use crate::glyph_list::glyph_name_to_char;
use crate::standard_fonts::{is_standard_font, strip_subset_tag};

/// One entry of a `/Differences` array.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difference {
    /// Move the cursor to this code.
    Code(i64),
    /// Assign this glyph name to the cursor, then advance it.
    Name(String),
}

/// Where a font's encoding comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodingSource {
    /// The font dictionary has no `/Encoding` entry.
    #[default]
    Absent,
    /// `/Encoding` is a name.
    Named(String),
    /// `/Encoding` is an encoding dictionary.
    Dictionary {
        /// `/BaseEncoding`, if present.
        base_encoding: Option<String>,
        /// `/Differences`, in array order.
        differences: Vec<Difference>,
    },
}

/// Everything the resolver needs to know about a simple font's encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodingSpec {
    /// The `/Encoding` entry.
    pub source: EncodingSource,
    /// The symbolic flag from the font descriptor.
    pub symbolic: bool,
    /// The `/BaseFont` name, subset tag included.
    pub base_font: Option<String>,
}

impl EncodingSpec {
    /// Create a non-symbolic spec with no base font name.
    pub fn new(source: EncodingSource) -> Self {
        Self {
            source,
            symbolic: false,
            base_font: None,
        }
    }

    /// Set the symbolic flag (builder pattern).
    pub fn symbolic(mut self, symbolic: bool) -> Self {
        self.symbolic = symbolic;
        self
    }

    /// Set the base font name (builder pattern).
    pub fn base_font(mut self, name: impl Into<String>) -> Self {
        self.base_font = Some(name.into());
        self
    }

    /// True if the base font is one of the standard 14 fonts.
    pub fn is_standard_font(&self) -> bool {
        self.base_font.as_deref().is_some_and(is_standard_font)
    }

    /// The name that selects the base table.
    ///
    /// This is the `/Encoding` name, the dictionary's `/BaseEncoding`, or,
    /// for a standard font with no `/Encoding`, the base font name itself.
    pub fn selector(&self) -> Option<&str> {
        match &self.source {
            EncodingSource::Named(name) => Some(name),
            EncodingSource::Dictionary { base_encoding, .. } => base_encoding.as_deref(),
            EncodingSource::Absent => self
                .base_font
                .as_deref()
                .filter(|name| is_standard_font(name))
                .map(strip_subset_tag),
        }
    }

    fn differences(&self) -> &[Difference] {
        match &self.source {
            EncodingSource::Dictionary { differences, .. } => differences,
            _ => &[],
        }
    }
}

/// Resolve a simple font's encoding.
///
/// `fallback` is the font's ToUnicode table; `None` behaves like an empty
/// table. The result always holds a total table. Warnings report
/// `/Differences` names that resolved to nothing and names addressed to a
/// cursor outside `0..=255`; those assignments are dropped but the cursor
/// still advances.
pub fn resolve_encoding(
    spec: &EncodingSpec,
    fallback: Option<&dyn UnicodeFallback>,
) -> FontResult<EncodingTable> {
    let mut table = EncodingTable::default();
    let mut warnings = Vec::new();

    let selector = spec.selector();
    match selector.and_then(BaseEncoding::from_name) {
        Some(encoding) => fill_from(&mut table, encoding),
        None if selector.is_none() && spec.symbolic => {
            for code in ALL_CODES {
                table.set_base(code, char::from(code));
            }
        }
        None => {
            fill_from(&mut table, BaseEncoding::Standard);
            let overlay = matches!(spec.source, EncodingSource::Absent)
                && !spec.symbolic
                && !spec.is_standard_font();
            if overlay {
                if let Some(fallback) = fallback {
                    apply_fallback_overlay(&mut table, fallback);
                }
            }
        }
    }

    apply_differences(&mut table, spec.differences(), fallback, &mut warnings);

    if let Some(name) = &spec.base_font {
        warnings = warnings.into_iter().map(|w| w.in_font(name)).collect();
    }
    FontResult::with_warnings(table.seal(), warnings)
}

fn fill_from(table: &mut EncodingTable, encoding: BaseEncoding) {
    table.set_base_encoding(encoding);
    for (code, ch) in ALL_CODES.into_iter().zip(encoding.decode_all()) {
        table.set_base(code, ch);
    }
}

fn apply_fallback_overlay(table: &mut EncodingTable, fallback: &dyn UnicodeFallback) {
    for (&ch, &code) in fallback.reverse_mapping() {
        if let Ok(code) = u8::try_from(code) {
            table.apply_override(code, ch, None);
        }
    }
}

fn apply_differences(
    table: &mut EncodingTable,
    differences: &[Difference],
    fallback: Option<&dyn UnicodeFallback>,
    warnings: &mut Vec<FontWarning>,
) {
    let mut cursor: Option<i64> = None;
    for entry in differences {
        match entry {
            Difference::Code(code) => cursor = Some(*code),
            Difference::Name(name) => {
                match cursor {
                    None => warnings.push(FontWarning::with_code(
                        FontWarningCode::MalformedEncoding,
                        format!("glyph name /{name} precedes any code in /Differences"),
                    )),
                    Some(position) => match u8::try_from(position) {
                        Ok(code) => assign_name(table, code, name, fallback, warnings),
                        Err(_) => warnings.push(
                            FontWarning::with_code(
                                FontWarningCode::MalformedEncoding,
                                format!("/Differences code for /{name} is outside 0..=255"),
                            )
                            .at_code(position),
                        ),
                    },
                }
                cursor = cursor.map(|position| position.saturating_add(1));
            }
        }
    }
}

fn assign_name(
    table: &mut EncodingTable,
    code: u8,
    name: &str,
    fallback: Option<&dyn UnicodeFallback>,
    warnings: &mut Vec<FontWarning>,
) {
    if let Some(ch) = glyph_name_to_char(name) {
        table.apply_override(code, ch, Some(name.to_string()));
        return;
    }
    match fallback.and_then(|cmap| cmap.single_char(code)) {
        Some(ch) => table.apply_override(code, ch, Some(ch.to_string())),
        None => warnings.push(
            FontWarning::with_code(
                FontWarningCode::UnresolvedGlyphName,
                format!("glyph name /{name} does not resolve to a character"),
            )
            .at_code(i64::from(code)),
        ),
    }
}
