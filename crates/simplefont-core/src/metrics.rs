//! Glyph metrics for simple fonts.
//!
//! [`GlyphMetrics`] is the query side used by text measurement; [`FontMetrics`]
//! is the concrete provider filled from `/Widths` and the font descriptor.
//! All values are in glyph space units (1/1000 of text space).

use std::collections::BTreeMap;

/// A font bounding box `[llx lly urx ury]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontBBox {
    /// Lower-left x.
    pub llx: i32,
    /// Lower-left y.
    pub lly: i32,
    /// Upper-right x.
    pub urx: i32,
    /// Upper-right y.
    pub ury: i32,
}

impl FontBBox {
    /// Create a box from its four coordinates, as given.
    pub fn new(llx: i32, lly: i32, urx: i32, ury: i32) -> Self {
        Self { llx, lly, urx, ury }
    }

    /// Swap coordinates per axis so that `llx <= urx` and `lly <= ury`.
    pub fn normalized(self) -> Self {
        Self {
            llx: self.llx.min(self.urx),
            lly: self.lly.min(self.ury),
            urx: self.llx.max(self.urx),
            ury: self.lly.max(self.ury),
        }
    }

    /// Width of the box (`urx - llx`).
    pub fn width(&self) -> i32 {
        self.urx - self.llx
    }

    /// Height of the box (`ury - lly`).
    pub fn height(&self) -> i32 {
        self.ury - self.lly
    }
}

/// Font-wide metrics taken from the font descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphMetricsSummary {
    /// `/Ascent`.
    pub typo_ascender: i32,
    /// `/Descent`.
    pub typo_descender: i32,
    /// `/CapHeight`.
    pub cap_height: i32,
    /// `/ItalicAngle`.
    pub italic_angle: i32,
    /// `/StemV`.
    pub stem_v: i32,
    /// `/XHeight`.
    pub x_height: i32,
    /// `/FontBBox`, always normalized.
    pub bbox: FontBBox,
}

/// Vertical extent of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphExtent {
    /// Lowest point of the glyph.
    pub lly: i32,
    /// Highest point of the glyph.
    pub ury: i32,
}

/// Per-code metrics queried by text measurement.
pub trait GlyphMetrics {
    /// Advance width of `code`.
    fn width(&self, code: u8) -> i32;

    /// Vertical extent of `code`, if the font has glyph data for it.
    fn glyph_extent(&self, code: u8) -> Option<GlyphExtent>;

    /// Font-wide ascender, used for codes without glyph data.
    fn typo_ascender(&self) -> i32;

    /// Font-wide descender, used for codes without glyph data.
    fn typo_descender(&self) -> i32;
}

/// Metrics of a simple font.
///
/// Widths cover `first_char..=last_char`; codes outside that range, or past
/// the end of the widths array, use the missing width.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    summary: GlyphMetricsSummary,
    widths: Vec<i32>,
    first_char: u32,
    last_char: u32,
    missing_width: i32,
    glyph_extents: BTreeMap<u8, GlyphExtent>,
}

impl FontMetrics {
    /// Create metrics from a `/Widths` array and its code range.
    pub fn new(widths: Vec<i32>, first_char: u32, last_char: u32, missing_width: i32) -> Self {
        Self {
            summary: GlyphMetricsSummary::default(),
            widths,
            first_char,
            last_char,
            missing_width,
            glyph_extents: BTreeMap::new(),
        }
    }

    /// Replace the font-wide summary (builder pattern).
    pub fn with_summary(mut self, summary: GlyphMetricsSummary) -> Self {
        self.summary = summary;
        self
    }

    /// Record the vertical extent of one glyph (builder pattern).
    pub fn with_glyph_extent(mut self, code: u8, lly: i32, ury: i32) -> Self {
        self.glyph_extents.insert(code, GlyphExtent { lly, ury });
        self
    }

    /// Width of `code`, falling back to the missing width.
    pub fn get_width(&self, code: u32) -> i32 {
        if code >= self.first_char && code <= self.last_char {
            let index = (code - self.first_char) as usize;
            if let Some(&width) = self.widths.get(index) {
                return width;
            }
        }
        self.missing_width
    }

    /// Font-wide summary.
    pub fn summary(&self) -> &GlyphMetricsSummary {
        &self.summary
    }

    /// Mutable font-wide summary, for descriptor projection.
    pub fn summary_mut(&mut self) -> &mut GlyphMetricsSummary {
        &mut self.summary
    }

    /// Widths array, starting at [`first_char`](Self::first_char).
    pub fn widths(&self) -> &[i32] {
        &self.widths
    }

    /// First code covered by the widths array.
    pub fn first_char(&self) -> u32 {
        self.first_char
    }

    /// Last code covered by the widths array.
    pub fn last_char(&self) -> u32 {
        self.last_char
    }

    /// Width used for codes without an entry.
    pub fn missing_width(&self) -> i32 {
        self.missing_width
    }

    /// Set the width used for codes without an entry.
    pub fn set_missing_width(&mut self, width: i32) {
        self.missing_width = width;
    }
}

impl GlyphMetrics for FontMetrics {
    fn width(&self, code: u8) -> i32 {
        self.get_width(u32::from(code))
    }

    fn glyph_extent(&self, code: u8) -> Option<GlyphExtent> {
        self.glyph_extents.get(&code).copied()
    }

    fn typo_ascender(&self) -> i32 {
        self.summary.typo_ascender
    }

    fn typo_descender(&self) -> i32 {
        self.summary.typo_descender
    }
}

/// Identification data for a loaded font.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontIdentification {
    /// The font's `/BaseFont`, or the descriptor's `/FontName` when only a
    /// descriptor is projected.
    pub font_name: Option<String>,
    /// The 12-byte `/Panose` string from `/Style`, untouched.
    pub panose: Option<Vec<u8>>,
}
