//! Width, ascent and descent of text in a simple font.

use crate::encoding_table::EncodingTable;
use crate::metrics::GlyphMetrics;
use crate::unicode_norm::UnicodeNorm;

/// Measures text against a resolved encoding and a metrics provider.
///
/// Text is encoded through the table's reverse index first; characters the
/// font cannot encode contribute nothing. Ascent never drops below 0 and
/// descent never rises above 0, so empty or unencodable text measures 0.
pub struct TextMetrics<'a, M: GlyphMetrics + ?Sized> {
    table: &'a EncodingTable,
    metrics: &'a M,
    norm: UnicodeNorm,
}

impl<'a, M: GlyphMetrics + ?Sized> TextMetrics<'a, M> {
    /// Create a measurer with no normalization.
    pub fn new(table: &'a EncodingTable, metrics: &'a M) -> Self {
        Self {
            table,
            metrics,
            norm: UnicodeNorm::None,
        }
    }

    /// Normalize text before encoding it (builder pattern).
    pub fn with_normalization(mut self, norm: UnicodeNorm) -> Self {
        self.norm = norm;
        self
    }

    /// Codes for `text` after normalization.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        self.table.encode(&self.norm.normalize(text))
    }

    fn encode_char(&self, ch: char) -> Option<u8> {
        self.table.code(ch)
    }

    /// Total advance width of `text`.
    pub fn width(&self, text: &str) -> i32 {
        self.encode(text)
            .into_iter()
            .map(|code| self.metrics.width(code))
            .sum()
    }

    /// Advance width of a single character.
    pub fn char_width(&self, ch: char) -> i32 {
        self.encode_char(ch)
            .map(|code| self.metrics.width(code))
            .unwrap_or(0)
    }

    /// Highest point of `text` above the baseline, at least 0.
    pub fn ascent(&self, text: &str) -> i32 {
        self.encode(text)
            .into_iter()
            .fold(0, |max, code| max.max(self.code_ascent(code)))
    }

    /// Highest point of a single character, at least 0.
    pub fn char_ascent(&self, ch: char) -> i32 {
        self.encode_char(ch)
            .map_or(0, |code| self.code_ascent(code).max(0))
    }

    /// Lowest point of `text` below the baseline, at most 0.
    pub fn descent(&self, text: &str) -> i32 {
        self.encode(text)
            .into_iter()
            .fold(0, |min, code| min.min(self.code_descent(code)))
    }

    /// Lowest point of a single character, at most 0.
    pub fn char_descent(&self, ch: char) -> i32 {
        self.encode_char(ch)
            .map_or(0, |code| self.code_descent(code).min(0))
    }

    fn code_ascent(&self, code: u8) -> i32 {
        match self.metrics.glyph_extent(code) {
            Some(extent) => extent.ury,
            None => self.metrics.typo_ascender(),
        }
    }

    fn code_descent(&self, code: u8) -> i32 {
        match self.metrics.glyph_extent(code) {
            Some(extent) => extent.lly,
            None => self.metrics.typo_descender(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FontMetrics, GlyphMetricsSummary};
    use crate::resolver::{EncodingSource, EncodingSpec, resolve_encoding};

    fn standard() -> EncodingTable {
        resolve_encoding(&EncodingSpec::new(EncodingSource::Absent), None).value
    }

    fn win_ansi() -> EncodingTable {
        let spec = EncodingSpec::new(EncodingSource::Named("WinAnsiEncoding".into()));
        resolve_encoding(&spec, None).value
    }

    fn summary(ascender: i32, descender: i32) -> GlyphMetricsSummary {
        GlyphMetricsSummary {
            typo_ascender: ascender,
            typo_descender: descender,
            ..GlyphMetricsSummary::default()
        }
    }

    #[test]
    fn width_sums_per_code_widths() {
        let table = standard();
        let metrics = FontMetrics::new(vec![500, 600], 65, 66, 0);
        let query = TextMetrics::new(&table, &metrics);
        assert_eq!(query.width("AB"), 1100);
        assert_eq!(query.char_width('B'), 600);
    }

    #[test]
    fn width_uses_missing_width_and_skips_unencodable() {
        let table = standard();
        let metrics = FontMetrics::new(vec![500], 65, 65, 250);
        let query = TextMetrics::new(&table, &metrics);
        assert_eq!(query.width("AZ"), 750);
        assert_eq!(query.width("A\u{4E2D}"), 500);
        assert_eq!(query.char_width('\u{4E2D}'), 0);
    }

    #[test]
    fn empty_text_measures_zero() {
        let table = standard();
        let metrics = FontMetrics::new(vec![500], 65, 65, 250).with_summary(summary(700, -200));
        let query = TextMetrics::new(&table, &metrics);
        assert_eq!(query.width(""), 0);
        assert_eq!(query.ascent(""), 0);
        assert_eq!(query.descent(""), 0);
    }

    #[test]
    fn ascent_and_descent_prefer_glyph_extents() {
        let table = standard();
        let metrics = FontMetrics::default()
            .with_summary(summary(718, -207))
            .with_glyph_extent(b'a', -15, 538)
            .with_glyph_extent(b'g', -220, 538);
        let query = TextMetrics::new(&table, &metrics);
        assert_eq!(query.ascent("ag"), 538);
        assert_eq!(query.descent("ag"), -220);
        assert_eq!(query.char_descent('a'), -15);
        // 'x' has no glyph data and falls back to the font-wide values.
        assert_eq!(query.ascent("ax"), 718);
        assert_eq!(query.char_ascent('x'), 718);
        assert_eq!(query.char_descent('x'), -207);
    }

    #[test]
    fn ascent_is_never_negative_and_descent_never_positive() {
        let table = standard();
        let metrics = FontMetrics::default()
            .with_summary(summary(-50, 40))
            .with_glyph_extent(b'-', 220, 300)
            .with_glyph_extent(b'_', -300, -100);
        let query = TextMetrics::new(&table, &metrics);
        assert_eq!(query.ascent("_"), 0);
        assert_eq!(query.char_ascent('_'), 0);
        assert_eq!(query.descent("-"), 0);
        assert_eq!(query.char_descent('-'), 0);
        assert_eq!(query.ascent("zz"), 0);
        assert_eq!(query.descent("zz"), 0);
    }

    #[test]
    fn unencodable_text_measures_zero() {
        let table = standard();
        let metrics = FontMetrics::default().with_summary(summary(700, -200));
        let query = TextMetrics::new(&table, &metrics);
        assert_eq!(query.ascent("\u{4E2D}"), 0);
        assert_eq!(query.descent("\u{4E2D}"), 0);
    }

    #[test]
    fn normalization_composes_before_encoding() {
        let table = win_ansi();
        let metrics = FontMetrics::new(vec![444], 0xE9, 0xE9, 0);
        let decomposed = "e\u{0301}";

        let plain = TextMetrics::new(&table, &metrics);
        // 'e' has no width entry and the combining accent has no code.
        assert_eq!(plain.width(decomposed), 0);

        let composed = TextMetrics::new(&table, &metrics).with_normalization(UnicodeNorm::Nfc);
        assert_eq!(composed.encode(decomposed), vec![0xE9]);
        assert_eq!(composed.width(decomposed), 444);
    }

    #[test]
    fn works_through_trait_objects() {
        let table = standard();
        let metrics = FontMetrics::new(vec![500, 600], 65, 66, 0);
        let provider: &dyn GlyphMetrics = &metrics;
        let query = TextMetrics::new(&table, provider);
        assert_eq!(query.width("BA"), 1100);
    }
}
