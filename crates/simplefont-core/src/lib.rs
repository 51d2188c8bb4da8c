//! simplefont-core: Backend-independent encoding and metrics for simple fonts.
//!
//! Resolves the encoding of a single-byte PDF font into an [`EncodingTable`]
//! and measures text against it. Nothing here touches a PDF document; the
//! `simplefont-parse` crate reads font dictionaries and feeds these types.

pub mod encoding;
pub mod encoding_table;
pub mod error;
pub mod fallback;
pub mod glyph_list;
pub mod metrics;
pub mod resolver;
pub mod standard_fonts;
pub mod text_metrics;
pub mod unicode_norm;

pub use encoding::BaseEncoding;
pub use encoding_table::EncodingTable;
pub use error::{FontError, FontOptions, FontResult, FontWarning, FontWarningCode};
pub use fallback::{EmptyFallback, MapFallback, UnicodeFallback};
pub use glyph_list::glyph_name_to_char;
pub use metrics::{
    FontBBox, FontIdentification, FontMetrics, GlyphExtent, GlyphMetrics, GlyphMetricsSummary,
};
pub use resolver::{Difference, EncodingSource, EncodingSpec, resolve_encoding};
pub use standard_fonts::{is_standard_font, strip_subset_tag};
pub use text_metrics::TextMetrics;
pub use unicode_norm::UnicodeNorm;
