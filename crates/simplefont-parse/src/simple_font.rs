//! Loading a simple (single-byte) font from a PDF font dictionary.
//!
//! [`SimpleFont::load`] reads a Type1/TrueType/Type3-style font dictionary,
//! writes a projected copy of it into the object store and resolves the
//! encoding, widths and descriptor metrics needed to measure text.

use lopdf::{Dictionary, Object, ObjectId};
use simplefont_core::{
    EncodingSource, EncodingTable, FontError, FontIdentification, FontMetrics, FontOptions,
    FontResult, FontWarning, FontWarningCode, TextMetrics, UnicodeFallback, UnicodeNorm,
    resolve_encoding,
};
use tracing::{debug, warn};

use crate::cmap::ToUnicodeCMap;
use crate::descriptor::DescriptorProjection;
use crate::error::BackendError;
use crate::font_encoding::read_encoding_spec;
use crate::font_metrics::{char_range, extract_font_metrics};
use crate::object_store::{ObjectStore, decode_stream, get_resolved, object_kind, object_to_name};

/// A loaded simple font.
///
/// Immutable after loading. Text is measured in glyph space units (1/1000 of
/// text space).
#[derive(Debug, Clone)]
pub struct SimpleFont {
    font_dict_id: ObjectId,
    base_font: Option<String>,
    subtype: Option<String>,
    symbolic: bool,
    encoding: EncodingTable,
    metrics: FontMetrics,
    identification: FontIdentification,
    to_unicode: Option<ToUnicodeCMap>,
    descriptor_id: Option<ObjectId>,
    norm: UnicodeNorm,
}

impl SimpleFont {
    /// Load a simple font from `font_dict`.
    ///
    /// The projected font dictionary (`/Type /Font`, `/Subtype`, `/BaseFont`,
    /// `/Encoding`, `/FirstChar`+`/LastChar`, `/Widths`, `/ToUnicode`,
    /// `/FontDescriptor`) is added to `store` as a new indirect object. The
    /// cloned ToUnicode stream and the projected descriptor are flushed.
    ///
    /// Malformed parts degrade with warnings. With
    /// [`FontOptions::strict_mode`] the first warning is returned as an error
    /// instead, and nothing is written to `store`. With
    /// [`FontOptions::collect_warnings`] off, warnings are dropped.
    pub fn load<S: ObjectStore + ?Sized>(
        store: &mut S,
        font_dict: &Dictionary,
        options: &FontOptions,
    ) -> Result<FontResult<Self>, BackendError> {
        let mut warnings = Vec::new();
        let spec = read_encoding_spec(&*store, font_dict).drain_into(&mut warnings);
        let subtype = get_resolved(&*store, font_dict, b"Subtype").and_then(object_to_name);

        let mut to = Dictionary::new();
        to.set("Type", Object::Name(b"Font".to_vec()));
        if let Some(ref subtype) = subtype {
            to.set("Subtype", Object::Name(subtype.as_bytes().to_vec()));
        }
        if let Some(ref base_font) = spec.base_font {
            to.set("BaseFont", Object::Name(base_font.as_bytes().to_vec()));
        }
        if let Some(encoding) = project_encoding(&*store, font_dict, &spec.source) {
            to.set("Encoding", encoding);
        }

        if char_range(&*store, font_dict).is_some() {
            for key in ["FirstChar", "LastChar"] {
                if let Some(obj) = get_resolved(&*store, font_dict, key.as_bytes()) {
                    to.set(key, obj.clone());
                }
            }
        }
        if let Some(widths @ Object::Array(_)) = get_resolved(&*store, font_dict, b"Widths") {
            to.set("Widths", widths.clone());
        }
        let mut metrics = extract_font_metrics(&*store, font_dict).drain_into(&mut warnings);

        let mut to_unicode_stream = None;
        let to_unicode = match get_resolved(&*store, font_dict, b"ToUnicode") {
            None => None,
            Some(Object::Stream(stream)) => {
                let cmap = match decode_stream(stream)
                    .and_then(|data| ToUnicodeCMap::parse_with_limit(&data, options.max_tounicode_bytes))
                {
                    Ok(cmap) => Some(cmap),
                    Err(err) => {
                        debug!(%err, "ignoring unreadable ToUnicode stream");
                        warnings.push(to_unicode_warning(&err));
                        None
                    }
                };
                to_unicode_stream = Some(stream.clone());
                cmap
            }
            Some(other) => {
                debug!(kind = object_kind(other), "ToUnicode is not a stream");
                warnings.push(FontWarning::with_code(
                    FontWarningCode::MalformedToUnicode,
                    format!("/ToUnicode is a {}, expected a stream", object_kind(other)),
                ));
                None
            }
        };

        let mut identification = FontIdentification::default();
        let descriptor = match get_resolved(&*store, font_dict, b"FontDescriptor") {
            Some(Object::Dictionary(from)) => {
                match DescriptorProjection::build(&*store, from, &mut metrics, &mut identification) {
                    Ok(projection) => Some(projection.drain_into(&mut warnings)),
                    Err(BackendError::Core(FontError::DescriptorError(msg))) => {
                        debug!(%msg, "skipping font descriptor");
                        warnings.push(FontWarning::with_code(FontWarningCode::MalformedObject, msg));
                        None
                    }
                    Err(err) => return Err(err),
                }
            }
            Some(other) => {
                debug!(kind = object_kind(other), "FontDescriptor is not a dictionary");
                warnings.push(FontWarning::with_code(
                    FontWarningCode::MalformedObject,
                    format!("/FontDescriptor is a {}, expected a dictionary", object_kind(other)),
                ));
                None
            }
            None => None,
        };
        if let Some(ref name) = spec.base_font {
            identification.font_name = Some(name.clone());
        }

        let fallback = to_unicode.as_ref().map(|cmap| cmap as &dyn UnicodeFallback);
        let encoding = resolve_encoding(&spec, fallback).drain_into(&mut warnings);

        if let Some(ref name) = spec.base_font {
            warnings = warnings.into_iter().map(|w| w.in_font(name.clone())).collect();
        }
        if options.strict_mode {
            if let Some(first) = warnings.first() {
                warn!(warning = %first, "strict mode: font rejected");
                return Err(BackendError::Core(first.to_error()));
            }
        }

        if let Some(stream) = to_unicode_stream {
            let id = store.add_object(Object::Stream(stream));
            store.flush(id);
            to.set("ToUnicode", Object::Reference(id));
        }
        let descriptor_id = descriptor.map(|projection| {
            let id = projection.write(store);
            to.set("FontDescriptor", Object::Reference(id));
            id
        });
        let font_dict_id = store.add_object(Object::Dictionary(to));

        if !options.collect_warnings {
            warnings.clear();
        }

        let font = Self {
            font_dict_id,
            base_font: spec.base_font,
            subtype,
            symbolic: spec.symbolic,
            encoding,
            metrics,
            identification,
            to_unicode,
            descriptor_id,
            norm: options.unicode_norm,
        };
        Ok(FontResult::with_warnings(font, warnings))
    }

    fn text_metrics(&self) -> TextMetrics<'_, FontMetrics> {
        TextMetrics::new(&self.encoding, &self.metrics).with_normalization(self.norm)
    }

    /// Total advance width of `text`.
    pub fn width(&self, text: &str) -> i32 {
        self.text_metrics().width(text)
    }

    /// Advance width of one character; 0 if the font cannot encode it.
    pub fn char_width(&self, ch: char) -> i32 {
        self.text_metrics().char_width(ch)
    }

    /// Highest point of `text` above the baseline, at least 0.
    pub fn ascent(&self, text: &str) -> i32 {
        self.text_metrics().ascent(text)
    }

    /// Highest point of one character, at least 0.
    pub fn char_ascent(&self, ch: char) -> i32 {
        self.text_metrics().char_ascent(ch)
    }

    /// Lowest point of `text` below the baseline, at most 0.
    pub fn descent(&self, text: &str) -> i32 {
        self.text_metrics().descent(text)
    }

    /// Lowest point of one character, at most 0.
    pub fn char_descent(&self, ch: char) -> i32 {
        self.text_metrics().char_descent(ch)
    }

    /// Codes for `text`, skipping characters the font cannot encode.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        self.text_metrics().encode(text)
    }

    /// Text for a string of codes.
    pub fn decode(&self, codes: &[u8]) -> String {
        self.encoding.decode(codes)
    }

    /// Id of the projected font dictionary.
    pub fn font_dict_id(&self) -> ObjectId {
        self.font_dict_id
    }

    /// Id of the projected font descriptor, if the font had one.
    pub fn descriptor_id(&self) -> Option<ObjectId> {
        self.descriptor_id
    }

    /// `/BaseFont`, subset tag included.
    pub fn base_font(&self) -> Option<&str> {
        self.base_font.as_deref()
    }

    /// `/Subtype`, e.g. `Type1` or `TrueType`.
    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    /// True if the descriptor flags the font as symbolic.
    pub fn is_symbolic(&self) -> bool {
        self.symbolic
    }

    /// The resolved encoding.
    pub fn encoding(&self) -> &EncodingTable {
        &self.encoding
    }

    /// Widths and descriptor metrics.
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// `/BaseFont` as the font name, and the descriptor's panose.
    pub fn identification(&self) -> &FontIdentification {
        &self.identification
    }

    /// The parsed ToUnicode map, if the font had a readable one.
    pub fn to_unicode(&self) -> Option<&ToUnicodeCMap> {
        self.to_unicode.as_ref()
    }
}

/// Build the projected `/Encoding` entry.
///
/// Names are copied. Dictionaries are rebuilt as `/Type /Encoding` with the
/// source `/Differences` and `/BaseEncoding`.
fn project_encoding<S: ObjectStore + ?Sized>(
    store: &S,
    font_dict: &Dictionary,
    source: &EncodingSource,
) -> Option<Object> {
    match source {
        EncodingSource::Absent => None,
        EncodingSource::Named(name) => Some(Object::Name(name.as_bytes().to_vec())),
        EncodingSource::Dictionary { base_encoding, .. } => {
            let mut enc = Dictionary::new();
            enc.set("Type", Object::Name(b"Encoding".to_vec()));
            let differences = get_resolved(store, font_dict, b"Encoding")
                .and_then(|obj| obj.as_dict().ok())
                .and_then(|dict| get_resolved(store, dict, b"Differences"));
            if let Some(diff @ Object::Array(_)) = differences {
                enc.set("Differences", diff.clone());
            }
            if let Some(base) = base_encoding {
                enc.set("BaseEncoding", Object::Name(base.as_bytes().to_vec()));
            }
            Some(Object::Dictionary(enc))
        }
    }
}

fn to_unicode_warning(err: &BackendError) -> FontWarning {
    let code = match err {
        BackendError::Core(FontError::ResourceLimitExceeded { .. }) => {
            FontWarningCode::ResourceLimitReached
        }
        _ => FontWarningCode::MalformedToUnicode,
    };
    FontWarning::with_code(code, format!("ToUnicode ignored: {err}"))
}
