//! Font descriptor projection.
//!
//! [`project_descriptor`] copies a whitelisted subset of a source
//! `/FontDescriptor` into a new indirect object and feeds the numeric fields
//! into the font's [`FontMetrics`] and [`FontIdentification`].

use lopdf::{Dictionary, Object, ObjectId, Stream};
use simplefont_core::{
    FontBBox, FontError, FontIdentification, FontMetrics, FontResult, FontWarning,
    FontWarningCode,
};
use tracing::debug;

use crate::error::BackendError;
use crate::object_store::{
    ObjectStore, get_resolved, object_kind, object_to_i32, object_to_name, resolve_ref,
};

/// Numeric entries copied as-is.
const NUMERIC_KEYS: [&str; 10] = [
    "Ascent",
    "Descent",
    "CapHeight",
    "ItalicAngle",
    "StemV",
    "FontWeight",
    "Flags",
    "Leading",
    "MissingWidth",
    "XHeight",
];

/// Embedded font programs, cloned as opaque streams.
const FONT_FILE_KEYS: [&str; 3] = ["FontFile", "FontFile2", "FontFile3"];

/// Project `from` into a new font descriptor stored in `store`.
///
/// The new descriptor is `/Type /FontDescriptor` plus whichever whitelisted
/// entries `from` carries, references resolved. Embedded font files become
/// new indirect streams. Both the font files and the descriptor itself are
/// flushed before returning the descriptor's id.
///
/// Entries of the wrong type are left out with a
/// [`FontWarningCode::MalformedObject`] warning. A `/FontBBox` with fewer
/// than four numbers is still copied but leaves the summary box unchanged.
/// A `/Type` other than `/FontDescriptor` is a
/// [`FontError::DescriptorError`]; nothing is written in that case.
pub fn project_descriptor<S: ObjectStore + ?Sized>(
    store: &mut S,
    from: &Dictionary,
    metrics: &mut FontMetrics,
    identification: &mut FontIdentification,
) -> Result<FontResult<ObjectId>, BackendError> {
    let projection = DescriptorProjection::build(&*store, from, metrics, identification)?;
    Ok(projection.map(|projection| projection.write(store)))
}

/// A projected font descriptor that has not been written to a store yet.
///
/// Lets a caller inspect the warnings before committing any objects.
#[derive(Debug, Clone)]
pub struct DescriptorProjection {
    dict: Dictionary,
    font_files: Vec<(&'static str, Stream)>,
}

impl DescriptorProjection {
    /// Read `from`, updating `metrics` and `identification`.
    ///
    /// Fails before touching either when `from` declares a `/Type` other
    /// than `/FontDescriptor`.
    pub fn build<S: ObjectStore + ?Sized>(
        store: &S,
        from: &Dictionary,
        metrics: &mut FontMetrics,
        identification: &mut FontIdentification,
    ) -> Result<FontResult<Self>, BackendError> {
        match get_resolved(store, from, b"Type") {
            None => {}
            Some(Object::Name(name)) if name == b"FontDescriptor" => {}
            Some(other) => {
                let found = object_to_name(other).unwrap_or_else(|| object_kind(other).to_string());
                return Err(BackendError::Core(FontError::DescriptorError(format!(
                    "expected /Type /FontDescriptor, found {found}"
                ))));
            }
        }

        let mut warnings = Vec::new();
        let mut to = Dictionary::new();
        to.set("Type", Object::Name(b"FontDescriptor".to_vec()));

        copy_name(store, from, &mut to, "FontName", &mut warnings);
        copy_name(store, from, &mut to, "Subtype", &mut warnings);
        if let Ok(Object::Name(name)) = to.get(b"FontName") {
            identification.font_name = Some(String::from_utf8_lossy(name).into_owned());
        }

        for key in NUMERIC_KEYS {
            let Some(value) = copy_number(store, from, &mut to, key, &mut warnings) else {
                continue;
            };
            match key {
                "Ascent" => metrics.summary_mut().typo_ascender = value,
                "Descent" => metrics.summary_mut().typo_descender = value,
                "CapHeight" => metrics.summary_mut().cap_height = value,
                "ItalicAngle" => metrics.summary_mut().italic_angle = value,
                "StemV" => metrics.summary_mut().stem_v = value,
                "XHeight" => metrics.summary_mut().x_height = value,
                "MissingWidth" => metrics.set_missing_width(value),
                _ => {}
            }
        }

        let mut font_files = Vec::new();
        for key in FONT_FILE_KEYS {
            match get_resolved(store, from, key.as_bytes()) {
                None => {}
                Some(Object::Stream(stream)) => font_files.push((key, stream.clone())),
                Some(other) => {
                    warnings.push(wrong_type(key, "stream", other));
                }
            }
        }

        copy_name(store, from, &mut to, "FontStretch", &mut warnings);
        match get_resolved(store, from, b"FontFamily") {
            None => {}
            Some(family @ Object::String(..)) => to.set("FontFamily", family.clone()),
            Some(other) => warnings.push(wrong_type("FontFamily", "string", other)),
        }

        if let Some(style) = project_style(store, from, identification, &mut warnings) {
            to.set("Style", Object::Dictionary(style));
        }

        if let Some(bbox) = get_resolved(store, from, b"FontBBox") {
            to.set("FontBBox", bbox.clone());
            match read_bbox(store, bbox) {
                Some(bbox) => metrics.summary_mut().bbox = bbox.normalized(),
                None => {
                    debug!("/FontBBox does not hold four numbers");
                    warnings.push(FontWarning::with_code(
                        FontWarningCode::MalformedObject,
                        "/FontBBox does not hold four numbers",
                    ));
                }
            }
        }

        Ok(FontResult::with_warnings(
            Self {
                dict: to,
                font_files,
            },
            warnings,
        ))
    }

    /// The descriptor dictionary, without font file references.
    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    /// Add the font files and the descriptor to `store`, flushing each.
    pub fn write<S: ObjectStore + ?Sized>(self, store: &mut S) -> ObjectId {
        let mut dict = self.dict;
        for (key, stream) in self.font_files {
            let id = store.add_object(Object::Stream(stream));
            store.flush(id);
            dict.set(key, Object::Reference(id));
        }
        let id = store.add_object(Object::Dictionary(dict));
        store.flush(id);
        id
    }
}

fn copy_name<S: ObjectStore + ?Sized>(
    store: &S,
    from: &Dictionary,
    to: &mut Dictionary,
    key: &str,
    warnings: &mut Vec<FontWarning>,
) {
    match get_resolved(store, from, key.as_bytes()) {
        None => {}
        Some(name @ Object::Name(_)) => to.set(key, name.clone()),
        Some(other) => warnings.push(wrong_type(key, "name", other)),
    }
}

/// Copy a numeric entry and return its integer value.
fn copy_number<S: ObjectStore + ?Sized>(
    store: &S,
    from: &Dictionary,
    to: &mut Dictionary,
    key: &str,
    warnings: &mut Vec<FontWarning>,
) -> Option<i32> {
    let obj = get_resolved(store, from, key.as_bytes())?;
    match object_to_i32(obj) {
        Some(value) => {
            to.set(key, obj.clone());
            Some(value)
        }
        None => {
            warnings.push(wrong_type(key, "number", obj));
            None
        }
    }
}

fn project_style<S: ObjectStore + ?Sized>(
    store: &S,
    from: &Dictionary,
    identification: &mut FontIdentification,
    warnings: &mut Vec<FontWarning>,
) -> Option<Dictionary> {
    let style = match get_resolved(store, from, b"Style")? {
        Object::Dictionary(style) => style,
        other => {
            warnings.push(wrong_type("Style", "dictionary", other));
            return None;
        }
    };
    let mut to_style = Dictionary::new();
    match get_resolved(store, style, b"Panose") {
        Some(panose @ Object::String(bytes, _)) => {
            identification.panose = Some(bytes.clone());
            to_style.set("Panose", panose.clone());
        }
        Some(other) => warnings.push(wrong_type("Panose", "string", other)),
        None => {}
    }
    Some(to_style)
}

fn read_bbox<S: ObjectStore + ?Sized>(store: &S, obj: &Object) -> Option<FontBBox> {
    let arr = obj.as_array().ok()?;
    let mut coords = arr
        .iter()
        .take(4)
        .map(|value| object_to_i32(resolve_ref(store, value)));
    let llx = coords.next()??;
    let lly = coords.next()??;
    let urx = coords.next()??;
    let ury = coords.next()??;
    Some(FontBBox::new(llx, lly, urx, ury))
}

fn wrong_type(key: &str, expected: &str, found: &Object) -> FontWarning {
    debug!(key, expected, found = object_kind(found), "skipping descriptor entry");
    FontWarning::with_code(
        FontWarningCode::MalformedObject,
        format!("/{key} is a {}, expected a {expected}", object_kind(found)),
    )
}
