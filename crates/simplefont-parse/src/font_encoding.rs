//! Reading `/Encoding` and the symbolic flag out of a font dictionary.

use lopdf::{Dictionary, Object};
use simplefont_core::{
    Difference, EncodingSource, EncodingSpec, FontResult, FontWarning, FontWarningCode,
};
use tracing::debug;

use crate::object_store::{
    ObjectStore, get_resolved, object_kind, object_to_i64, object_to_name, resolve_ref,
};

/// `/Flags` bit 3 (value 4): the font uses symbols outside the Standard Latin set.
const SYMBOLIC_FLAG: i64 = 1 << 2;

/// True if the font's descriptor sets the symbolic flag.
pub fn is_symbolic<S: ObjectStore + ?Sized>(store: &S, font_dict: &Dictionary) -> bool {
    get_resolved(store, font_dict, b"FontDescriptor")
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|descriptor| get_resolved(store, descriptor, b"Flags"))
        .and_then(object_to_i64)
        .is_some_and(|flags| flags & SYMBOLIC_FLAG != 0)
}

/// Build the [`EncodingSpec`] of a simple font dictionary.
///
/// `/Encoding` may be a name, an encoding dictionary or absent. Any other
/// object is treated as absent. `/Differences` entries other than numbers
/// and names are skipped. Both cases produce a
/// [`FontWarningCode::MalformedEncoding`] warning.
pub fn read_encoding_spec<S: ObjectStore + ?Sized>(
    store: &S,
    font_dict: &Dictionary,
) -> FontResult<EncodingSpec> {
    let mut warnings = Vec::new();
    let source = match get_resolved(store, font_dict, b"Encoding") {
        None => EncodingSource::Absent,
        Some(Object::Name(name)) => EncodingSource::Named(String::from_utf8_lossy(name).into_owned()),
        Some(Object::Dictionary(dict)) => read_encoding_dict(store, dict, &mut warnings),
        Some(other) => {
            debug!(kind = object_kind(other), "ignoring /Encoding");
            warnings.push(FontWarning::with_code(
                FontWarningCode::MalformedEncoding,
                format!("/Encoding is a {}, expected a name or dictionary", object_kind(other)),
            ));
            EncodingSource::Absent
        }
    };

    let mut spec = EncodingSpec::new(source).symbolic(is_symbolic(store, font_dict));
    if let Some(base_font) = get_resolved(store, font_dict, b"BaseFont").and_then(object_to_name) {
        spec = spec.base_font(base_font);
    }

    if let Some(ref name) = spec.base_font {
        warnings = warnings.into_iter().map(|w| w.in_font(name.clone())).collect();
    }
    FontResult::with_warnings(spec, warnings)
}

fn read_encoding_dict<S: ObjectStore + ?Sized>(
    store: &S,
    dict: &Dictionary,
    warnings: &mut Vec<FontWarning>,
) -> EncodingSource {
    let base_encoding = get_resolved(store, dict, b"BaseEncoding").and_then(object_to_name);
    let differences = match get_resolved(store, dict, b"Differences") {
        Some(obj) => match obj.as_array() {
            Ok(arr) => read_differences(store, arr, warnings),
            Err(_) => {
                debug!("/Differences is not an array");
                warnings.push(FontWarning::with_code(
                    FontWarningCode::MalformedEncoding,
                    "/Differences is not an array",
                ));
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    EncodingSource::Dictionary {
        base_encoding,
        differences,
    }
}

fn read_differences<S: ObjectStore + ?Sized>(
    store: &S,
    arr: &[Object],
    warnings: &mut Vec<FontWarning>,
) -> Vec<Difference> {
    let mut differences = Vec::with_capacity(arr.len());
    for (index, obj) in arr.iter().enumerate() {
        let obj = resolve_ref(store, obj);
        if let Some(code) = object_to_i64(obj) {
            differences.push(Difference::Code(code));
        } else if let Some(name) = object_to_name(obj) {
            differences.push(Difference::Name(name));
        } else {
            debug!(index, kind = object_kind(obj), "skipping /Differences entry");
            warnings.push(FontWarning::with_code(
                FontWarningCode::MalformedEncoding,
                format!("unexpected {} at /Differences index {index}", object_kind(obj)),
            ));
        }
    }
    differences
}
