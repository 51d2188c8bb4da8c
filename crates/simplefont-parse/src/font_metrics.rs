//! Width extraction from PDF font dictionaries.
//!
//! Reads /FirstChar, /LastChar and /Widths into a core [`FontMetrics`]. The
//! font descriptor contributes the rest of the metrics through
//! [`project_descriptor`](crate::descriptor::project_descriptor).

use lopdf::{Dictionary, Object};
use simplefont_core::{FontMetrics, FontResult, FontWarning, FontWarningCode};
use tracing::debug;

use crate::object_store::{ObjectStore, get_resolved, object_to_i32, object_to_i64, resolve_ref};

/// The `/FirstChar` and `/LastChar` pair of a font dictionary.
///
/// Only present when both entries are numbers.
pub fn char_range<S: ObjectStore + ?Sized>(store: &S, font_dict: &Dictionary) -> Option<(u32, u32)> {
    let first = get_resolved(store, font_dict, b"FirstChar").and_then(object_to_i64)?;
    let last = get_resolved(store, font_dict, b"LastChar").and_then(object_to_i64)?;
    Some((clamp_code(first), clamp_code(last)))
}

fn clamp_code(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Extract [`FontMetrics`] from a font dictionary.
///
/// Widths start at `/FirstChar` when the `/FirstChar`+`/LastChar` pair is
/// present and at code 0 otherwise. Non-numeric width entries count as 0 and
/// produce a warning. The missing width starts at 0; the font descriptor may
/// override it.
pub fn extract_font_metrics<S: ObjectStore + ?Sized>(
    store: &S,
    font_dict: &Dictionary,
) -> FontResult<FontMetrics> {
    let mut warnings = Vec::new();
    let widths = match get_resolved(store, font_dict, b"Widths") {
        Some(obj) => match obj.as_array() {
            Ok(arr) => read_widths(store, arr, &mut warnings),
            Err(_) => {
                debug!("/Widths is not an array");
                warnings.push(FontWarning::with_code(
                    FontWarningCode::MalformedObject,
                    "/Widths is not an array",
                ));
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let (first_char, last_char) = match char_range(store, font_dict) {
        Some(range) => range,
        None => (0, widths.len().saturating_sub(1) as u32),
    };

    FontResult::with_warnings(
        FontMetrics::new(widths, first_char, last_char, 0),
        warnings,
    )
}

fn read_widths<S: ObjectStore + ?Sized>(
    store: &S,
    arr: &[Object],
    warnings: &mut Vec<FontWarning>,
) -> Vec<i32> {
    arr.iter()
        .enumerate()
        .map(|(index, obj)| match object_to_i32(resolve_ref(store, obj)) {
            Some(width) => width,
            None => {
                debug!(index, "non-numeric /Widths entry");
                warnings.push(FontWarning::with_code(
                    FontWarningCode::MalformedObject,
                    format!("non-numeric /Widths entry at index {index}"),
                ));
                0
            }
        })
        .collect()
}
