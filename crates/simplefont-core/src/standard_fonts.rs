//! Names of the 14 standard Type1 fonts.

/// Strip a subset tag (`ABCDEF+`) from a base font name.
///
/// A subset tag is exactly six uppercase ASCII letters followed by `+`.
/// Names without one are returned unchanged.
pub fn strip_subset_tag(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() > 7 && bytes[6] == b'+' && bytes[..6].iter().all(u8::is_ascii_uppercase) {
        &name[7..]
    } else {
        name
    }
}

/// Returns true if `name` (subset tag ignored) is one of the standard 14
/// fonts: Courier, Helvetica and Times in four styles each, Symbol and
/// ZapfDingbats.
pub fn is_standard_font(name: &str) -> bool {
    matches!(
        strip_subset_tag(name),
        "Courier"
            | "Courier-Bold"
            | "Courier-Oblique"
            | "Courier-BoldOblique"
            | "Helvetica"
            | "Helvetica-Bold"
            | "Helvetica-Oblique"
            | "Helvetica-BoldOblique"
            | "Times-Roman"
            | "Times-Bold"
            | "Times-Italic"
            | "Times-BoldItalic"
            | "Symbol"
            | "ZapfDingbats"
    )
}
