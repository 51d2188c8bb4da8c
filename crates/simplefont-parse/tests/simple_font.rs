//! Integration tests for loading simple fonts out of whole PDF documents.
//!
//! Test PDFs are created programmatically using lopdf, saved to bytes and
//! loaded back, so every font dictionary goes through real indirect objects.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use simplefont_parse::simplefont_core::{BaseEncoding, FontOptions, FontWarningCode, UnicodeNorm};
use simplefont_parse::{ObjectStore, SimpleFont};

// --- Test PDF creation helpers ---

/// Build a one-page PDF whose resources hold `font` as /F1, and return the
/// saved bytes.
fn pdf_with_font(build: impl FnOnce(&mut Document) -> Dictionary) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let font = build(&mut doc);
    let font_id = doc.add_object(font);

    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        b"BT /F1 12 Tf 72 720 Td (Hello) Tj ET".to_vec(),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
        "Contents" => Object::Reference(content_id),
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        },
    });
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
    });
    if let Ok(page) = doc.get_object_mut(page_id).and_then(Object::as_dict_mut) {
        page.set("Parent", Object::Reference(pages_id));
    }
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Reload `bytes` and return the document with the /F1 font dictionary.
fn reload(bytes: &[u8]) -> (Document, Dictionary) {
    let doc = Document::load_mem(bytes).unwrap();
    let page_id: ObjectId = *doc.get_pages().values().next().unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
    let font_ref = fonts.get(b"F1").unwrap().as_reference().unwrap();
    let font = doc.get_dictionary(font_ref).unwrap().clone();
    (doc, font)
}

fn load_font(bytes: &[u8], options: &FontOptions) -> (Document, SimpleFont, Vec<String>) {
    let (mut doc, font_dict) = reload(bytes);
    let result = SimpleFont::load(&mut doc, &font_dict, options).unwrap();
    let warnings = result.warnings.iter().map(ToString::to_string).collect();
    (doc, result.value, warnings)
}

fn ints(values: &[i64]) -> Vec<Object> {
    values.iter().copied().map(Object::Integer).collect()
}

// --- Scenarios ---

#[test]
fn standard_font_without_encoding_measures_with_widths() {
    let bytes = pdf_with_font(|_| {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "FirstChar" => 65,
            "LastChar" => 66,
            "Widths" => ints(&[500, 600]),
        }
    });
    let (_, font, warnings) = load_font(&bytes, &FontOptions::default());
    assert!(warnings.is_empty());
    assert_eq!(font.encoding().base_encoding(), Some(BaseEncoding::Standard));
    assert_eq!(font.width("AB"), 1100);
    assert_eq!(font.width(""), 0);
    assert_eq!(font.ascent(""), 0);
    assert_eq!(font.descent(""), 0);
}

#[test]
fn differences_through_indirect_encoding_dictionary() {
    let bytes = pdf_with_font(|doc| {
        let encoding_id = doc.add_object(dictionary! {
            "Type" => "Encoding",
            "BaseEncoding" => "WinAnsiEncoding",
            "Differences" => vec![
                Object::Integer(65),
                Object::Name(b"A".to_vec()),
                Object::Name(b"B".to_vec()),
            ],
        });
        dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => "ABCDEF+Arial",
            "Encoding" => Object::Reference(encoding_id),
            "FirstChar" => 65,
            "LastChar" => 66,
            "Widths" => ints(&[667, 667]),
        }
    });
    let (doc, font, warnings) = load_font(&bytes, &FontOptions::default());
    assert!(warnings.is_empty());

    let table = font.encoding();
    assert_eq!(table.unicode(65), Some('A'));
    assert_eq!(table.unicode(66), Some('B'));
    assert_eq!(table.glyph_name(65), Some("A"));
    assert_eq!(table.glyph_name(66), Some("B"));
    assert_eq!(table.unicode(0x80), Some('\u{20AC}'));
    assert_eq!(font.width("AB"), 1334);

    let projected = ObjectStore::get_object(&doc, font.font_dict_id())
        .and_then(|obj| obj.as_dict().ok())
        .unwrap();
    let encoding = projected.get(b"Encoding").unwrap().as_dict().unwrap();
    assert!(matches!(encoding.get(b"BaseEncoding"), Ok(Object::Name(n)) if n == b"WinAnsiEncoding"));
}

#[test]
fn unresolvable_glyph_name_keeps_cursor_moving() {
    let bytes = pdf_with_font(|_| {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Custom",
            "Encoding" => dictionary! {
                "Differences" => vec![
                    Object::Integer(65),
                    Object::Name(b"zz_unknown".to_vec()),
                    Object::Name(b"B".to_vec()),
                ],
            },
        }
    });
    let (_, font, warnings) = load_font(&bytes, &FontOptions::default());
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("UNRESOLVED_GLYPH_NAME"));
    assert!(warnings[0].contains("Custom"));
    assert_eq!(font.encoding().unicode(66), Some('B'));
    assert_eq!(font.encoding().glyph_name(65), None);
}

#[test]
fn symbolic_truetype_without_encoding_is_identity() {
    let bytes = pdf_with_font(|_| {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => "Wingdings",
            "FontDescriptor" => dictionary! {
                "Type" => "FontDescriptor",
                "FontName" => "Wingdings",
                "Flags" => 4,
            },
        }
    });
    let (_, font, _) = load_font(&bytes, &FontOptions::default());
    assert!(font.is_symbolic());
    assert_eq!(font.encoding().base_encoding(), None);
    for code in 0..=u8::MAX {
        assert_eq!(font.encoding().unicode(code), Some(char::from(code)));
    }
}

#[test]
fn symbol_base_font_selects_symbol_encoding() {
    let bytes = pdf_with_font(|_| {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Symbol",
            "FirstChar" => 97,
            "LastChar" => 97,
            "Widths" => ints(&[631]),
        }
    });
    let (_, font, _) = load_font(&bytes, &FontOptions::default());
    assert_eq!(font.encoding().base_encoding(), Some(BaseEncoding::Symbol));
    assert_eq!(font.encode("\u{03B1}"), vec![0x61]);
    assert_eq!(font.char_width('\u{03B1}'), 631);
}

#[test]
fn to_unicode_overlays_standard_for_custom_fonts() {
    let cmap = b"/CIDInit /ProcSet findresource begin\n\
        12 dict begin\n\
        begincmap\n\
        1 begincodespacerange\n<00> <FF>\nendcodespacerange\n\
        2 beginbfchar\n<01> <0416>\n<02> <0436>\nendbfchar\n\
        1 beginbfrange\n<10> <12> <0410>\nendbfrange\n\
        endcmap\n"
        .to_vec();
    let bytes = pdf_with_font(move |doc| {
        let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, cmap));
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "GHIJKL+CyrillicFont",
            "FirstChar" => 1,
            "LastChar" => 2,
            "Widths" => ints(&[700, 550]),
            "ToUnicode" => Object::Reference(to_unicode_id),
        }
    });
    let (_, font, warnings) = load_font(&bytes, &FontOptions::default());
    assert!(warnings.is_empty());
    assert_eq!(font.decode(&[0x01, 0x02, 0x10, 0x12]), "\u{0416}\u{0436}\u{0410}\u{0412}");
    assert_eq!(font.width("\u{0416}\u{0436}"), 1250);
    // Latin letters still resolve through StandardEncoding.
    assert_eq!(font.encoding().unicode(0x41), Some('A'));
}

#[test]
fn to_unicode_does_not_overlay_standard_fonts() {
    let cmap = b"1 beginbfchar\n<41> <0416>\nendbfchar\n".to_vec();
    let bytes = pdf_with_font(move |doc| {
        let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, cmap));
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "ABCDEF+Times-Roman",
            "ToUnicode" => Object::Reference(to_unicode_id),
        }
    });
    let (_, font, _) = load_font(&bytes, &FontOptions::default());
    assert_eq!(font.encoding().unicode(0x41), Some('A'));
    assert!(font.to_unicode().is_some());
}

#[test]
fn descriptor_metrics_drive_ascent_and_descent() {
    let bytes = pdf_with_font(|doc| {
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => "Custom",
            "Flags" => 32,
            "Ascent" => 718,
            "Descent" => -207,
            "CapHeight" => 718,
            "MissingWidth" => 250,
            "FontBBox" => ints(&[1000, 931, -166, -225]),
        });
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Custom",
            "FirstChar" => 65,
            "LastChar" => 65,
            "Widths" => ints(&[667]),
            "FontDescriptor" => Object::Reference(descriptor_id),
        }
    });
    let (doc, font, warnings) = load_font(&bytes, &FontOptions::default());
    assert!(warnings.is_empty());
    assert_eq!(font.ascent("Ag"), 718);
    assert_eq!(font.descent("Ag"), -207);
    assert_eq!(font.char_ascent('A'), 718);
    assert_eq!(font.char_descent('A'), -207);
    assert_eq!(font.width("AZ"), 917);

    let bbox = font.metrics().summary().bbox;
    assert_eq!((bbox.llx, bbox.lly, bbox.urx, bbox.ury), (-166, -225, 1000, 931));

    let descriptor = ObjectStore::get_object(&doc, font.descriptor_id().unwrap())
        .and_then(|obj| obj.as_dict().ok())
        .unwrap();
    assert!(matches!(descriptor.get(b"Descent"), Ok(Object::Integer(-207))));
}

#[test]
fn normalization_option_applies_to_measurement() {
    let bytes = pdf_with_font(|_| {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => "Arial",
            "Encoding" => "WinAnsiEncoding",
            "FirstChar" => 233,
            "LastChar" => 233,
            "Widths" => ints(&[556]),
        }
    });
    let options = FontOptions {
        unicode_norm: UnicodeNorm::Nfc,
        ..FontOptions::default()
    };
    let (_, font, _) = load_font(&bytes, &options);
    assert_eq!(font.width("e\u{0301}"), 556);

    let (_, plain, _) = load_font(&bytes, &FontOptions::default());
    assert_eq!(plain.width("e\u{0301}"), 0);
}

#[test]
fn strict_mode_rejects_malformed_to_unicode() {
    let bytes = pdf_with_font(|doc| {
        let to_unicode_id = doc.add_object(Stream::new(
            dictionary! {},
            b"1 beginbfchar\n<41>\nendbfchar\n".to_vec(),
        ));
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Custom",
            "ToUnicode" => Object::Reference(to_unicode_id),
        }
    });

    let (mut doc, font_dict) = reload(&bytes);
    let lenient = SimpleFont::load(&mut doc, &font_dict, &FontOptions::default()).unwrap();
    assert_eq!(lenient.warnings.len(), 1);
    assert_eq!(lenient.warnings[0].code, FontWarningCode::MalformedToUnicode);

    let strict = FontOptions {
        strict_mode: true,
        ..FontOptions::default()
    };
    assert!(SimpleFont::load(&mut doc, &font_dict, &strict).is_err());
}
