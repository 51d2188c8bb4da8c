//! Built-in single-byte base encodings.
//!
//! Implements WinAnsiEncoding, MacRomanEncoding and StandardEncoding, plus the
//! built-in encodings of the Symbol and ZapfDingbats fonts. Each encoding is a
//! static 256-entry table indexed by character code; undefined slots are
//! `None`.

/// A built-in base encoding for simple fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseEncoding {
    /// WinAnsiEncoding: Windows code page 1252.
    WinAnsi,
    /// MacRomanEncoding: Classic Mac OS Roman.
    MacRoman,
    /// StandardEncoding: Adobe standard Latin encoding, the default for
    /// non-symbolic fonts without a recognized base encoding.
    Standard,
    /// Built-in encoding of the Symbol font (Greek and mathematical glyphs).
    Symbol,
    /// Built-in encoding of the ZapfDingbats font.
    ZapfDingbats,
}

/// Every single-byte code in ascending order.
pub(crate) const ALL_CODES: [u8; 256] = {
    let mut codes = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        codes[i] = i as u8;
        i += 1;
    }
    codes
};

impl BaseEncoding {
    /// Select a named encoding.
    ///
    /// Only the four encodings a font can request explicitly are recognized:
    /// `WinAnsiEncoding`, `MacRomanEncoding`, `Symbol` and `ZapfDingbats`.
    /// Any other name, `StandardEncoding` included, returns `None` and leaves
    /// the choice of default to the caller.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "WinAnsiEncoding" => Some(BaseEncoding::WinAnsi),
            "MacRomanEncoding" => Some(BaseEncoding::MacRoman),
            "Symbol" => Some(BaseEncoding::Symbol),
            "ZapfDingbats" => Some(BaseEncoding::ZapfDingbats),
            _ => None,
        }
    }

    /// The PDF name of this encoding.
    pub fn name(&self) -> &'static str {
        match self {
            BaseEncoding::WinAnsi => "WinAnsiEncoding",
            BaseEncoding::MacRoman => "MacRomanEncoding",
            BaseEncoding::Standard => "StandardEncoding",
            BaseEncoding::Symbol => "Symbol",
            BaseEncoding::ZapfDingbats => "ZapfDingbats",
        }
    }

    fn table(&self) -> &'static [Option<char>; 256] {
        match self {
            BaseEncoding::WinAnsi => &WIN_ANSI_TABLE,
            BaseEncoding::MacRoman => &MAC_ROMAN_TABLE,
            BaseEncoding::Standard => &STANDARD_TABLE,
            BaseEncoding::Symbol => &SYMBOL_TABLE,
            BaseEncoding::ZapfDingbats => &ZAPF_DINGBATS_TABLE,
        }
    }

    /// Look up the character defined for `code`, or `None` if the slot is
    /// undefined in this encoding.
    pub fn decode(&self, code: u8) -> Option<char> {
        self.table()[code as usize]
    }

    /// Total variant of [`decode`](Self::decode): undefined slots decode to
    /// the identity scalar `U+00NN`.
    pub fn to_unicode(&self, code: u8) -> char {
        self.decode(code).unwrap_or(char::from(code))
    }

    /// Decode a byte string, one character per byte.
    ///
    /// Uses the same total conversion as [`to_unicode`](Self::to_unicode), so
    /// the character at position `n` of the result always equals
    /// `to_unicode(bytes[n])`.
    pub fn decode_bytes(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.to_unicode(b)).collect()
    }

    /// Decode all 256 codes in one batch.
    pub fn decode_all(&self) -> Vec<char> {
        self.decode_bytes(&ALL_CODES).chars().collect()
    }
}

// =============================================================================
// Table construction helpers
// =============================================================================

/// Write a run of code points starting at `start`. A zero entry leaves the
/// slot undefined.
const fn with_run(mut t: [Option<char>; 256], start: usize, run: &[u16]) -> [Option<char>; 256] {
    let mut i = 0;
    while i < run.len() {
        t[start + i] = if run[i] == 0 {
            None
        } else {
            char::from_u32(run[i] as u32)
        };
        i += 1;
    }
    t
}

/// Map `first..=last` onto consecutive code points starting at `target`.
const fn with_range(
    mut t: [Option<char>; 256],
    first: usize,
    last: usize,
    target: u32,
) -> [Option<char>; 256] {
    let mut code = first;
    while code <= last {
        t[code] = char::from_u32(target + (code - first) as u32);
        code += 1;
    }
    t
}

/// Printable ASCII, 0x20–0x7E.
const fn ascii() -> [Option<char>; 256] {
    with_range([None; 256], 0x20, 0x7E, 0x20)
}

// =============================================================================
// Encoding tables
// =============================================================================

/// WinAnsiEncoding: ASCII, the cp1252 block at 0x80–0x9F, ISO 8859-1 above.
static WIN_ANSI_TABLE: [Option<char>; 256] = {
    let t = ascii();
    #[rustfmt::skip]
    let t = with_run(t, 0x80, &[
        0x20AC, 0,      0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021,
        0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0,      0x017D, 0,
        0,      0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
        0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0,      0x017E, 0x0178,
    ]);
    with_range(t, 0xA0, 0xFF, 0xA0)
};

/// MacRomanEncoding: ASCII plus the Mac OS Roman upper half.
static MAC_ROMAN_TABLE: [Option<char>; 256] = {
    let t = ascii();
    #[rustfmt::skip]
    let t = with_run(t, 0x80, &[
        // 0x80
        0x00C4, 0x00C5, 0x00C7, 0x00C9, 0x00D1, 0x00D6, 0x00DC, 0x00E1,
        0x00E0, 0x00E2, 0x00E4, 0x00E3, 0x00E5, 0x00E7, 0x00E9, 0x00E8,
        // 0x90
        0x00EA, 0x00EB, 0x00ED, 0x00EC, 0x00EE, 0x00EF, 0x00F1, 0x00F3,
        0x00F2, 0x00F4, 0x00F6, 0x00F5, 0x00FA, 0x00F9, 0x00FB, 0x00FC,
        // 0xA0
        0x2020, 0x00B0, 0x00A2, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF,
        0x00AE, 0x00A9, 0x2122, 0x00B4, 0x00A8, 0x2260, 0x00C6, 0x00D8,
        // 0xB0
        0x221E, 0x00B1, 0x2264, 0x2265, 0x00A5, 0x00B5, 0x2202, 0x2211,
        0x220F, 0x03C0, 0x222B, 0x00AA, 0x00BA, 0x03A9, 0x00E6, 0x00F8,
        // 0xC0
        0x00BF, 0x00A1, 0x00AC, 0x221A, 0x0192, 0x2248, 0x2206, 0x00AB,
        0x00BB, 0x2026, 0x00A0, 0x00C0, 0x00C3, 0x00D5, 0x0152, 0x0153,
        // 0xD0
        0x2013, 0x2014, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0x25CA,
        0x00FF, 0x0178, 0x2044, 0x20AC, 0x2039, 0x203A, 0xFB01, 0xFB02,
        // 0xE0
        0x2021, 0x00B7, 0x201A, 0x201E, 0x2030, 0x00C2, 0x00CA, 0x00C1,
        0x00CB, 0x00C8, 0x00CD, 0x00CE, 0x00CF, 0x00CC, 0x00D3, 0x00D4,
        // 0xF0 (0xF0 is undefined in PDF MacRomanEncoding)
        0,      0x00D2, 0x00DA, 0x00DB, 0x00D9, 0x0131, 0x02C6, 0x02DC,
        0x00AF, 0x02D8, 0x02D9, 0x02DA, 0x00B8, 0x02DD, 0x02DB, 0x02C7,
    ]);
    t
};

/// StandardEncoding (PDF Reference Table D.1).
static STANDARD_TABLE: [Option<char>; 256] = {
    let mut t = ascii();
    t[0x27] = Some('\u{2019}'); // quoteright
    t[0x60] = Some('\u{2018}'); // quoteleft
    #[rustfmt::skip]
    let t = with_run(t, 0xA1, &[
                0x00A1, 0x00A2, 0x00A3, 0x2044, 0x00A5, 0x0192, 0x00A7,
        0x00A4, 0x0027, 0x201C, 0x00AB, 0x2039, 0x203A, 0xFB01, 0xFB02,
        0,      0x2013, 0x2020, 0x2021, 0x00B7, 0,      0x00B6, 0x2022,
        0x201A, 0x201E, 0x201D, 0x00BB, 0x2026, 0x2030, 0,      0x00BF,
    ]);
    #[rustfmt::skip]
    let t = with_run(t, 0xC1, &[
                0x0060, 0x00B4, 0x02C6, 0x02DC, 0x00AF, 0x02D8, 0x02D9,
        0x00A8, 0,      0x02DA, 0x00B8, 0,      0x02DD, 0x02DB, 0x02C7,
        0x2014,
    ]);
    #[rustfmt::skip]
    let t = with_run(t, 0xE1, &[
                0x00C6, 0,      0x00AA, 0,      0,      0,      0,
        0x0141, 0x00D8, 0x0152, 0x00BA,
    ]);
    #[rustfmt::skip]
    let t = with_run(t, 0xF1, &[
                0x00E6, 0,      0,      0,      0x0131, 0,      0,
        0x0142, 0x00F8, 0x0153, 0x00DF,
    ]);
    t
};

/// Built-in encoding of the Symbol font.
static SYMBOL_TABLE: [Option<char>; 256] = {
    #[rustfmt::skip]
    let t = with_run([None; 256], 0x20, &[
        // 0x20
        0x0020, 0x0021, 0x2200, 0x0023, 0x2203, 0x0025, 0x0026, 0x220B,
        0x0028, 0x0029, 0x2217, 0x002B, 0x002C, 0x2212, 0x002E, 0x002F,
        // 0x30
        0x0030, 0x0031, 0x0032, 0x0033, 0x0034, 0x0035, 0x0036, 0x0037,
        0x0038, 0x0039, 0x003A, 0x003B, 0x003C, 0x003D, 0x003E, 0x003F,
        // 0x40
        0x2245, 0x0391, 0x0392, 0x03A7, 0x2206, 0x0395, 0x03A6, 0x0393,
        0x0397, 0x0399, 0x03D1, 0x039A, 0x039B, 0x039C, 0x039D, 0x039F,
        // 0x50
        0x03A0, 0x0398, 0x03A1, 0x03A3, 0x03A4, 0x03A5, 0x03C2, 0x2126,
        0x039E, 0x03A8, 0x0396, 0x005B, 0x2234, 0x005D, 0x22A5, 0x005F,
        // 0x60
        0xF8E5, 0x03B1, 0x03B2, 0x03C7, 0x03B4, 0x03B5, 0x03C6, 0x03B3,
        0x03B7, 0x03B9, 0x03D5, 0x03BA, 0x03BB, 0x03BC, 0x03BD, 0x03BF,
        // 0x70
        0x03C0, 0x03B8, 0x03C1, 0x03C3, 0x03C4, 0x03C5, 0x03D6, 0x03C9,
        0x03BE, 0x03C8, 0x03B6, 0x007B, 0x007C, 0x007D, 0x223C,
    ]);
    #[rustfmt::skip]
    let t = with_run(t, 0xA0, &[
        // 0xA0
        0x20AC, 0x03D2, 0x2032, 0x2264, 0x2044, 0x221E, 0x0192, 0x2663,
        0x2666, 0x2665, 0x2660, 0x2194, 0x2190, 0x2191, 0x2192, 0x2193,
        // 0xB0
        0x00B0, 0x00B1, 0x2033, 0x2265, 0x00D7, 0x221D, 0x2202, 0x2022,
        0x00F7, 0x2260, 0x2261, 0x2248, 0x2026, 0xF8E6, 0xF8E7, 0x21B5,
        // 0xC0
        0x2135, 0x2111, 0x211C, 0x2118, 0x2297, 0x2295, 0x2205, 0x2229,
        0x222A, 0x2283, 0x2287, 0x2284, 0x2282, 0x2286, 0x2208, 0x2209,
        // 0xD0
        0x2220, 0x2207, 0xF6DA, 0xF6D9, 0xF6DB, 0x220F, 0x221A, 0x22C5,
        0x00AC, 0x2227, 0x2228, 0x21D4, 0x21D0, 0x21D1, 0x21D2, 0x21D3,
        // 0xE0
        0x25CA, 0x2329, 0xF8E8, 0xF8E9, 0xF8EA, 0x2211, 0xF8EB, 0xF8EC,
        0xF8ED, 0xF8EE, 0xF8EF, 0xF8F0, 0xF8F1, 0xF8F2, 0xF8F3, 0xF8F4,
        // 0xF0
        0,      0x232A, 0x222B, 0x2320, 0xF8F5, 0x2321, 0xF8F6, 0xF8F7,
        0xF8F8, 0xF8F9, 0xF8FA, 0xF8FB, 0xF8FC, 0xF8FD, 0xF8FE,
    ]);
    t
};

/// Built-in encoding of the ZapfDingbats font.
///
/// Most of the table is contiguous runs in the Dingbats block (U+2700); the
/// glyphs that Unicode unified with existing symbols are patched afterwards.
static ZAPF_DINGBATS_TABLE: [Option<char>; 256] = {
    let mut t = [None; 256];
    t[0x20] = Some(' ');
    let t = with_range(t, 0x21, 0x7E, 0x2701);
    let t = with_range(t, 0x80, 0x8D, 0x2768);
    let t = with_range(t, 0xA1, 0xA7, 0x2761);
    let t = with_run(t, 0xA8, &[0x2663, 0x2666, 0x2665, 0x2660]);
    let t = with_range(t, 0xAC, 0xB5, 0x2460);
    let t = with_range(t, 0xB6, 0xD4, 0x2776);
    let t = with_run(t, 0xD5, &[0x2192, 0x2194, 0x2195]);
    let mut t = with_range(t, 0xD8, 0xFE, 0x2798);
    t[0xF0] = None;
    t[0x25] = Some('\u{260E}'); // a4, telephone
    t[0x2A] = Some('\u{261B}'); // a11
    t[0x2B] = Some('\u{261E}'); // a12
    t[0x48] = Some('\u{2605}'); // a38, black star
    t[0x6C] = Some('\u{25CF}'); // a71
    t[0x6E] = Some('\u{25A0}'); // a73
    t[0x73] = Some('\u{25B2}'); // a76
    t[0x74] = Some('\u{25BC}'); // a77
    t[0x75] = Some('\u{25C6}'); // a78
    t[0x77] = Some('\u{25D7}'); // a81
    t
};
