//! Glyph-name to Unicode lookup.
//!
//! Resolves PostScript glyph names as they appear in `/Differences` arrays.
//! Named glyphs come from a static perfect-hash subset of the Adobe Glyph
//! List covering Latin, Greek, punctuation and the Symbol font's math glyphs;
//! `uniXXXX` and `uXXXX[XX]` names are decoded algorithmically.

use phf::phf_map;

/// Resolve a glyph name to its Unicode character.
///
/// Handles, in order:
/// - names in the static glyph list (`"A"`, `"Aacute"`, `"summation"`, ...)
/// - `uniXXXX` (exactly four hex digits, no surrogates)
/// - `uXXXX` to `uXXXXXX` (four to six hex digits)
/// - any of the above followed by a `.suffix` variant tag (`"a.sc"`)
///
/// Returns `None` for names that do not resolve to a single character.
pub fn glyph_name_to_char(name: &str) -> Option<char> {
    let base = match name.find('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    };

    if let Some(&ch) = GLYPH_LIST.get(base) {
        return Some(ch);
    }

    if let Some(hex) = base.strip_prefix("uni") {
        if hex.len() == 4 {
            return parse_hex_scalar(hex);
        }
        return None;
    }

    if let Some(hex) = base.strip_prefix('u') {
        if (4..=6).contains(&hex.len()) {
            return parse_hex_scalar(hex);
        }
    }

    None
}

fn parse_hex_scalar(hex: &str) -> Option<char> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Number of entries in the static glyph list.
pub fn glyph_list_len() -> usize {
    GLYPH_LIST.len()
}

static GLYPH_LIST: phf::Map<&'static str, char> = phf_map! {
    // Basic Latin
    "space" => ' ',
    "exclam" => '!',
    "quotedbl" => '"',
    "numbersign" => '#',
    "dollar" => '$',
    "percent" => '%',
    "ampersand" => '&',
    "quotesingle" => '\'',
    "parenleft" => '(',
    "parenright" => ')',
    "asterisk" => '*',
    "plus" => '+',
    "comma" => ',',
    "hyphen" => '-',
    "period" => '.',
    "slash" => '/',
    "zero" => '0',
    "one" => '1',
    "two" => '2',
    "three" => '3',
    "four" => '4',
    "five" => '5',
    "six" => '6',
    "seven" => '7',
    "eight" => '8',
    "nine" => '9',
    "colon" => ':',
    "semicolon" => ';',
    "less" => '<',
    "equal" => '=',
    "greater" => '>',
    "question" => '?',
    "at" => '@',
    "A" => 'A', "B" => 'B', "C" => 'C', "D" => 'D', "E" => 'E', "F" => 'F',
    "G" => 'G', "H" => 'H', "I" => 'I', "J" => 'J', "K" => 'K', "L" => 'L',
    "M" => 'M', "N" => 'N', "O" => 'O', "P" => 'P', "Q" => 'Q', "R" => 'R',
    "S" => 'S', "T" => 'T', "U" => 'U', "V" => 'V', "W" => 'W', "X" => 'X',
    "Y" => 'Y', "Z" => 'Z',
    "bracketleft" => '[',
    "backslash" => '\\',
    "bracketright" => ']',
    "asciicircum" => '^',
    "underscore" => '_',
    "grave" => '`',
    "a" => 'a', "b" => 'b', "c" => 'c', "d" => 'd', "e" => 'e', "f" => 'f',
    "g" => 'g', "h" => 'h', "i" => 'i', "j" => 'j', "k" => 'k', "l" => 'l',
    "m" => 'm', "n" => 'n', "o" => 'o', "p" => 'p', "q" => 'q', "r" => 'r',
    "s" => 's', "t" => 't', "u" => 'u', "v" => 'v', "w" => 'w', "x" => 'x',
    "y" => 'y', "z" => 'z',
    "braceleft" => '{',
    "bar" => '|',
    "braceright" => '}',
    "asciitilde" => '~',

    // Latin-1 Supplement
    "nbspace" => '\u{00A0}',
    "exclamdown" => '\u{00A1}',
    "cent" => '\u{00A2}',
    "sterling" => '\u{00A3}',
    "currency" => '\u{00A4}',
    "yen" => '\u{00A5}',
    "brokenbar" => '\u{00A6}',
    "section" => '\u{00A7}',
    "dieresis" => '\u{00A8}',
    "copyright" => '\u{00A9}',
    "ordfeminine" => '\u{00AA}',
    "guillemotleft" => '\u{00AB}',
    "logicalnot" => '\u{00AC}',
    "sfthyphen" => '\u{00AD}',
    "registered" => '\u{00AE}',
    "macron" => '\u{00AF}',
    "degree" => '\u{00B0}',
    "plusminus" => '\u{00B1}',
    "twosuperior" => '\u{00B2}',
    "threesuperior" => '\u{00B3}',
    "acute" => '\u{00B4}',
    "mu" => '\u{00B5}',
    "paragraph" => '\u{00B6}',
    "periodcentered" => '\u{00B7}',
    "cedilla" => '\u{00B8}',
    "onesuperior" => '\u{00B9}',
    "ordmasculine" => '\u{00BA}',
    "guillemotright" => '\u{00BB}',
    "onequarter" => '\u{00BC}',
    "onehalf" => '\u{00BD}',
    "threequarters" => '\u{00BE}',
    "questiondown" => '\u{00BF}',
    "Agrave" => '\u{00C0}',
    "Aacute" => '\u{00C1}',
    "Acircumflex" => '\u{00C2}',
    "Atilde" => '\u{00C3}',
    "Adieresis" => '\u{00C4}',
    "Aring" => '\u{00C5}',
    "AE" => '\u{00C6}',
    "Ccedilla" => '\u{00C7}',
    "Egrave" => '\u{00C8}',
    "Eacute" => '\u{00C9}',
    "Ecircumflex" => '\u{00CA}',
    "Edieresis" => '\u{00CB}',
    "Igrave" => '\u{00CC}',
    "Iacute" => '\u{00CD}',
    "Icircumflex" => '\u{00CE}',
    "Idieresis" => '\u{00CF}',
    "Eth" => '\u{00D0}',
    "Ntilde" => '\u{00D1}',
    "Ograve" => '\u{00D2}',
    "Oacute" => '\u{00D3}',
    "Ocircumflex" => '\u{00D4}',
    "Otilde" => '\u{00D5}',
    "Odieresis" => '\u{00D6}',
    "multiply" => '\u{00D7}',
    "Oslash" => '\u{00D8}',
    "Ugrave" => '\u{00D9}',
    "Uacute" => '\u{00DA}',
    "Ucircumflex" => '\u{00DB}',
    "Udieresis" => '\u{00DC}',
    "Yacute" => '\u{00DD}',
    "Thorn" => '\u{00DE}',
    "germandbls" => '\u{00DF}',
    "agrave" => '\u{00E0}',
    "aacute" => '\u{00E1}',
    "acircumflex" => '\u{00E2}',
    "atilde" => '\u{00E3}',
    "adieresis" => '\u{00E4}',
    "aring" => '\u{00E5}',
    "ae" => '\u{00E6}',
    "ccedilla" => '\u{00E7}',
    "egrave" => '\u{00E8}',
    "eacute" => '\u{00E9}',
    "ecircumflex" => '\u{00EA}',
    "edieresis" => '\u{00EB}',
    "igrave" => '\u{00EC}',
    "iacute" => '\u{00ED}',
    "icircumflex" => '\u{00EE}',
    "idieresis" => '\u{00EF}',
    "eth" => '\u{00F0}',
    "ntilde" => '\u{00F1}',
    "ograve" => '\u{00F2}',
    "oacute" => '\u{00F3}',
    "ocircumflex" => '\u{00F4}',
    "otilde" => '\u{00F5}',
    "odieresis" => '\u{00F6}',
    "divide" => '\u{00F7}',
    "oslash" => '\u{00F8}',
    "ugrave" => '\u{00F9}',
    "uacute" => '\u{00FA}',
    "ucircumflex" => '\u{00FB}',
    "udieresis" => '\u{00FC}',
    "yacute" => '\u{00FD}',
    "thorn" => '\u{00FE}',
    "ydieresis" => '\u{00FF}',

    // Latin Extended-A/B
    "Amacron" => '\u{0100}',
    "amacron" => '\u{0101}',
    "Abreve" => '\u{0102}',
    "abreve" => '\u{0103}',
    "Aogonek" => '\u{0104}',
    "aogonek" => '\u{0105}',
    "Cacute" => '\u{0106}',
    "cacute" => '\u{0107}',
    "Ccaron" => '\u{010C}',
    "ccaron" => '\u{010D}',
    "Dcaron" => '\u{010E}',
    "dcaron" => '\u{010F}',
    "Dcroat" => '\u{0110}',
    "dcroat" => '\u{0111}',
    "Emacron" => '\u{0112}',
    "emacron" => '\u{0113}',
    "Edotaccent" => '\u{0116}',
    "edotaccent" => '\u{0117}',
    "Eogonek" => '\u{0118}',
    "eogonek" => '\u{0119}',
    "Ecaron" => '\u{011A}',
    "ecaron" => '\u{011B}',
    "Gbreve" => '\u{011E}',
    "gbreve" => '\u{011F}',
    "Gcommaaccent" => '\u{0122}',
    "gcommaaccent" => '\u{0123}',
    "Imacron" => '\u{012A}',
    "imacron" => '\u{012B}',
    "Iogonek" => '\u{012E}',
    "iogonek" => '\u{012F}',
    "Idotaccent" => '\u{0130}',
    "dotlessi" => '\u{0131}',
    "Kcommaaccent" => '\u{0136}',
    "kcommaaccent" => '\u{0137}',
    "Lacute" => '\u{0139}',
    "lacute" => '\u{013A}',
    "Lcommaaccent" => '\u{013B}',
    "lcommaaccent" => '\u{013C}',
    "Lcaron" => '\u{013D}',
    "lcaron" => '\u{013E}',
    "Lslash" => '\u{0141}',
    "lslash" => '\u{0142}',
    "Nacute" => '\u{0143}',
    "nacute" => '\u{0144}',
    "Ncommaaccent" => '\u{0145}',
    "ncommaaccent" => '\u{0146}',
    "Ncaron" => '\u{0147}',
    "ncaron" => '\u{0148}',
    "Omacron" => '\u{014C}',
    "omacron" => '\u{014D}',
    "Ohungarumlaut" => '\u{0150}',
    "ohungarumlaut" => '\u{0151}',
    "OE" => '\u{0152}',
    "oe" => '\u{0153}',
    "Racute" => '\u{0154}',
    "racute" => '\u{0155}',
    "Rcommaaccent" => '\u{0156}',
    "rcommaaccent" => '\u{0157}',
    "Rcaron" => '\u{0158}',
    "rcaron" => '\u{0159}',
    "Sacute" => '\u{015A}',
    "sacute" => '\u{015B}',
    "Scedilla" => '\u{015E}',
    "scedilla" => '\u{015F}',
    "Scaron" => '\u{0160}',
    "scaron" => '\u{0161}',
    "Tcommaaccent" => '\u{0162}',
    "tcommaaccent" => '\u{0163}',
    "Tcaron" => '\u{0164}',
    "tcaron" => '\u{0165}',
    "Umacron" => '\u{016A}',
    "umacron" => '\u{016B}',
    "Uring" => '\u{016E}',
    "uring" => '\u{016F}',
    "Uhungarumlaut" => '\u{0170}',
    "uhungarumlaut" => '\u{0171}',
    "Uogonek" => '\u{0172}',
    "uogonek" => '\u{0173}',
    "Ydieresis" => '\u{0178}',
    "Zacute" => '\u{0179}',
    "zacute" => '\u{017A}',
    "Zdotaccent" => '\u{017B}',
    "zdotaccent" => '\u{017C}',
    "Zcaron" => '\u{017D}',
    "zcaron" => '\u{017E}',
    "florin" => '\u{0192}',
    "Scommaaccent" => '\u{0218}',
    "scommaaccent" => '\u{0219}',

    // Spacing modifiers
    "circumflex" => '\u{02C6}',
    "caron" => '\u{02C7}',
    "breve" => '\u{02D8}',
    "dotaccent" => '\u{02D9}',
    "ring" => '\u{02DA}',
    "ogonek" => '\u{02DB}',
    "tilde" => '\u{02DC}',
    "hungarumlaut" => '\u{02DD}',

    // Greek
    "Alpha" => '\u{0391}',
    "Beta" => '\u{0392}',
    "Gamma" => '\u{0393}',
    "Delta" => '\u{2206}',
    "Epsilon" => '\u{0395}',
    "Zeta" => '\u{0396}',
    "Eta" => '\u{0397}',
    "Theta" => '\u{0398}',
    "Iota" => '\u{0399}',
    "Kappa" => '\u{039A}',
    "Lambda" => '\u{039B}',
    "Mu" => '\u{039C}',
    "Nu" => '\u{039D}',
    "Xi" => '\u{039E}',
    "Omicron" => '\u{039F}',
    "Pi" => '\u{03A0}',
    "Rho" => '\u{03A1}',
    "Sigma" => '\u{03A3}',
    "Tau" => '\u{03A4}',
    "Upsilon" => '\u{03A5}',
    "Phi" => '\u{03A6}',
    "Chi" => '\u{03A7}',
    "Psi" => '\u{03A8}',
    "Omega" => '\u{2126}',
    "alpha" => '\u{03B1}',
    "beta" => '\u{03B2}',
    "gamma" => '\u{03B3}',
    "delta" => '\u{03B4}',
    "epsilon" => '\u{03B5}',
    "zeta" => '\u{03B6}',
    "eta" => '\u{03B7}',
    "theta" => '\u{03B8}',
    "iota" => '\u{03B9}',
    "kappa" => '\u{03BA}',
    "lambda" => '\u{03BB}',
    "nu" => '\u{03BD}',
    "xi" => '\u{03BE}',
    "omicron" => '\u{03BF}',
    "pi" => '\u{03C0}',
    "rho" => '\u{03C1}',
    "sigma1" => '\u{03C2}',
    "sigma" => '\u{03C3}',
    "tau" => '\u{03C4}',
    "upsilon" => '\u{03C5}',
    "phi" => '\u{03C6}',
    "chi" => '\u{03C7}',
    "psi" => '\u{03C8}',
    "omega" => '\u{03C9}',
    "theta1" => '\u{03D1}',
    "Upsilon1" => '\u{03D2}',
    "phi1" => '\u{03D5}',
    "omega1" => '\u{03D6}',

    // General punctuation
    "endash" => '\u{2013}',
    "emdash" => '\u{2014}',
    "quoteleft" => '\u{2018}',
    "quoteright" => '\u{2019}',
    "quotesinglbase" => '\u{201A}',
    "quotedblleft" => '\u{201C}',
    "quotedblright" => '\u{201D}',
    "quotedblbase" => '\u{201E}',
    "dagger" => '\u{2020}',
    "daggerdbl" => '\u{2021}',
    "bullet" => '\u{2022}',
    "ellipsis" => '\u{2026}',
    "perthousand" => '\u{2030}',
    "minute" => '\u{2032}',
    "second" => '\u{2033}',
    "guilsinglleft" => '\u{2039}',
    "guilsinglright" => '\u{203A}',
    "fraction" => '\u{2044}',
    "Euro" => '\u{20AC}',
    "trademark" => '\u{2122}',

    // Letterlike symbols and arrows
    "Ifraktur" => '\u{2111}',
    "weierstrass" => '\u{2118}',
    "Rfraktur" => '\u{211C}',
    "aleph" => '\u{2135}',
    "arrowleft" => '\u{2190}',
    "arrowup" => '\u{2191}',
    "arrowright" => '\u{2192}',
    "arrowdown" => '\u{2193}',
    "arrowboth" => '\u{2194}',
    "arrowupdn" => '\u{2195}',
    "carriagereturn" => '\u{21B5}',
    "arrowdblleft" => '\u{21D0}',
    "arrowdblup" => '\u{21D1}',
    "arrowdblright" => '\u{21D2}',
    "arrowdbldown" => '\u{21D3}',
    "arrowdblboth" => '\u{21D4}',

    // Mathematical operators
    "universal" => '\u{2200}',
    "partialdiff" => '\u{2202}',
    "existential" => '\u{2203}',
    "emptyset" => '\u{2205}',
    "gradient" => '\u{2207}',
    "element" => '\u{2208}',
    "notelement" => '\u{2209}',
    "suchthat" => '\u{220B}',
    "product" => '\u{220F}',
    "summation" => '\u{2211}',
    "minus" => '\u{2212}',
    "asteriskmath" => '\u{2217}',
    "radical" => '\u{221A}',
    "proportional" => '\u{221D}',
    "infinity" => '\u{221E}',
    "angle" => '\u{2220}',
    "logicaland" => '\u{2227}',
    "logicalor" => '\u{2228}',
    "intersection" => '\u{2229}',
    "union" => '\u{222A}',
    "integral" => '\u{222B}',
    "therefore" => '\u{2234}',
    "similar" => '\u{223C}',
    "congruent" => '\u{2245}',
    "approxequal" => '\u{2248}',
    "notequal" => '\u{2260}',
    "equivalence" => '\u{2261}',
    "lessequal" => '\u{2264}',
    "greaterequal" => '\u{2265}',
    "propersubset" => '\u{2282}',
    "propersuperset" => '\u{2283}',
    "notsubset" => '\u{2284}',
    "reflexsubset" => '\u{2286}',
    "reflexsuperset" => '\u{2287}',
    "circleplus" => '\u{2295}',
    "circlemultiply" => '\u{2297}',
    "perpendicular" => '\u{22A5}',
    "dotmath" => '\u{22C5}',
    "integraltp" => '\u{2320}',
    "integralbt" => '\u{2321}',
    "angleleft" => '\u{2329}',
    "angleright" => '\u{232A}',

    // Geometric shapes and card suits
    "lozenge" => '\u{25CA}',
    "spade" => '\u{2660}',
    "club" => '\u{2663}',
    "heart" => '\u{2665}',
    "diamond" => '\u{2666}',

    // Alphabetic presentation forms
    "ff" => '\u{FB00}',
    "fi" => '\u{FB01}',
    "fl" => '\u{FB02}',
    "ffi" => '\u{FB03}',
    "ffl" => '\u{FB04}',
};
