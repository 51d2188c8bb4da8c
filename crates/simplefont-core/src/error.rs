//! Error and warning types for simple-font loading.
//!
//! Provides [`FontError`] for fatal errors that stop loading a font,
//! [`FontWarning`] for non-fatal issues that allow degraded continuation,
//! [`FontResult`] for pairing a value with collected warnings, and
//! [`FontOptions`] for configuring resource limits and warning behavior.

use std::fmt;

use crate::unicode_norm::UnicodeNorm;

/// Fatal error types for simple-font loading.
#[derive(Debug, Clone, PartialEq)]
pub enum FontError {
    /// Error parsing a font-related structure (CMap, dictionary).
    ParseError(String),
    /// The encoding specification could not be resolved.
    EncodingError(String),
    /// The font descriptor could not be projected.
    DescriptorError(String),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_tounicode_bytes").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::ParseError(msg) => write!(f, "parse error: {msg}"),
            FontError::EncodingError(msg) => write!(f, "encoding error: {msg}"),
            FontError::DescriptorError(msg) => write!(f, "descriptor error: {msg}"),
            FontError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            FontError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FontError {}

/// Machine-readable warning code for categorizing font-loading issues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum FontWarningCode {
    /// The ToUnicode stream could not be parsed and was ignored.
    MalformedToUnicode,
    /// A glyph name in `/Differences` resolved to no character.
    UnresolvedGlyphName,
    /// An `/Encoding` entry is malformed (bad cursor, unexpected object).
    MalformedEncoding,
    /// A PDF object is malformed or has unexpected structure.
    MalformedObject,
    /// A configured resource limit was reached.
    ResourceLimitReached,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl FontWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            FontWarningCode::MalformedToUnicode => "MALFORMED_TOUNICODE",
            FontWarningCode::UnresolvedGlyphName => "UNRESOLVED_GLYPH_NAME",
            FontWarningCode::MalformedEncoding => "MALFORMED_ENCODING",
            FontWarningCode::MalformedObject => "MALFORMED_OBJECT",
            FontWarningCode::ResourceLimitReached => "RESOURCE_LIMIT_REACHED",
            FontWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for FontWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal warning encountered while loading a font.
///
/// Carries a structured [`code`](FontWarning::code), a human-readable
/// description and optional context: the font's base name and the character
/// code (or `/Differences` cursor) the issue is attached to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontWarning {
    /// Machine-readable warning code.
    pub code: FontWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Base font name associated with the warning, if known.
    pub font_name: Option<String>,
    /// Character code or cursor value the warning refers to.
    ///
    /// Signed because out-of-range `/Differences` cursors are reported as-is.
    pub char_code: Option<i64>,
}

impl FontWarning {
    /// Create a warning with a specific code and description.
    pub fn with_code(code: FontWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            font_name: None,
            char_code: None,
        }
    }

    /// Attach the character code the warning refers to.
    pub fn at_code(mut self, code: i64) -> Self {
        self.char_code = Some(code);
        self
    }

    /// Attach the font name, unless one is already set.
    pub fn in_font(mut self, font_name: impl Into<String>) -> Self {
        if self.font_name.is_none() {
            self.font_name = Some(font_name.into());
        }
        self
    }

    /// Convert this warning into a [`FontError`].
    ///
    /// Used by strict mode to escalate warnings to errors.
    pub fn to_error(&self) -> FontError {
        FontError::Other(self.to_string())
    }
}

impl fmt::Display for FontWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(ref font_name) = self.font_name {
            write!(f, " [font {font_name}]")?;
        }
        if let Some(code) = self.char_code {
            write!(f, " [code {code}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct FontResult<T> {
    /// The produced value.
    pub value: T,
    /// Warnings collected while producing it.
    pub warnings: Vec<FontWarning>,
}

impl<T> FontResult<T> {
    /// Create a result with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<FontWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FontResult<U> {
        FontResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Move this result's warnings into `sink` and return the bare value.
    pub fn drain_into(self, sink: &mut Vec<FontWarning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}

/// Options controlling font loading.
#[derive(Debug, Clone)]
pub struct FontOptions {
    /// Whether to collect warnings while loading (default: true).
    pub collect_warnings: bool,
    /// When true, the first warning is escalated to an error (default: false).
    pub strict_mode: bool,
    /// Normalization applied to text before it is measured (default: None).
    pub unicode_norm: UnicodeNorm,
    /// Maximum ToUnicode stream size in bytes (default: 1 MiB).
    pub max_tounicode_bytes: usize,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            collect_warnings: true,
            strict_mode: false,
            unicode_norm: UnicodeNorm::None,
            max_tounicode_bytes: 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_error_display() {
        assert_eq!(
            FontError::ParseError("bad cmap".to_string()).to_string(),
            "parse error: bad cmap"
        );
        assert_eq!(
            FontError::EncodingError("no table".to_string()).to_string(),
            "encoding error: no table"
        );
        assert_eq!(
            FontError::DescriptorError("not a dict".to_string()).to_string(),
            "descriptor error: not a dict"
        );
        assert_eq!(FontError::Other("boom".to_string()).to_string(), "boom");
    }

    #[test]
    fn font_error_resource_limit_exceeded() {
        let err = FontError::ResourceLimitExceeded {
            limit_name: "max_tounicode_bytes".to_string(),
            limit_value: 1024,
            actual_value: 2048,
        };
        assert_eq!(
            err.to_string(),
            "resource limit exceeded: max_tounicode_bytes (limit: 1024, actual: 2048)"
        );
    }

    #[test]
    fn font_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(FontError::Other("x".to_string()));
        assert_eq!(err.to_string(), "x");
    }

    #[test]
    fn warning_code_tags() {
        assert_eq!(
            FontWarningCode::MalformedToUnicode.as_str(),
            "MALFORMED_TOUNICODE"
        );
        assert_eq!(
            FontWarningCode::UnresolvedGlyphName.as_str(),
            "UNRESOLVED_GLYPH_NAME"
        );
        assert_eq!(
            FontWarningCode::MalformedEncoding.to_string(),
            "MALFORMED_ENCODING"
        );
        assert_eq!(FontWarningCode::MalformedObject.as_str(), "MALFORMED_OBJECT");
        assert_eq!(
            FontWarningCode::ResourceLimitReached.as_str(),
            "RESOURCE_LIMIT_REACHED"
        );
        assert_eq!(FontWarningCode::Other("x".into()).as_str(), "OTHER");
    }

    #[test]
    fn warning_with_code_has_no_context() {
        let w = FontWarning::with_code(FontWarningCode::MalformedObject, "something odd");
        assert_eq!(w.code, FontWarningCode::MalformedObject);
        assert_eq!(w.description, "something odd");
        assert!(w.font_name.is_none());
        assert!(w.char_code.is_none());
    }

    #[test]
    fn warning_builders_and_display() {
        let w = FontWarning::with_code(FontWarningCode::MalformedEncoding, "cursor out of range")
            .at_code(300)
            .in_font("Helvetica");
        assert_eq!(
            w.to_string(),
            "[MALFORMED_ENCODING] cursor out of range [font Helvetica] [code 300]"
        );
    }

    #[test]
    fn in_font_keeps_existing_name() {
        let w = FontWarning::with_code(FontWarningCode::Other("x".into()), "x")
            .in_font("First")
            .in_font("Second");
        assert_eq!(w.font_name.as_deref(), Some("First"));
    }

    #[test]
    fn warning_to_error() {
        let w = FontWarning::with_code(FontWarningCode::MalformedToUnicode, "bad stream");
        assert_eq!(
            w.to_error(),
            FontError::Other("[MALFORMED_TOUNICODE] bad stream".to_string())
        );
    }

    #[test]
    fn font_result_helpers() {
        let clean = FontResult::ok(7);
        assert!(clean.is_clean());

        let noisy = FontResult::with_warnings(2, vec![FontWarning::with_code(FontWarningCode::MalformedObject, "w")]);
        assert!(!noisy.is_clean());
        let mapped = noisy.map(|v| v * 10);
        assert_eq!(mapped.value, 20);
        assert_eq!(mapped.warnings.len(), 1);

        let mut sink = Vec::new();
        let value = mapped.drain_into(&mut sink);
        assert_eq!(value, 20);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn font_options_defaults() {
        let opts = FontOptions::default();
        assert!(opts.collect_warnings);
        assert!(!opts.strict_mode);
        assert_eq!(opts.unicode_norm, UnicodeNorm::None);
        assert_eq!(opts.max_tounicode_bytes, 1024 * 1024);
    }
}
