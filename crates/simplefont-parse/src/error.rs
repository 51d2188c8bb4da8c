//! Error types for the font-dictionary layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps backend-specific errors and converts them to [`FontError`].

use simplefont_core::FontError;
use thiserror::Error;

/// Error type for reading fonts out of a PDF object graph.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error parsing PDF structure or embedded font data (CMaps, arrays).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// The font dictionary is unusable.
    #[error("font error: {0}")]
    Font(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] FontError),
}

impl From<BackendError> for FontError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => FontError::ParseError(msg),
            BackendError::Font(msg) => FontError::EncodingError(msg),
            BackendError::Core(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_parse() {
        let err = BackendError::Parse("unterminated hex string".to_string());
        assert_eq!(err.to_string(), "PDF parse error: unterminated hex string");
    }

    #[test]
    fn backend_error_font() {
        let err = BackendError::Font("not a dictionary".to_string());
        assert_eq!(err.to_string(), "font error: not a dictionary");
    }

    #[test]
    fn backend_error_from_font_error() {
        let err: BackendError = FontError::Other("x".to_string()).into();
        assert!(matches!(err, BackendError::Core(_)));
        assert_eq!(err.to_string(), "x");
    }

    #[test]
    fn backend_error_to_font_error_parse() {
        let font_err: FontError = BackendError::Parse("bad syntax".to_string()).into();
        assert_eq!(font_err, FontError::ParseError("bad syntax".to_string()));
    }

    #[test]
    fn backend_error_to_font_error_font() {
        let font_err: FontError = BackendError::Font("missing subtype".to_string()).into();
        assert_eq!(
            font_err,
            FontError::EncodingError("missing subtype".to_string())
        );
    }

    #[test]
    fn backend_error_to_font_error_core_passthrough() {
        let original = FontError::ResourceLimitExceeded {
            limit_name: "max_tounicode_bytes".to_string(),
            limit_value: 1024,
            actual_value: 2048,
        };
        let font_err: FontError = BackendError::Core(original.clone()).into();
        assert_eq!(font_err, original);
    }

    #[test]
    fn backend_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(BackendError::Parse("test".to_string()));
        assert!(err.to_string().contains("test"));
    }
}
