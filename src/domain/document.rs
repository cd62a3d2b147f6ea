// ============================================================
// Layer 3 — Document Media Types
// ============================================================
// A document enters the system as an opaque byte blob with a
// declared media type (carried on the QaRequest). Exactly two
// types are accepted: application/pdf and text/html. Anything
// else is rejected before any extraction is attempted.

use mime::Mime;

/// The two document formats the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Html,
}

impl MediaType {
    /// Parse a declared MIME string into a supported media type.
    ///
    /// Matching is on the type/subtype essence, so parameters like
    /// `text/html; charset=utf-8` are accepted. Returns `None` for
    /// every unsupported type — the caller decides whether that is
    /// an error or a silent no-op.
    pub fn from_mime(declared: &str) -> Option<Self> {
        let mime: Mime = declared.trim().parse().ok()?;
        match mime.essence_str() {
            "application/pdf" => Some(Self::Pdf),
            "text/html"       => Some(Self::Html),
            _                 => None,
        }
    }

    /// The canonical MIME string for this media type.
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf  => "application/pdf",
            Self::Html => "text/html",
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_and_html() {
        assert_eq!(MediaType::from_mime("application/pdf"), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_mime("text/html"), Some(MediaType::Html));
    }

    #[test]
    fn test_accepts_parameters_on_declared_type() {
        assert_eq!(
            MediaType::from_mime("text/html; charset=utf-8"),
            Some(MediaType::Html)
        );
    }

    #[test]
    fn test_rejects_everything_else() {
        assert_eq!(MediaType::from_mime("image/png"), None);
        assert_eq!(MediaType::from_mime("text/plain"), None);
        assert_eq!(MediaType::from_mime("not a mime"), None);
        assert_eq!(MediaType::from_mime(""), None);
    }
}
