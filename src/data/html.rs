// ============================================================
// Layer 4 — HTML Text Extractor
// ============================================================
// Extracts human-visible text from an HTML byte blob using the
// scraper crate.
//
// The document is walked element by element in tree order, and
// the direct text-node children of each element are appended as
// they appear. Script and style contents are discarded (their
// text lives directly under <script>/<style>, which we skip).
// Markup never reaches the output; whitespace is passed through
// as the parser produced it — no normalization is promised.
//
// Non-UTF-8 input is decoded lossily rather than rejected:
// a mangled character is a better outcome here than refusing
// a document the browser would have rendered.

use scraper::Html;

use crate::domain::error::QaError;
use crate::domain::traits::TextExtractor;

pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for HtmlExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, QaError> {
        let html = String::from_utf8_lossy(bytes);
        let doc  = Html::parse_document(&html);

        let selector = scraper::Selector::parse("*")
            .map_err(|e| QaError::Extraction(format!("selector parse error: {e}")))?;

        let mut text = String::new();
        for element in doc.select(&selector) {
            let tag = element.value().name();
            if tag == "script" || tag == "style" {
                continue;
            }
            // Only the element's own text children — descendants are
            // covered when the walk reaches their parent element, which
            // keeps everything in document order and visited exactly once.
            for child in element.children() {
                if let Some(t) = child.value().as_text() {
                    text.push_str(t);
                }
            }
        }

        tracing::debug!("Extracted {} chars from HTML", text.len());
        Ok(text)
    }
}
