// ============================================================
// Layer 4 — PDF Text Extractor
// ============================================================
// Extracts text from a PDF byte blob using lopdf.
//
// Pages are visited in page order and their text is concatenated
// with no added separator — so the last word of one page can run
// into the first word of the next. That mirrors the documented
// extraction contract; the chunker downstream does not care.
//
// Failure handling is two-tier:
//   - the whole document fails to parse → QaError::Extraction,
//     fatal for this request
//   - a single page fails text extraction → that page contributes
//     no text, logged at warn, and extraction continues
//
// Reference: lopdf crate documentation

use lopdf::Document;

use crate::domain::error::QaError;
use crate::domain::traits::TextExtractor;

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, QaError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| QaError::Extraction(format!("lopdf parse error: {e}")))?;

        let mut text = String::new();

        // get_pages() is a BTreeMap keyed by page number, so iteration
        // order is page order.
        for (page_num, _object_id) in doc.get_pages() {
            match doc.extract_text(&[page_num]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => {
                    tracing::warn!("No text extracted from page {page_num}: {e}");
                }
            }
        }

        tracing::debug!("Extracted {} chars from PDF", text.len());
        Ok(text)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_garbage_bytes_are_a_fatal_extraction_error() {
        let ex  = PdfExtractor::new();
        let err = ex.extract(b"this is definitely not a pdf").unwrap_err();
        assert!(matches!(err, QaError::Extraction(_)));
    }

    #[test]
    fn test_empty_input_is_a_fatal_extraction_error() {
        let ex = PdfExtractor::new();
        assert!(ex.extract(&[]).is_err());
    }

    #[test]
    fn test_pdf_with_no_pages_yields_empty_text() {
        // A structurally valid document with an empty page tree:
        // parsing succeeds, and with nothing to visit the extracted
        // text is empty rather than an error.
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        doc.objects.insert(
            pages_id,
            lopdf::Object::Dictionary(lopdf::dictionary! {
                "Type"  => "Pages",
                "Kids"  => lopdf::Object::Array(vec![]),
                "Count" => 0_i64,
            }),
        );
        let catalog_id = doc.add_object(lopdf::dictionary! {
            "Type"  => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();

        let ex = PdfExtractor::new();
        assert_eq!(ex.extract(&bytes).unwrap(), "");
    }
}
