// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types, the
// pipeline can be exercised without a parsing library or model
// weights, and implementations can be swapped without touching
// the orchestration code:
//
//   - PdfExtractor / HtmlExtractor implement TextExtractor
//   - TfidfSelector implements ChunkSelector
//   - InferenceService implements SpanPredictor
//   - tests implement SpanPredictor with cheap fakes
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::answer::Answer;
use crate::domain::error::QaError;

// ─── TextExtractor ────────────────────────────────────────────────────────────
/// Any component that can turn a raw document byte blob into UTF-8 text.
///
/// Implementations:
///   - PdfExtractor  → page-by-page text via lopdf
///   - HtmlExtractor → visible text nodes via scraper
pub trait TextExtractor {
    /// Extract all text from the document bytes.
    /// An unreadable document is a fatal `QaError::Extraction`;
    /// partial failures (e.g. one bad PDF page) contribute no text.
    fn extract(&self, bytes: &[u8]) -> Result<String, QaError>;
}

// ─── ChunkSelector ────────────────────────────────────────────────────────────
/// Any component that picks exactly one chunk as QA context for a question.
///
/// Implementations:
///   - TfidfSelector → cosine similarity in a TF-IDF space fit on the chunks
pub trait ChunkSelector {
    /// Return the index of the chosen chunk. Must return a valid index
    /// for any non-empty `chunks` slice; with no usable signal the
    /// first chunk (index 0) is the deterministic fallback.
    fn select(&self, question: &str, chunks: &[String]) -> usize;
}

// ─── SpanPredictor ────────────────────────────────────────────────────────────
/// Any component that can point at an answer span within a context.
///
/// Implementations:
///   - InferenceService → the loaded burn model
///   - test fakes       → deterministic canned answers
pub trait SpanPredictor {
    /// Answer `question` against `context`. An empty context yields an
    /// empty `Answer`, not an error.
    fn predict(&self, question: &str, context: &str) -> Result<Answer, QaError>;
}

/// Allow a pipeline to borrow a predictor rather than own it, so the
/// caller keeps the handle for an explicit shutdown afterwards.
impl<T: SpanPredictor + ?Sized> SpanPredictor for &T {
    fn predict(&self, question: &str, context: &str) -> Result<Answer, QaError> {
        (**self).predict(question, context)
    }
}
