// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw uploaded bytes and the context
// string handed to the model:
//
//   document bytes (PDF or HTML)
//       │
//       ▼
//   PdfExtractor / HtmlExtractor → one plain-text string
//       │
//       ▼
//   Chunker                      → bounded-length segments
//       │
//       ▼
//   TfidfSelector (optional)     → index of the best segment
//
// Each module is responsible for exactly one step, which makes
// each step independently testable and replaceable.

/// Extracts text from PDF documents page by page (lopdf)
pub mod pdf;

/// Extracts visible text from HTML documents (scraper)
pub mod html;

/// Splits extracted text into fixed-length character chunks
pub mod chunker;

/// Picks the chunk most similar to the question (TF-IDF cosine)
pub mod selector;
