// ============================================================
// Layer 2 — QA Pipeline
// ============================================================
// One synchronous pass per request:
//
//   Step 1: Resolve the declared media type     (Layer 3 - domain)
//   Step 2: Extract text from the bytes         (Layer 4 - data)
//   Step 3: Split into bounded chunks           (Layer 4 - data)
//   Step 4: Answer, per the selection strategy  (Layer 4 + 5)
//
// Two answering strategies share this one body:
//
//   ConcatAll  — run the model once per chunk, join every answer
//                with a single space, in chunk order. No
//                deduplication and no confidence filtering, so
//                answer quality degrades as the document grows.
//                Documented behaviour, kept as-is.
//   TfidfBest  — pick the single most similar chunk and run the
//                model exactly once against it.
//
// A chunk the model fails on contributes an empty string instead
// of aborting the request; an unsupported media type or an
// unreadable document aborts immediately.

use serde::{Deserialize, Serialize};

use crate::data::{
    chunker::{Chunker, DEFAULT_MAX_CHUNK_LEN},
    html::HtmlExtractor,
    pdf::PdfExtractor,
    selector::TfidfSelector,
};
use crate::domain::answer::Answer;
use crate::domain::document::MediaType;
use crate::domain::error::QaError;
use crate::domain::traits::{ChunkSelector, SpanPredictor, TextExtractor};

// ─── Request / Response ──────────────────────────────────────────────────────
// The explicit request object: everything one interaction needs,
// with no widget state or ambient globals behind it.
#[derive(Debug, Clone)]
pub struct QaRequest {
    /// The uploaded document, as raw bytes
    pub document: Vec<u8>,

    /// The media type the uploader declared (e.g. "application/pdf").
    /// Kept as the raw string so rejections can echo it back.
    pub media_type: String,

    /// The free-text question to answer
    pub question: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QaResponse {
    /// The final answer line shown to the user
    pub answer: String,
}

// ─── Configuration ────────────────────────────────────────────────────────────
/// Which answering strategy the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Answer every chunk independently and join the results
    ConcatAll,
    /// TF-IDF-select one chunk and answer only that one
    TfidfBest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub max_chunk_len: usize,
    pub selection:     SelectionMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_len: DEFAULT_MAX_CHUNK_LEN,
            selection:     SelectionMode::TfidfBest,
        }
    }
}

// ─── QaPipeline ───────────────────────────────────────────────────────────────
/// The request → response function, generic over the model handle so
/// tests run it with a fake predictor and the CLI runs it with a
/// borrowed InferenceService.
pub struct QaPipeline<M: SpanPredictor> {
    model:  M,
    config: PipelineConfig,
}

impl<M: SpanPredictor> QaPipeline<M> {
    pub fn new(model: M, config: PipelineConfig) -> Self {
        Self { model, config }
    }

    /// Answer one request, start to finish.
    pub fn answer(&self, request: &QaRequest) -> Result<QaResponse, QaError> {
        // ── Step 1: Media type gate ───────────────────────────────────────────
        // Rejected before any extraction is attempted.
        let media_type = MediaType::from_mime(&request.media_type)
            .ok_or_else(|| QaError::UnsupportedMediaType(request.media_type.clone()))?;

        // ── Step 2: Extract text ──────────────────────────────────────────────
        let text = match media_type {
            MediaType::Pdf  => PdfExtractor::new().extract(&request.document)?,
            MediaType::Html => HtmlExtractor::new().extract(&request.document)?,
        };
        tracing::info!(
            "Extracted {} chars from {} document",
            text.len(),
            media_type.as_mime()
        );

        // ── Step 3: Chunk ─────────────────────────────────────────────────────
        // Never empty: degenerate text flows through as a single empty
        // chunk and produces a degenerate (empty) answer, not an error.
        let chunks = Chunker::new(self.config.max_chunk_len).split(&text);
        tracing::debug!("Split into {} chunk(s)", chunks.len());

        // ── Step 4: Answer ────────────────────────────────────────────────────
        let answer = match self.config.selection {
            SelectionMode::TfidfBest => {
                let idx = TfidfSelector::new().select(&request.question, &chunks);
                tracing::debug!("Selected chunk {idx} of {}", chunks.len());
                self.predict_or_empty(&request.question, &chunks[idx]).text
            }
            SelectionMode::ConcatAll => {
                let parts: Vec<String> = chunks
                    .iter()
                    .map(|chunk| self.predict_or_empty(&request.question, chunk).text)
                    .collect();
                parts.join(" ")
            }
        };

        Ok(QaResponse { answer })
    }

    /// One model call; a failure contributes an empty answer for that
    /// chunk rather than failing the request.
    fn predict_or_empty(&self, question: &str, context: &str) -> Answer {
        match self.model.predict(question, context) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Inference failed for chunk: {e}");
                Answer::empty()
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Answers with the first word of the context and counts calls.
    struct FirstWordModel {
        calls: Cell<usize>,
    }

    impl FirstWordModel {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl SpanPredictor for FirstWordModel {
        fn predict(&self, _question: &str, context: &str) -> Result<Answer, QaError> {
            self.calls.set(self.calls.get() + 1);
            let word = context.split_whitespace().next().unwrap_or("");
            Ok(Answer::new(word, 0.9))
        }
    }

    /// Fails on every call.
    struct BrokenModel;

    impl SpanPredictor for BrokenModel {
        fn predict(&self, _q: &str, _c: &str) -> Result<Answer, QaError> {
            Err(QaError::Inference("boom".into()))
        }
    }

    fn html_request(body: &str, question: &str) -> QaRequest {
        QaRequest {
            document:   format!("<html><body><p>{body}</p></body></html>").into_bytes(),
            media_type: "text/html".to_string(),
            question:   question.to_string(),
        }
    }

    fn config(max_chunk_len: usize, selection: SelectionMode) -> PipelineConfig {
        PipelineConfig { max_chunk_len, selection }
    }

    #[test]
    fn test_html_end_to_end_with_selection() {
        let model    = FirstWordModel::new();
        let pipeline = QaPipeline::new(&model, config(3000, SelectionMode::TfidfBest));
        let request  = html_request(
            "Paris is the capital of France.",
            "What is the capital of France?",
        );
        let response = pipeline.answer(&request).unwrap();
        assert!(response.answer.contains("Paris"));
        // Short document, one chunk, exactly one model call.
        assert_eq!(model.calls.get(), 1);
    }

    #[test]
    fn test_concat_all_answers_every_chunk_in_order() {
        let model = FirstWordModel::new();
        // Tiny chunks force a multi-chunk document.
        let pipeline = QaPipeline::new(&model, config(4, SelectionMode::ConcatAll));
        let request  = QaRequest {
            document:   b"<p>abcdWXYZ</p>".to_vec(),
            media_type: "text/html".to_string(),
            question:   "anything".to_string(),
        };
        let response = pipeline.answer(&request).unwrap();
        assert_eq!(response.answer, "abcd WXYZ");
        assert_eq!(model.calls.get(), 2);
    }

    #[test]
    fn test_tfidf_best_runs_model_exactly_once() {
        let model    = FirstWordModel::new();
        let pipeline = QaPipeline::new(&model, config(30, SelectionMode::TfidfBest));
        let body     = "nothing of interest here today graduation ceremony in june";
        let request  = html_request(body, "when is the graduation ceremony");
        pipeline.answer(&request).unwrap();
        assert_eq!(model.calls.get(), 1);
    }

    #[test]
    fn test_unsupported_media_type_is_rejected_before_any_work() {
        let model    = FirstWordModel::new();
        let pipeline = QaPipeline::new(&model, PipelineConfig::default());
        let request  = QaRequest {
            document:   b"whatever".to_vec(),
            media_type: "image/png".to_string(),
            question:   "q".to_string(),
        };
        let err = pipeline.answer(&request).unwrap_err();
        assert!(matches!(err, QaError::UnsupportedMediaType(t) if t == "image/png"));
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn test_corrupt_pdf_is_a_fatal_extraction_error() {
        let model    = FirstWordModel::new();
        let pipeline = QaPipeline::new(&model, PipelineConfig::default());
        let request  = QaRequest {
            document:   b"not a pdf at all".to_vec(),
            media_type: "application/pdf".to_string(),
            question:   "q".to_string(),
        };
        assert!(matches!(
            pipeline.answer(&request),
            Err(QaError::Extraction(_))
        ));
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn test_failing_chunks_contribute_empty_strings() {
        let pipeline = QaPipeline::new(&BrokenModel, config(4, SelectionMode::ConcatAll));
        let request  = QaRequest {
            document:   b"<p>abcdWXYZ</p>".to_vec(),
            media_type: "text/html".to_string(),
            question:   "q".to_string(),
        };
        // Two chunks, both failing: two empty parts joined by one space.
        let response = pipeline.answer(&request).unwrap();
        assert_eq!(response.answer, " ");
    }

    #[test]
    fn test_empty_document_text_yields_degenerate_answer_not_error() {
        let model    = FirstWordModel::new();
        let pipeline = QaPipeline::new(&model, config(3000, SelectionMode::TfidfBest));
        let request  = QaRequest {
            document:   b"<html><body></body></html>".to_vec(),
            media_type: "text/html".to_string(),
            question:   "anything at all".to_string(),
        };
        let response = pipeline.answer(&request).unwrap();
        assert_eq!(response.answer, "");
        // The single empty chunk was still passed to the model.
        assert_eq!(model.calls.get(), 1);
    }
}
