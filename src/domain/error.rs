// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// One enum per failure class of a single request, so callers can
// distinguish "you sent me the wrong kind of file" from "your
// file is broken" from "the model fell over".
//
// The first two classes are explicit errors; a per-chunk
// inference failure stays permissive and contributes an empty
// answer inside the pipeline (see QaPipeline), surfacing as
// `Inference` only when the model cannot be invoked at all.
//
// Reference: thiserror crate documentation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    /// The declared media type is neither application/pdf nor text/html.
    /// Rejected before any extraction is attempted.
    #[error("unsupported media type '{0}' (expected application/pdf or text/html)")]
    UnsupportedMediaType(String),

    /// The document could not be read or parsed at all.
    /// Fatal for this request only.
    #[error("failed to extract text from document: {0}")]
    Extraction(String),

    /// The model failed on an inference call.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Model assets (config, tokenizer, weights) are missing or invalid.
    #[error("failed to load model assets: {0}")]
    ModelLoad(String),
}
