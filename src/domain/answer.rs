// ============================================================
// Layer 3 — Answer Domain Type
// ============================================================
// The result of one extractive QA model call: the text of the
// predicted span plus the model's confidence in it.
//
// Extractive QA means the model points at a contiguous span
// inside the given context rather than generating new text,
// so `text` is always a substring-shaped fragment of the
// context (after tokenizer round-tripping).
//
// The confidence is carried even where the pipeline ignores it:
// the concat-all strategy joins every chunk's answer regardless
// of score, which is the documented behaviour, not an oversight.

/// One answer span from the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// The decoded answer text. Empty when the model had nothing
    /// to point at (e.g. an empty context).
    pub text: String,

    /// Product of the start- and end-position probabilities of
    /// the chosen span, in [0.0, 1.0].
    pub confidence: f32,
}

impl Answer {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self { text: text.into(), confidence }
    }

    /// The degenerate answer a chunk contributes when the model
    /// cannot produce a span for it.
    pub fn empty() -> Self {
        Self { text: String::new(), confidence: 0.0 }
    }
}
