// ============================================================
// Layer 5 — Inference Service
// ============================================================
// The explicitly constructed handle around the pretrained model:
// loaded once at startup, passed (by reference) into the
// pipeline, and released with an explicit shutdown. No ambient
// global model state anywhere.
//
// predict() implements standard extractive QA decoding:
//   1. Build [CLS] question [SEP] context [SEP], truncated to
//      the model's max sequence length
//   2. Forward pass → per-token start / end logits
//   3. Softmax both, restricted to the real (unpadded) sequence
//   4. Take the best span with start ≤ end inside the context
//      region, bounded by MAX_ANSWER_LEN tokens
//   5. Decode the span and strip special tokens
//
// An empty context is answered with an empty Answer (confidence
// 0.0) rather than an error — one blank chunk must not sink a
// whole concat-all request.

use burn::prelude::*;
use tokenizers::Tokenizer;

use crate::domain::answer::Answer;
use crate::domain::error::QaError;
use crate::domain::traits::SpanPredictor;
use crate::infra::model_store::ModelStore;
use crate::ml::model::QaSpanModel;

type InferBackend = burn::backend::Wgpu;

// BERT vocabulary convention
const CLS_ID: u32 = 101;
const SEP_ID: u32 = 102;

/// Longest answer span considered, in tokens. SQuAD-style answers
/// are short; longer candidates are almost always span-scoring noise.
const MAX_ANSWER_LEN: usize = 30;

pub struct InferenceService {
    model:       QaSpanModel<InferBackend>,
    tokenizer:   Tokenizer,
    model_id:    String,
    max_seq_len: usize,
    device:      burn::backend::wgpu::WgpuDevice,
}

impl InferenceService {
    /// Explicit initialization: read config, tokenizer and weights from
    /// the model directory and build the ready-to-predict handle.
    pub fn load(model_dir: &str) -> Result<Self, QaError> {
        let store  = ModelStore::new(model_dir);
        let device = burn::backend::wgpu::WgpuDevice::default();

        let cfg       = store.load_config()?;
        let tokenizer = store.load_tokenizer()?;
        let model: QaSpanModel<InferBackend> =
            cfg.to_span_config().init(&device);
        let model = store.load_weights(model, &device)?;

        tracing::info!("Loaded model '{}' from '{}'", cfg.model_id, model_dir);
        Ok(Self {
            model,
            tokenizer,
            model_id:    cfg.model_id,
            max_seq_len: cfg.max_seq_len,
            device,
        })
    }

    /// Explicit release of the process-wide model resource.
    pub fn shutdown(self) {
        tracing::info!("Releasing model '{}'", self.model_id);
        drop(self);
    }
}

impl SpanPredictor for InferenceService {
    fn predict(&self, question: &str, context: &str) -> Result<Answer, QaError> {
        if context.is_empty() {
            return Ok(Answer::empty());
        }

        // ── Build [CLS] question [SEP] context [SEP] ──────────────────────────
        let q_enc = self.tokenizer.encode(question, false)
            .map_err(|e| QaError::Inference(format!("question tokenization: {e}")))?;
        let c_enc = self.tokenizer.encode(context, false)
            .map_err(|e| QaError::Inference(format!("context tokenization: {e}")))?;

        let mut input_ids: Vec<u32> = vec![CLS_ID];
        input_ids.extend_from_slice(q_enc.get_ids());
        input_ids.push(SEP_ID);
        let context_start = input_ids.len();
        input_ids.extend_from_slice(c_enc.get_ids());
        input_ids.push(SEP_ID);
        input_ids.truncate(self.max_seq_len);
        let seq_len = input_ids.len();

        if context_start >= seq_len {
            // The question alone filled the window; no context tokens
            // survived, so there is nothing to point at.
            return Ok(Answer::empty());
        }
        while input_ids.len() < self.max_seq_len {
            input_ids.push(0);
        }

        // ── Forward pass ──────────────────────────────────────────────────────
        let input_flat: Vec<i32> = input_ids.iter().map(|&x| x as i32).collect();
        let input_tensor = Tensor::<InferBackend, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).unsqueeze::<2>();

        let logits = self.model.forward(input_tensor);
        let start_logits = logits.start.squeeze::<1>().slice([0..seq_len]);
        let end_logits   = logits.end.squeeze::<1>().slice([0..seq_len]);

        let start_probs: Vec<f32> = burn::tensor::activation::softmax(
            start_logits.unsqueeze::<2>(), 1,
        ).squeeze::<1>().into_data().to_vec::<f32>()
            .map_err(|e| QaError::Inference(format!("start probs: {e:?}")))?;

        let end_probs: Vec<f32> = burn::tensor::activation::softmax(
            end_logits.unsqueeze::<2>(), 1,
        ).squeeze::<1>().into_data().to_vec::<f32>()
            .map_err(|e| QaError::Inference(format!("end probs: {e:?}")))?;

        // ── Best valid span inside the context region ─────────────────────────
        let mut best_score = f32::NEG_INFINITY;
        let mut best_start = context_start;
        let mut best_end   = context_start;

        for s in context_start..seq_len {
            for e in s..(s + MAX_ANSWER_LEN).min(seq_len) {
                let score = start_probs[s] * end_probs[e];
                if score > best_score {
                    best_score = score;
                    best_start = s;
                    best_end   = e;
                }
            }
        }

        // ── Decode ────────────────────────────────────────────────────────────
        let answer_ids = &input_ids[best_start..=best_end];
        let decoded = self.tokenizer.decode(answer_ids, true)
            .map_err(|e| QaError::Inference(format!("decode: {e}")))?;

        let text = decoded
            .replace("[CLS]", "")
            .replace("[SEP]", "")
            .replace("[PAD]", "")
            .trim()
            .to_string();

        tracing::debug!(
            "Span [{best_start},{best_end}] conf={best_score:.4} answer='{text}'"
        );

        Ok(Answer::new(text, best_score))
    }
}
