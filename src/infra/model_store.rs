// ============================================================
// Layer 6 — Model Store
// ============================================================
// Load-only persistence for the pretrained extractive QA model.
// A model directory holds exactly three assets:
//
//   model/
//     model_config.json  ← architecture + identifier (serde JSON)
//     tokenizer.json     ← HuggingFace tokenizers vocabulary
//     model.mpk.gz       ← weights (Burn CompactRecorder)
//
// The architecture config must be read first: the weights can
// only be loaded into a model built with the exact same shape.
// CompactRecorder is type-safe about this — a mismatch fails the
// load rather than silently corrupting the model.

use std::{fs, path::PathBuf};

use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;

use crate::domain::error::QaError;
use crate::ml::model::{QaSpanModel, QaSpanModelConfig};

/// Default extractive model identifier (BERT-large fine-tuned on SQuAD).
pub const DEFAULT_MODEL_ID: &str =
    "bert-large-uncased-whole-word-masking-finetuned-squad";

// ─── Stored model configuration ───────────────────────────────────────────────
/// The on-disk description of the pretrained model. Serialized as
/// plain JSON so the assets stay inspectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_id:    String,
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        // BERT-large shape
        Self {
            model_id:    DEFAULT_MODEL_ID.to_string(),
            vocab_size:  30522,
            max_seq_len: 512,
            d_model:     1024,
            num_heads:   16,
            num_layers:  24,
            d_ff:        4096,
        }
    }
}

impl ModelConfig {
    /// The Burn-side architecture config for this stored description.
    pub fn to_span_config(&self) -> QaSpanModelConfig {
        QaSpanModelConfig::new(
            self.vocab_size,
            self.max_seq_len,
            self.d_model,
            self.num_heads,
            self.num_layers,
            self.d_ff,
        )
    }
}

// ─── ModelStore ───────────────────────────────────────────────────────────────
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read model_config.json.
    pub fn load_config(&self) -> Result<ModelConfig, QaError> {
        let path = self.dir.join("model_config.json");
        let json = fs::read_to_string(&path).map_err(|e| {
            QaError::ModelLoad(format!(
                "cannot read '{}': {e}. Is --model-dir pointing at a model directory?",
                path.display()
            ))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            QaError::ModelLoad(format!("invalid model config '{}': {e}", path.display()))
        })
    }

    /// Read tokenizer.json.
    pub fn load_tokenizer(&self) -> Result<Tokenizer, QaError> {
        let path = self.dir.join("tokenizer.json");
        Tokenizer::from_file(&path).map_err(|e| {
            QaError::ModelLoad(format!("cannot load tokenizer '{}': {e}", path.display()))
        })
    }

    /// Load the pretrained weights into a freshly built model.
    /// The recorder appends its own extension, so the path is given
    /// without one.
    pub fn load_weights<B: Backend>(
        &self,
        model:  QaSpanModel<B>,
        device: &B::Device,
    ) -> Result<QaSpanModel<B>, QaError> {
        let path = self.dir.join("model");

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .map_err(|e| {
                QaError::ModelLoad(format!(
                    "cannot load weights '{}': {e}",
                    path.display()
                ))
            })?;

        Ok(model.load_record(record))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_json() {
        let cfg  = ModelConfig::default();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let back: ModelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.model_id, DEFAULT_MODEL_ID);
        assert_eq!(back.d_model, cfg.d_model);
        assert_eq!(back.num_layers, cfg.num_layers);
    }

    #[test]
    fn test_missing_config_is_a_model_load_error() {
        let store = ModelStore::new("definitely/not/a/model/dir");
        let err   = store.load_config().unwrap_err();
        assert!(matches!(err, QaError::ModelLoad(_)));
    }
}
