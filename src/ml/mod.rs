// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn framework specific code lives here; no other layer
// imports burn directly. If Burn's API changes, only this layer
// moves, and everything above stays testable without a GPU.
//
//   model.rs      — the transformer encoder with a span head
//                   (token + position embeddings, multi-head
//                   self-attention layers, start/end logits)
//
//   inferencer.rs — InferenceService: the explicitly constructed
//                   handle around the loaded pretrained model,
//                   with load / predict / shutdown
//
// Reference: Vaswani et al. (2017) Attention Is All You Need
//            Devlin et al. (2019) BERT

/// Transformer encoder span-prediction architecture
pub mod model;

/// The loaded-model handle used by the pipeline
pub mod inferencer;
