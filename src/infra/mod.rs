// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence that doesn't belong to any business
// layer. With a fixed pretrained model this is load-only:
//
//   model_store.rs — reads the three assets a model directory
//                    holds (model_config.json, tokenizer.json,
//                    model weights via Burn's CompactRecorder)
//                    and turns missing files into actionable
//                    QaError::ModelLoad messages.

/// Loads pretrained model assets from a model directory
pub mod model_store;
