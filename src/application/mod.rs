// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to answer one request.
//
// Rules for this layer:
//   - No parsing-library or model math here
//   - No UI or printing here (that's Layer 1)
//   - Only workflow coordination
//
// The single use case is QaPipeline: an explicit QaRequest in,
// a QaResponse out, with the chunk-selection step parametrized
// as a strategy (answer every chunk, or pick one first).

// The request → response question-answering workflow
pub mod pipeline;
