// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define the core
// concepts of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or parsing-library types
//   - Only plain Rust structs, enums, and traits
//
// This keeps the domain testable without model weights or a
// GPU, and lets the parsing/inference layers be swapped behind
// the traits defined here.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Media types and the uploaded document blob
pub mod document;

// The answer span produced by the model
pub mod answer;

// The error taxonomy for one request
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
