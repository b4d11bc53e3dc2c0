//! Generation orchestration: the per-user gate and the LLM-with-
//! fallback service.

mod gate;
mod service;

pub use gate::{GatePermit, GateRejection, GenerationGate, DEFAULT_MIN_INTERVAL};
pub use service::{GenerateError, GenerationResult, GenerationService, GenerationSource};
