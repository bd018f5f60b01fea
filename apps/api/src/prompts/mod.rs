// Prompt organization: raw text → one completion call → envelope JSON.
// All remote calls go through llm_client — no direct HTTP here.

pub mod assembler;
pub mod envelope;
pub mod handlers;
pub mod instructions;
pub mod normalize;
pub mod options;
pub mod pipeline;
