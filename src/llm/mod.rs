//! LLM domain — the inference side of the analysis pipeline.
//!
//! External code should only use what is exported here.
//!
//! Pieces:
//!   - gateway.rs  — one-shot provider call + report recovery
//!   - extract.rs  — JSON extraction from noisy completion text
//!   - validate.rs — report shape enforcement
//!   - prompts.rs  — prompt constants
//!   - types.rs    — report types + the reference report

pub mod extract;
mod gateway;
pub mod prompts;
pub mod types;
mod validate;

pub use extract::extract_json_object;
pub use gateway::InferenceGateway;
pub use types::AnalysisReport;
pub use validate::validate_report;
