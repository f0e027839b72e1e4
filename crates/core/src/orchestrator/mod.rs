//! Search orchestrator.
//!
//! The orchestrator owns the user's filters and the published search state:
//! - **Validation**: raw input is gated before anything is sent
//! - **Augmentation**: filters are folded into the outgoing query
//! - **Dispatch**: one backend call per accepted submit, bounded by a timeout
//! - **Publication**: last issued attempt wins; older completions are dropped

mod config;
mod runner;
mod types;

pub use config::OrchestratorConfig;
pub use runner::SearchOrchestrator;
pub use types::{SearchState, SubmitOutcome, SEARCH_FAILED_MESSAGE};
