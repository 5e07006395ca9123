//! Triage domain: the request/response contract, the dispatch policy, and
//! the synthesizer that turns a final answer into a structured response.

pub mod entities;
pub mod policy;
pub mod synthesizer;

pub use entities::{TriageRequest, TriageResponse, TriageStatus};
pub use policy::DispatchPolicy;
pub use synthesizer::{SessionEvidence, extract_issue_url, synthesize};
