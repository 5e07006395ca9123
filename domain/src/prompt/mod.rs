//! Prompt domain
//!
//! Instruction text handed to the reasoning engine at the start of a session.

mod triage;

pub use triage::TriagePromptTemplate;
