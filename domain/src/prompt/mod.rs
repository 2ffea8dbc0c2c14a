//! Prompt domain
//!
//! Templates for the supervisor's argument and rebuttal synthesis.

mod template;

pub use template::{DebatePromptTemplate, SynthesisContext};
