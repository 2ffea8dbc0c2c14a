//! Logging infrastructure: the structured debate transcript.
//!
//! Provides [`JsonlDebateLogger`], a JSONL file writer that implements
//! the [`DebateLogger`](debate_application::DebateLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlDebateLogger;
